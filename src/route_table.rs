//! The route table of a target library.
//!
//! Routes come from one of two providers:
//!
//! - the target's registration entry point (`register_routes` by convention), whose body is
//!   scanned for `map_route(name, url, defaults[, constraints])` and `ignore_route(url)` calls;
//! - a YAML or JSON route manifest with the same shape.
//!
//! ```ignore
//! pub fn register_routes(routes: &mut RouteCollection) {
//!     routes.ignore_route("{resource}.axd/{*pathInfo}");
//!     routes.map_route(
//!         "OrderDetails",
//!         "orders/{id}",
//!         &[("controller", "Orders"), ("action", "GetOrder")],
//!         &[("httpMethod", HttpMethodConstraint::new(&["GET", "HEAD"]))],
//!     );
//! }
//! ```

use crate::error::{Error, Result};
use crate::parser::ParsedFile;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use syn::punctuated::Punctuated;
use syn::visit::Visit;
use syn::{Expr, Lit, Token};

/// A constraint attached to a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Constraint {
    /// Only these HTTP methods may reach the route, in declared order
    HttpMethods(Vec<String>),
    /// A pattern the matching route value must satisfy
    Pattern(String),
}

/// A URL pattern mapped to a handler through its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL pattern with `{param}` placeholders
    pub url: String,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub constraints: BTreeMap<String, Constraint>,
}

impl Route {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_constraint(mut self, key: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints.insert(key.into(), constraint);
        self
    }

    /// Looks up a default value; keys are case-insensitive.
    pub fn default_value(&self, key: &str) -> Option<&str> {
        self.defaults
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The verbs of the route's allowed-HTTP-methods constraint, if it has one.
    pub fn allowed_methods(&self) -> Option<&[String]> {
        self.constraints.values().find_map(|c| match c {
            Constraint::HttpMethods(verbs) => Some(verbs.as_slice()),
            Constraint::Pattern(_) => None,
        })
    }
}

/// Route manifest file layout.
#[derive(Debug, Deserialize)]
struct RouteManifest {
    #[serde(default)]
    routes: Vec<Route>,
}

/// Format of a route manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// `.json` files are JSON, everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// The ordered routes of a target library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    pub routes: Vec<Route>,
}

impl RouteTable {
    /// Loads the route table from a YAML or JSON manifest.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        debug!("Loading route manifest: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_manifest_str(&content, ManifestFormat::from_path(path))
    }

    pub fn from_manifest_str(content: &str, format: ManifestFormat) -> Result<Self> {
        let manifest: RouteManifest = match format {
            ManifestFormat::Json => serde_json::from_str(content)?,
            ManifestFormat::Yaml => serde_yaml::from_str(content)?,
        };

        if let Some(route) = manifest.routes.iter().find(|r| r.url.trim().is_empty()) {
            return Err(Error::ManifestError(format!(
                "route {:?} has an empty url",
                route.name.as_deref().unwrap_or("<unnamed>")
            )));
        }

        Ok(Self {
            routes: manifest.routes,
        })
    }

    /// Runs the registration entry point over the parsed sources.
    ///
    /// Every function or method named `entry_point` contributes its routes, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryPointNotFound`] if no such function exists.
    pub fn from_registration(parsed_files: &[ParsedFile], entry_point: &str) -> Result<Self> {
        let mut visitor = RegistrationVisitor {
            entry_point,
            found: false,
            routes: Vec::new(),
        };

        for parsed_file in parsed_files {
            visitor.visit_file(&parsed_file.syntax_tree);
        }

        if !visitor.found {
            return Err(Error::EntryPointNotFound(entry_point.to_string()));
        }

        debug!(
            "Entry point `{}` registered {} routes",
            entry_point,
            visitor.routes.len()
        );

        Ok(Self {
            routes: visitor.routes,
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Finds the registration entry point.
struct RegistrationVisitor<'a> {
    entry_point: &'a str,
    found: bool,
    routes: Vec<Route>,
}

impl RegistrationVisitor<'_> {
    fn collect(&mut self, block: &syn::Block) {
        self.found = true;
        let mut calls = RouteCallVisitor::default();
        calls.visit_block(block);
        self.routes.extend(calls.routes);
    }
}

impl<'ast> Visit<'ast> for RegistrationVisitor<'_> {
    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        if node.sig.ident == self.entry_point {
            self.collect(&node.block);
        } else {
            syn::visit::visit_item_fn(self, node);
        }
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        if node.sig.ident == self.entry_point {
            self.collect(&node.block);
        } else {
            syn::visit::visit_impl_item_fn(self, node);
        }
    }
}

/// Records `map_route` and `ignore_route` calls inside the entry point.
#[derive(Default)]
struct RouteCallVisitor {
    routes: Vec<Route>,
}

impl<'ast> Visit<'ast> for RouteCallVisitor {
    fn visit_expr_method_call(&mut self, node: &'ast syn::ExprMethodCall) {
        // receiver first, so chained registrations keep their source order
        syn::visit::visit_expr_method_call(self, node);

        let args: Vec<&Expr> = node.args.iter().collect();
        match node.method.to_string().as_str() {
            "map_route" => {
                if let Some(route) = parse_map_route(&args) {
                    self.routes.push(route);
                } else {
                    warn!("Ignoring map_route call without a literal url");
                }
            }
            "ignore_route" => {
                if let Some(url) = args.first().and_then(|e| string_literal(e)) {
                    self.routes.push(Route::new(url));
                }
            }
            _ => {}
        }
    }
}

fn parse_map_route(args: &[&Expr]) -> Option<Route> {
    let url = args.get(1).and_then(|e| string_literal(e))?;
    let mut route = Route::new(url);
    route.name = args.first().and_then(|e| string_literal(e));

    if let Some(defaults) = args.get(2) {
        for (key, value) in tuple_pairs(defaults) {
            match default_value(value) {
                Some(value) => {
                    route.defaults.insert(key, value);
                }
                None => debug!("Skipping non-literal default `{}` on {}", key, route.url),
            }
        }
    }

    if let Some(constraints) = args.get(3) {
        for (key, value) in tuple_pairs(constraints) {
            if let Some(verbs) = string_list(value) {
                route.constraints.insert(key, Constraint::HttpMethods(verbs));
            } else if let Some(pattern) = pattern_value(value) {
                route.constraints.insert(key, Constraint::Pattern(pattern));
            } else {
                debug!("Skipping unsupported constraint `{}` on {}", key, route.url);
            }
        }
    }

    Some(route)
}

fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Reference(r) => unwrap_expr(&r.expr),
        Expr::Paren(p) => unwrap_expr(&p.expr),
        Expr::Group(g) => unwrap_expr(&g.expr),
        _ => expr,
    }
}

fn string_literal(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Some(lit_str.value()),
            _ => None,
        },
        _ => None,
    }
}

/// A pattern constraint: a string literal, or one wrapped in a constructor call
/// (`Regex::new(r"\d+")`).
fn pattern_value(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Call(call) => string_literal(call.args.first()?),
        _ => string_literal(expr),
    }
}

/// A default value: a string literal, or the last segment of a path or call
/// (`UrlParameter::Optional` is `Optional`).
fn default_value(expr: &Expr) -> Option<String> {
    if let Some(value) = string_literal(expr) {
        return Some(value);
    }

    let path = match unwrap_expr(expr) {
        Expr::Path(expr_path) => &expr_path.path,
        Expr::Call(call) => match unwrap_expr(&call.func) {
            Expr::Path(expr_path) => &expr_path.path,
            _ => return None,
        },
        _ => return None,
    };

    path.segments.last().map(|s| s.ident.to_string())
}

/// `[("key", value), ...]`, optionally borrowed.
fn tuple_pairs(expr: &Expr) -> Vec<(String, &Expr)> {
    let Expr::Array(array) = unwrap_expr(expr) else {
        return Vec::new();
    };

    array
        .elems
        .iter()
        .filter_map(|elem| match unwrap_expr(elem) {
            Expr::Tuple(tuple) if tuple.elems.len() == 2 => {
                let key = string_literal(&tuple.elems[0])?;
                Some((key, &tuple.elems[1]))
            }
            _ => None,
        })
        .collect()
}

/// A list of string literals: an array, `vec![...]`, or a constructor call wrapping one.
fn string_list(expr: &Expr) -> Option<Vec<String>> {
    match unwrap_expr(expr) {
        Expr::Array(array) => array.elems.iter().map(string_literal).collect(),
        Expr::Macro(expr_macro) if expr_macro.mac.path.is_ident("vec") => {
            let elems = expr_macro
                .mac
                .parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
                .ok()?;
            elems.iter().map(string_literal).collect()
        }
        Expr::Call(call) => string_list(call.args.first()?),
        _ => None,
    }
}
