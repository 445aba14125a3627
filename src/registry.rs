//! Controller and action metadata extracted from the target's sources.
//!
//! A controller is any inherent `impl` block whose type name ends in `Controller`; its
//! methods are the actions. Verb markers and doc comments are read off each method once,
//! when the registry is built.

use crate::documentation::{DocComment, DocumentationSource};
use crate::error::ResolveError;
use crate::parser::ParsedFile;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::visit::Visit;
use syn::{Attribute, FnArg, LitStr, Pat, Token};

/// Suffix every controller type name carries.
pub const CONTROLLER_SUFFIX: &str = "Controller";

/// A formal parameter of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    /// Zero-based, receiver excluded
    pub position: usize,
}

/// An HTTP verb declared on an action through an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerbMarker {
    Get,
    Post,
    Put,
    Delete,
    /// `#[accept_verbs("GET", "HEAD")]`
    AcceptVerbs(Vec<String>),
}

impl VerbMarker {
    /// Recognizes a marker by the attribute's last path segment.
    ///
    /// Arguments of the single-verb markers are ignored, so `#[get("/orders")]` is a `Get`.
    pub fn from_attribute(attr: &Attribute) -> Option<Self> {
        let name = attr.path().segments.last()?.ident.to_string().to_lowercase();
        match name.as_str() {
            "get" | "http_get" => Some(VerbMarker::Get),
            "post" | "http_post" => Some(VerbMarker::Post),
            "put" | "http_put" => Some(VerbMarker::Put),
            "delete" | "http_delete" => Some(VerbMarker::Delete),
            "accept_verbs" => {
                let verbs = attr
                    .parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)
                    .ok()?;
                Some(VerbMarker::AcceptVerbs(
                    verbs.iter().map(LitStr::value).collect(),
                ))
            }
            _ => None,
        }
    }

    pub fn verbs(&self) -> Vec<String> {
        match self {
            VerbMarker::Get => vec!["GET".to_string()],
            VerbMarker::Post => vec!["POST".to_string()],
            VerbMarker::Put => vec!["PUT".to_string()],
            VerbMarker::Delete => vec!["DELETE".to_string()],
            VerbMarker::AcceptVerbs(verbs) => verbs.clone(),
        }
    }
}

/// A method of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMetadata {
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub markers: Vec<VerbMarker>,
}

impl ActionMetadata {
    /// Whether this method serves the route action `action`, either verbatim or through its
    /// snake_case form (`GetOrder` is served by `get_order`).
    pub fn answers_to(&self, action: &str) -> bool {
        self.name == action || self.name == to_snake_case(action)
    }
}

/// A controller type and its actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerMetadata {
    pub name: String,
    pub actions: Vec<ActionMetadata>,
}

/// Identity of a handler: controller type name plus method name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId {
    pub controller: String,
    pub action: String,
}

impl HandlerId {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

/// Lookup of controllers and their actions by name.
pub trait ControllerRegistry {
    fn resolve_controller(&self, name: &str) -> Option<&ControllerMetadata>;

    /// Finds the single method of `controller` answering to `action`.
    ///
    /// Several candidates (e.g. from separate impl blocks) are reported as
    /// [`ResolveError::AmbiguousAction`] rather than picking one.
    fn resolve_action<'c>(
        &self,
        controller: &'c ControllerMetadata,
        action: &str,
    ) -> Result<&'c ActionMetadata, ResolveError> {
        let candidates: Vec<&ActionMetadata> = controller
            .actions
            .iter()
            .filter(|a| a.answers_to(action))
            .collect();

        match candidates.as_slice() {
            [] => Err(ResolveError::MethodNotResolved {
                controller: controller.name.clone(),
                action: action.to_string(),
            }),
            [single] => Ok(*single),
            _ => Err(ResolveError::AmbiguousAction {
                controller: controller.name.clone(),
                action: action.to_string(),
                candidates: candidates.len(),
            }),
        }
    }
}

/// Registry built from parsed source files.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    controllers: BTreeMap<String, ControllerMetadata>,
    comments: HashMap<HandlerId, DocComment>,
}

impl SourceRegistry {
    pub fn from_sources(parsed_files: &[ParsedFile]) -> Self {
        let mut visitor = ControllerVisitor::default();
        for parsed_file in parsed_files {
            visitor.visit_file(&parsed_file.syntax_tree);
        }

        debug!(
            "Registry: {} controllers, {} documented actions",
            visitor.registry.controllers.len(),
            visitor.registry.comments.len()
        );

        visitor.registry
    }

    pub fn controllers(&self) -> impl Iterator<Item = &ControllerMetadata> {
        self.controllers.values()
    }

    fn add_action(&mut self, controller: &str, action: ActionMetadata, comment: Option<DocComment>) {
        if let Some(comment) = comment {
            self.comments
                .insert(HandlerId::new(controller, &action.name), comment);
        }

        self.controllers
            .entry(controller.to_string())
            .or_insert_with(|| ControllerMetadata {
                name: controller.to_string(),
                actions: Vec::new(),
            })
            .actions
            .push(action);
    }
}

impl ControllerRegistry for SourceRegistry {
    fn resolve_controller(&self, name: &str) -> Option<&ControllerMetadata> {
        self.controllers.get(name)
    }
}

impl DocumentationSource for SourceRegistry {
    fn comment_for(&self, handler: &HandlerId) -> Option<&DocComment> {
        self.comments.get(handler)
    }
}

#[derive(Default)]
struct ControllerVisitor {
    registry: SourceRegistry,
}

impl<'ast> Visit<'ast> for ControllerVisitor {
    fn visit_item_impl(&mut self, node: &'ast syn::ItemImpl) {
        if node.trait_.is_none() {
            if let Some(controller) = controller_name(&node.self_ty) {
                for item in &node.items {
                    if let syn::ImplItem::Fn(method) = item {
                        let action = action_metadata(&method.sig, &method.attrs);
                        let comment = DocComment::from_attributes(&method.attrs);
                        self.registry.add_action(&controller, action, comment);
                    }
                }
            }
        }

        syn::visit::visit_item_impl(self, node);
    }
}

fn controller_name(ty: &syn::Type) -> Option<String> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let name = type_path.path.segments.last()?.ident.to_string();
    name.ends_with(CONTROLLER_SUFFIX).then_some(name)
}

fn action_metadata(sig: &syn::Signature, attrs: &[Attribute]) -> ActionMetadata {
    let parameters = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => Some(&*pat_type.pat),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(position, pat)| ParameterDescriptor {
            name: parameter_name(pat, position),
            position,
        })
        .collect();

    ActionMetadata {
        name: sig.ident.unraw().to_string(),
        parameters,
        markers: attrs.iter().filter_map(VerbMarker::from_attribute).collect(),
    }
}

/// `id: u32` is `id`, `Path(id): Path<u32>` is `id`, anything else is `arg<position>`.
fn parameter_name(pat: &Pat, position: usize) -> String {
    match pat {
        Pat::Ident(pat_ident) => pat_ident.ident.unraw().to_string(),
        Pat::TupleStruct(tuple) if tuple.elems.len() == 1 => match &tuple.elems[0] {
            Pat::Ident(pat_ident) => pat_ident.ident.unraw().to_string(),
            _ => format!("arg{}", position),
        },
        _ => format!("arg{}", position),
    }
}

/// `GetOrder` -> `get_order`, `GetHTTPStatus` -> `get_http_status`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                Some(_) => false,
            };
            if starts_word {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
