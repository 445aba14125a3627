//! Action documentation, read from rustdoc comments.
//!
//! An action's `///` comment is split into sections by its Markdown headings:
//!
//! ```text
//! /// Gets a single order.            <- summary (everything before the first heading)
//! ///
//! /// # Arguments
//! ///
//! /// * `id` - The order number       <- parameter entries
//! ///
//! /// # Returns                       <- also: # Example(s), # Remarks / # Notes
//! ///
//! /// The order, or 404.
//! ```
//!
//! Unknown headings close the current section and their text is dropped.

use crate::inspector::ActionHandle;
use crate::registry::{ActionMetadata, HandlerId};
use log::debug;
use std::collections::BTreeMap;
use syn::{Attribute, Expr, Lit, Meta};

/// Sections of a parsed doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub summary: Option<String>,
    pub example: Option<String>,
    pub remarks: Option<String>,
    pub returns: Option<String>,
    /// Parameter name -> description, as written in the comment
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Example,
    Remarks,
    Returns,
    Arguments,
    Ignored,
}

impl Section {
    fn from_heading(heading: &str) -> Self {
        match heading.trim().to_lowercase().as_str() {
            "example" | "examples" => Section::Example,
            "remarks" | "remark" | "notes" => Section::Remarks,
            "returns" | "return" => Section::Returns,
            "arguments" | "parameters" | "params" => Section::Arguments,
            _ => Section::Ignored,
        }
    }
}

impl DocComment {
    /// Reads the doc comment from an item's attributes.
    ///
    /// Returns `None` if the item carries no `#[doc]` attributes at all.
    pub fn from_attributes(attrs: &[Attribute]) -> Option<Self> {
        let lines: Vec<String> = attrs
            .iter()
            .filter(|attr| attr.path().is_ident("doc"))
            .filter_map(|attr| match &attr.meta {
                Meta::NameValue(nv) => match &nv.value {
                    Expr::Lit(expr_lit) => match &expr_lit.lit {
                        Lit::Str(lit_str) => Some(lit_str.value()),
                        _ => None,
                    },
                    _ => None,
                },
                _ => None,
            })
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(Self::parse(&lines))
        }
    }

    /// Parses raw doc lines (one entry per `///` line, or whole `/** */` blocks).
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut section = Section::Summary;
        let mut in_fence = false;

        let mut summary = Vec::new();
        let mut example = Vec::new();
        let mut remarks = Vec::new();
        let mut returns = Vec::new();
        let mut params: Vec<(String, String)> = Vec::new();

        for line in lines.iter().flat_map(|l| l.as_ref().lines()) {
            let line = line.strip_prefix(' ').unwrap_or(line);
            let trimmed = line.trim();

            if trimmed.starts_with("```") {
                in_fence = !in_fence;
                continue;
            }

            if in_fence {
                // rustdoc hides `# ` lines inside code blocks
                if trimmed == "#" || trimmed.starts_with("# ") {
                    continue;
                }
            } else if let Some(heading) = heading_text(trimmed) {
                // unfenced `# ...` is always a heading, even inside an example
                section = Section::from_heading(heading);
                continue;
            }

            match section {
                Section::Summary => summary.push(line),
                Section::Example => example.push(line),
                Section::Remarks => remarks.push(line),
                Section::Returns => returns.push(line),
                Section::Arguments => {
                    if let Some(entry) = parameter_entry(trimmed) {
                        params.push(entry);
                    } else if !trimmed.is_empty() {
                        if let Some((_, description)) = params.last_mut() {
                            if !description.is_empty() {
                                description.push(' ');
                            }
                            description.push_str(trimmed);
                        }
                    }
                }
                Section::Ignored => {}
            }
        }

        let mut param_map = BTreeMap::new();
        for (name, description) in params {
            if param_map.contains_key(&name) {
                debug!("Duplicate documentation for parameter `{}` ignored", name);
                continue;
            }
            param_map.insert(name, description);
        }

        Self {
            summary: prose(&summary),
            // table cell, so a fenced example collapses onto one line
            example: prose(&example),
            remarks: block(&remarks),
            returns: prose(&returns),
            params: param_map,
        }
    }
}

fn heading_text(trimmed: &str) -> Option<&str> {
    let rest = trimmed.trim_start_matches('#');
    if rest.len() < trimmed.len() && rest.starts_with(' ') {
        Some(rest.trim())
    } else {
        None
    }
}

/// ``* `name` - description``, `- name: description`, ...
fn parameter_entry(trimmed: &str) -> Option<(String, String)> {
    let item = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))?
        .trim_start();

    let (name, rest) = if let Some(quoted) = item.strip_prefix('`') {
        let end = quoted.find('`')?;
        (&quoted[..end], &quoted[end + 1..])
    } else {
        let end = item
            .find(|c: char| c.is_whitespace() || c == ':')
            .unwrap_or(item.len());
        (&item[..end], &item[end..])
    };

    if name.is_empty() {
        return None;
    }

    let description = rest
        .trim_start()
        .trim_start_matches(|c: char| c == '-' || c == ':')
        .trim();

    Some((name.to_string(), description.to_string()))
}

/// Collapses text into a single line, for table cells.
fn prose(lines: &[&str]) -> Option<String> {
    non_blank(lines.iter().flat_map(|l| l.split_whitespace()).collect::<Vec<_>>().join(" "))
}

/// Keeps line structure, trimming the block as a whole.
fn block(lines: &[&str]) -> Option<String> {
    non_blank(lines.join("\n"))
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Where parsed doc comments come from, keyed by handler identity.
pub trait DocumentationSource {
    fn comment_for(&self, handler: &HandlerId) -> Option<&DocComment>;
}

/// Documentation of the action behind an endpoint.
///
/// An empty `name` means the route did not resolve to a documented action; such endpoints
/// are never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    pub name: String,
    pub controller_name: String,
    pub summary: Option<String>,
    pub example: Option<String>,
    pub remarks: Option<String>,
    pub returns: Option<String>,
    pub params: BTreeMap<String, String>,
}

impl Documentation {
    pub fn is_documented(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// The description of a formal parameter, or `""` if the comment has none.
    pub fn parameter_description(&self, parameter: &str) -> &str {
        self.params.get(parameter).map(String::as_str).unwrap_or("")
    }
}

/// Builds [`Documentation`] records for resolved actions.
pub struct DocumentationResolver<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: DocumentationSource + ?Sized> DocumentationResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Looks up the action's comment; an undocumented action gets an empty record.
    pub fn resolve(&self, handle: &ActionHandle, action: &ActionMetadata) -> Documentation {
        let id = HandlerId::new(&handle.controller, &action.name);
        let Some(comment) = self.source.comment_for(&id) else {
            debug!("No documentation for {}::{}", id.controller, id.action);
            return Documentation::default();
        };

        for name in comment.params.keys() {
            if !action.parameters.iter().any(|p| &p.name == name) {
                debug!(
                    "{}::{} documents `{}`, which is not a parameter",
                    id.controller, id.action, name
                );
            }
        }

        Documentation {
            name: handle.action.clone(),
            controller_name: handle.controller.clone(),
            summary: comment.summary.clone(),
            example: comment.example.clone(),
            remarks: comment.remarks.clone(),
            returns: comment.returns.clone(),
            params: comment.params.clone(),
        }
    }
}
