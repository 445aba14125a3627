use std::path::PathBuf;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for loading the target library
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    ParseError { file: PathBuf, message: String },
    EntryPointNotFound(String),
    ManifestError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::ParseError { file, message } => {
                write!(f, "Parse error in {}: {}", file.display(), message)
            }
            Error::EntryPointNotFound(name) => {
                write!(f, "Route registration entry point `{}` not found", name)
            }
            Error::ManifestError(msg) => write!(f, "Invalid route manifest: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ManifestError(format!("JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::ManifestError(format!("YAML: {}", err))
    }
}

/// Why a route could not be tied to a documented action.
///
/// These never abort a run: the inspector logs them and downgrades the
/// route to empty parameters and documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The route has no `action` default, or it is empty
    NoAction { url: String },
    /// No `<Name>Controller` type exists in the target
    ControllerNotFound { controller: String },
    /// The controller has no method answering to the action name
    MethodNotResolved { controller: String, action: String },
    /// More than one method answers to the action name
    AmbiguousAction {
        controller: String,
        action: String,
        candidates: usize,
    },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ResolveError::NoAction { url } => write!(f, "Route `{}` has no action", url),
            ResolveError::ControllerNotFound { controller } => write!(
                f,
                "Controller not found even though it is marked as a controller for an action: {}",
                controller
            ),
            ResolveError::MethodNotResolved { controller, action } => {
                write!(f, "Unable to resolve action {}::{}", controller, action)
            }
            ResolveError::AmbiguousAction {
                controller,
                action,
                candidates,
            } => write!(
                f,
                "Action {}::{} is ambiguous ({} candidate methods)",
                controller, action, candidates
            ),
        }
    }
}

impl std::error::Error for ResolveError {}
