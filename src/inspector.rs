//! Walks the route table and assembles one [`Endpoint`] per route.

use crate::documentation::{Documentation, DocumentationResolver, DocumentationSource};
use crate::error::ResolveError;
use crate::registry::{
    ActionMetadata, ControllerRegistry, ParameterDescriptor, CONTROLLER_SUFFIX,
};
use crate::route_table::{Route, RouteTable};
use log::{debug, warn};

const CONTROLLER_KEY: &str = "controller";
const ACTION_KEY: &str = "action";

/// The handler a route points at, derived from its defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionHandle {
    /// Conventional controller type name, `<controller default>Controller`
    pub controller: String,
    /// The route's action default, as written
    pub action: String,
}

impl ActionHandle {
    /// Reads the controller and action defaults of a route.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoAction`] if the action default is missing or empty.
    pub fn from_route(route: &Route) -> Result<Self, ResolveError> {
        let action = route
            .default_value(ACTION_KEY)
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| ResolveError::NoAction {
                url: route.url.clone(),
            })?;

        let controller = route
            .default_value(CONTROLLER_KEY)
            .map(|c| format!("{}{}", c, CONTROLLER_SUFFIX))
            .unwrap_or_default();

        Ok(Self {
            controller,
            action: action.to_string(),
        })
    }
}

/// A route joined with its handler's verbs, parameters and documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub verbs: Vec<String>,
    pub parameters: Vec<ParameterDescriptor>,
    pub documentation: Documentation,
}

impl Endpoint {
    /// Verbs as rendered: `GET, POST`.
    pub fn methods(&self) -> String {
        self.verbs.join(", ")
    }

    pub fn parameter_names(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// HTTP verbs of a route.
///
/// An allowed-HTTP-methods constraint wins and keeps its declared order. Otherwise the
/// action's verb markers are used. No source at all yields an empty list.
pub fn resolve_verbs(route: &Route, action: Option<&ActionMetadata>) -> Vec<String> {
    if let Some(verbs) = route.allowed_methods() {
        if !verbs.is_empty() {
            return verbs.to_vec();
        }
    }

    action
        .map(|a| a.markers.iter().flat_map(|m| m.verbs()).collect())
        .unwrap_or_default()
}

/// Resolves routes against a registry.
pub struct RouteInspector<'a, R: ?Sized> {
    registry: &'a R,
}

impl<'a, R> RouteInspector<'a, R>
where
    R: ControllerRegistry + DocumentationSource + ?Sized,
{
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    /// Finds the action serving `route`.
    pub fn resolve_handler(
        &self,
        route: &Route,
    ) -> Result<(ActionHandle, &'a ActionMetadata), ResolveError> {
        let handle = ActionHandle::from_route(route)?;

        let controller = self
            .registry
            .resolve_controller(&handle.controller)
            .ok_or_else(|| ResolveError::ControllerNotFound {
                controller: handle.controller.clone(),
            })?;

        let action = self.registry.resolve_action(controller, &handle.action)?;
        Ok((handle, action))
    }

    /// Assembles the endpoint of one route.
    ///
    /// Resolution failures are logged and leave the endpoint without parameters or
    /// documentation; the verbs of a method constraint are kept regardless.
    pub fn inspect(&self, route: &Route) -> Endpoint {
        let resolved = match self.resolve_handler(route) {
            Ok(resolved) => Some(resolved),
            Err(e @ ResolveError::NoAction { .. }) => {
                debug!("{}", e);
                None
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        let verbs = resolve_verbs(route, resolved.as_ref().map(|(_, action)| *action));

        let (parameters, documentation) = match &resolved {
            Some((handle, action)) => (
                action.parameters.clone(),
                DocumentationResolver::new(self.registry).resolve(handle, action),
            ),
            None => (Vec::new(), Documentation::default()),
        };

        Endpoint {
            url: route.url.clone(),
            verbs,
            parameters,
            documentation,
        }
    }

    pub fn inspect_all(&self, table: &RouteTable) -> Vec<Endpoint> {
        let endpoints: Vec<Endpoint> = table.routes.iter().map(|r| self.inspect(r)).collect();
        debug!(
            "Inspected {} routes, {} documented",
            endpoints.len(),
            endpoints
                .iter()
                .filter(|e| e.documentation.is_documented())
                .count()
        );
        endpoints
    }
}
