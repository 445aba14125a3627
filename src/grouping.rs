use crate::formatter::split_upper_case_to_string;
use crate::inspector::Endpoint;
use crate::registry::CONTROLLER_SUFFIX;
use std::collections::BTreeMap;

/// Endpoints of one controller.
#[derive(Debug)]
pub struct EndpointGroup<'a> {
    /// Controller name without the `Controller` suffix
    pub key: String,
    /// Display title, e.g. `Order lines`
    pub title: String,
    pub endpoints: Vec<&'a Endpoint>,
}

/// Groups endpoints by controller.
///
/// Groups are ordered by key and endpoints by action name. Endpoints with a blank
/// controller name are dropped.
pub fn group_endpoints(endpoints: &[Endpoint]) -> Vec<EndpointGroup<'_>> {
    let mut groups: BTreeMap<String, Vec<&Endpoint>> = BTreeMap::new();

    for endpoint in endpoints {
        let controller = &endpoint.documentation.controller_name;
        let key = controller
            .strip_suffix(CONTROLLER_SUFFIX)
            .unwrap_or(controller);
        if key.trim().is_empty() {
            continue;
        }
        groups.entry(key.to_string()).or_default().push(endpoint);
    }

    groups
        .into_iter()
        .map(|(key, mut endpoints)| {
            // stable, so routes sharing an action keep table order
            endpoints.sort_by(|a, b| a.documentation.name.cmp(&b.documentation.name));
            EndpointGroup {
                title: split_upper_case_to_string(Some(&key)),
                key,
                endpoints,
            }
        })
        .collect()
}
