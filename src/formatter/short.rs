use super::{wiki_escape, EndpointFormatter};
use crate::inspector::Endpoint;

/// One table, one row per endpoint. Groups are not shown.
pub struct WikiShortFormatter;

impl EndpointFormatter for WikiShortFormatter {
    fn output_header(&self, out: &mut String) {
        out.push_str("|| URL || HTTP Methods || Parameters || Summary || Example ||\n");
    }

    fn output_group(&self, _group_name: &str, _out: &mut String) {}

    fn output_endpoint(&self, endpoint: &Endpoint, out: &mut String) {
        let doc = &endpoint.documentation;
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            wiki_escape(&endpoint.url),
            endpoint.methods(),
            endpoint.parameter_names(),
            doc.summary.as_deref().unwrap_or_default(),
            doc.example.as_deref().unwrap_or_default()
        ));
    }
}
