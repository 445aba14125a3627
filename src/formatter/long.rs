use super::{split_upper_case_to_string, wiki_escape, EndpointFormatter};
use crate::inspector::Endpoint;

/// Full documentation page: a heading and a table per endpoint.
pub struct WikiLongFormatter;

impl EndpointFormatter for WikiLongFormatter {
    fn output_header(&self, out: &mut String) {
        out.push_str("{toc}\n\nh1. Endpoints\n");
    }

    fn output_group(&self, group_name: &str, out: &mut String) {
        if group_name.trim().is_empty() {
            return;
        }
        out.push_str(&format!("\n\nh2. {}\n\n", group_name));
    }

    fn output_endpoint(&self, endpoint: &Endpoint, out: &mut String) {
        let doc = &endpoint.documentation;

        out.push_str(&format!(
            "\n\nh3. {}\n\n| URL | {} |\n| HTTP Methods | {} |\n| Summary | {} |\n",
            split_upper_case_to_string(Some(&doc.name)),
            wiki_escape(&endpoint.url),
            endpoint.methods(),
            doc.summary.as_deref().unwrap_or_default()
        ));

        if let Some(returns) = &doc.returns {
            out.push_str(&format!("| Returns | {} |\n", returns));
        }
        if let Some(example) = &doc.example {
            out.push_str(&format!("| Example | {} |\n", example));
        }
        if let Some(remarks) = &doc.remarks {
            out.push_str(&format!("\nRemarks: {}\n\n", wiki_escape(remarks)));
        }

        if !doc.params.is_empty() {
            out.push_str("\n|| Parameter || Description ||\n");
            for (name, description) in &doc.params {
                out.push_str(&format!("| {} | {} |\n", name, description));
            }
        } else if !endpoint.parameters.is_empty() {
            out.push_str("\n|| Parameter || Description ||\n");
            for parameter in &endpoint.parameters {
                out.push_str(&format!(
                    "| {} | {} |\n",
                    parameter.name,
                    doc.parameter_description(&parameter.name)
                ));
            }
        }
    }
}
