//! Wiki renderers for assembled endpoints.
//!
//! Two variants implement [`EndpointFormatter`]:
//!
//! - **Long**: a page with a table of contents, one `h2.` heading per controller and a
//!   small table per endpoint. See [`long::WikiLongFormatter`]
//! - **Short**: a single table with one row per endpoint. See [`short::WikiShortFormatter`]
//!
//! # Example
//!
//! ```no_run
//! use mvc_routes::formatter::{render, long::WikiLongFormatter};
//! # let endpoints = Vec::new();
//!
//! let page = render(&endpoints, &WikiLongFormatter);
//! println!("{}", page);
//! ```

pub mod long;
pub mod short;

use crate::grouping::group_endpoints;
use crate::inspector::Endpoint;

/// A wiki output style.
pub trait EndpointFormatter {
    fn output_header(&self, out: &mut String);

    fn output_group(&self, group_name: &str, out: &mut String);

    fn output_endpoint(&self, endpoint: &Endpoint, out: &mut String);
}

/// Renders the header, then every controller group with its documented endpoints.
pub fn render(endpoints: &[Endpoint], formatter: &dyn EndpointFormatter) -> String {
    let mut out = String::new();
    formatter.output_header(&mut out);

    for group in group_endpoints(endpoints) {
        formatter.output_group(&group.title, &mut out);
        for endpoint in group
            .endpoints
            .into_iter()
            .filter(|e| e.documentation.is_documented())
        {
            formatter.output_endpoint(endpoint, &mut out);
        }
    }

    out
}

/// Escapes the curly braces wiki markup would read as macros.
pub fn wiki_escape(text: &str) -> String {
    text.replace('{', "\\{").replace('}', "\\}")
}

/// Splits an identifier at its upper-case letters.
///
/// A letter only opens a new word when the character scanned before it is not whitespace.
/// The first character is never tested, and the second is compared against no character
/// at all, so `"ABTest"` splits into `["A", "B", "Test"]`.
///
/// `None` gives no words; `""` gives one empty word.
pub fn split_upper_case(source: Option<&str>) -> Vec<String> {
    let Some(source) = source else {
        return Vec::new();
    };
    if source.is_empty() {
        return vec![String::new()];
    }

    let letters: Vec<char> = source.chars().collect();
    let mut words = Vec::new();
    let mut word_start = 0;
    let mut previous = '\0';

    for (i, &letter) in letters.iter().enumerate().skip(1) {
        if letter.is_uppercase() && !previous.is_whitespace() {
            words.push(letters[word_start..i].iter().collect());
            word_start = i;
        }
        previous = letter;
    }

    words.push(letters[word_start..].iter().collect());
    words
}

/// `GetUserOrders` -> `Get user orders`.
pub fn split_upper_case_to_string(source: Option<&str>) -> String {
    let words = split_upper_case(source);
    match words.split_first() {
        None => String::new(),
        Some((first, [])) => first.clone(),
        Some((first, rest)) => {
            let rest: Vec<String> = rest.iter().map(|w| w.to_lowercase()).collect();
            format!("{} {}", first, rest.join(" "))
        }
    }
}
