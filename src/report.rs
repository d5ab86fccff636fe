//! Serialisable record of one page's search results.
//!
//! The one-shot command line mode prints these as JSON so that other tools can consume what the
//! results panel would have shown.

use crate::input::Page;
use crate::render::Rendered;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Results of searching one page.
pub struct SearchReport {
    /// Page the results came from.
    pub page: String,
    /// Query as typed.
    pub query: String,
    /// Number of matches, including those beyond the render limit.
    pub total_matches: usize,
    /// Rendered entries in match order.
    pub results: Vec<ReportEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// One rendered result.
pub struct ReportEntry {
    /// Section heading shown for the result.
    pub section: String,
    /// Tag of the matching element.
    pub element: String,
    /// `id` of the matching element, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    /// Full text of the element.
    pub text: String,
    /// Text as HTML with the query wrapped in `<mark>`.
    pub highlighted: String,
}

impl SearchReport {
    #[must_use]
    /// Captures `rendered` as produced for `query` on `page`.
    pub fn new(page: &Page, query: &str, rendered: &Rendered) -> Self {
        let results = rendered
            .entries()
            .iter()
            .map(|entry| {
                let node = page.document.get(entry.element);
                ReportEntry {
                    section: entry.section.to_string(),
                    element: node.map(|n| n.tag().to_string()).unwrap_or_default(),
                    element_id: node.and_then(|n| n.id()).map(ToOwned::to_owned),
                    text: entry.text.clone(),
                    highlighted: entry.highlighted_html(),
                }
            })
            .collect();

        Self {
            page: page.path.display().to_string(),
            query: query.to_string(),
            total_matches: rendered.total(),
            results,
        }
    }
}

#[cfg(test)]
#[path = "tests/report.rs"]
mod tests;
