//! Turns a match sequence into the entries shown in the results panel.
//!
//! Rendering keeps the scanner's order, truncates to a fixed number of entries and highlights the
//! query inside each entry's text. The output replaces whatever the panel held before.

use crate::document::NodeId;
use crate::highlight::{escape_html, fragments, fragments_to_html, Fragment, Highlighter};
use crate::scanner::{Match, SectionLabel};
use std::ops::Range;

/// Message rendered when a scan finds nothing.
pub const NO_RESULTS: &str = "No results found";

/// Number of entries rendered unless configured otherwise.
pub const DEFAULT_LIMIT: usize = 10;

/// One rendered search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// Element the result points at.
    pub element: NodeId,
    /// Section heading shown above the text.
    pub section: SectionLabel,
    /// Full text content of the element.
    pub text: String,
    /// Byte ranges of `text` to highlight.
    pub marks: Vec<Range<usize>>,
}

impl ResultEntry {
    #[must_use]
    /// The entry's text split into plain and highlighted runs.
    pub fn fragments(&self) -> Vec<Fragment<'_>> {
        fragments(&self.text, &self.marks)
    }

    #[must_use]
    /// The entry's text as HTML with `<mark>` around each occurrence.
    pub fn highlighted_html(&self) -> String {
        fragments_to_html(&self.fragments())
    }

    #[must_use]
    /// The entry as a `search-result` block.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="search-result"><h4>{}</h4><p>{}</p></div>"#,
            escape_html(self.section.as_str()),
            self.highlighted_html()
        )
    }
}

/// Contents of the results panel after a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The scan matched nothing.
    NoResults,
    /// The first entries of a non-empty match sequence.
    Entries {
        /// Rendered entries, in match order.
        entries: Vec<ResultEntry>,
        /// Length of the full match sequence before truncation.
        total: usize,
    },
}

impl Rendered {
    #[must_use]
    /// Rendered entries; empty for [`Rendered::NoResults`].
    pub fn entries(&self) -> &[ResultEntry] {
        match self {
            Self::NoResults => &[],
            Self::Entries { entries, .. } => entries,
        }
    }

    #[must_use]
    /// Number of matches found, including those not rendered.
    pub fn total(&self) -> usize {
        match self {
            Self::NoResults => 0,
            Self::Entries { total, .. } => *total,
        }
    }

    #[must_use]
    /// Panel markup.
    pub fn to_html(&self) -> String {
        match self {
            Self::NoResults => format!("<p>{NO_RESULTS}</p>"),
            Self::Entries { entries, .. } => entries
                .iter()
                .map(ResultEntry::to_html)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    #[must_use]
    /// Panel text with markup removed, one entry per line.
    pub fn plain_text(&self) -> String {
        match self {
            Self::NoResults => NO_RESULTS.to_string(),
            Self::Entries { entries, .. } => entries
                .iter()
                .map(|entry| format!("{}: {}", entry.section, entry.text))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Renders the first `limit` matches, highlighting `query` in each.
#[must_use]
pub fn render(matches: &[Match], query: &str, limit: usize) -> Rendered {
    if matches.is_empty() {
        return Rendered::NoResults;
    }

    let highlighter = Highlighter::new(query);
    let entries = matches
        .iter()
        .take(limit)
        .map(|m| ResultEntry {
            element: m.element,
            section: m.section.clone(),
            text: m.text.clone(),
            marks: highlighter.marks(&m.text),
        })
        .collect();

    Rendered::Entries {
        entries,
        total: matches.len(),
    }
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
