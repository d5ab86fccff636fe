//! Marks every occurrence of a query inside a piece of text.
//!
//! The query is escaped with [`regex::escape`] before it becomes a pattern, so a query such as
//! `.*` or `(a|b)` highlights exactly its literal occurrences. Matching ignores case and finds
//! every non-overlapping occurrence, leftmost first.

use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::ops::Range;

/// Opening marker wrapped around highlighted text in HTML output.
pub const MARK_OPEN: &str = "<mark>";
/// Closing marker wrapped around highlighted text in HTML output.
pub const MARK_CLOSE: &str = "</mark>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A run of text that is either plain or highlighted.
pub enum Fragment<'a> {
    /// Text outside any occurrence.
    Plain(&'a str),
    /// One occurrence of the query, with its original case.
    Marked(&'a str),
}

impl<'a> Fragment<'a> {
    #[must_use]
    /// The fragment's text.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Self::Plain(text) | Self::Marked(text) => text,
        }
    }
}

#[derive(Debug, Clone)]
/// Case-insensitive literal matcher for one query.
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    #[must_use]
    /// Builds a highlighter for `query`. An empty query highlights nothing.
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Self { pattern: None };
        }

        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map_err(|err| tracing::warn!(%err, "query too large to highlight"))
            .ok();

        Self { pattern }
    }

    #[must_use]
    /// Whether `text` contains at least one occurrence of the query.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }

    #[must_use]
    /// Byte ranges of every occurrence of the query in `text`.
    pub fn marks(&self, text: &str) -> Vec<Range<usize>> {
        self.pattern
            .as_ref()
            .map(|pattern| pattern.find_iter(text).map(|m| m.range()).collect())
            .unwrap_or_default()
    }
}

/// Splits `text` at `marks`, which must be sorted, disjoint and on char boundaries.
#[must_use]
pub fn fragments<'t>(text: &'t str, marks: &[Range<usize>]) -> Vec<Fragment<'t>> {
    let mut out = Vec::with_capacity(marks.len() * 2 + 1);
    let mut pos = 0;
    for mark in marks {
        if mark.start > pos {
            out.push(Fragment::Plain(&text[pos..mark.start]));
        }
        out.push(Fragment::Marked(&text[mark.clone()]));
        pos = mark.end;
    }
    if pos < text.len() {
        out.push(Fragment::Plain(&text[pos..]));
    }
    out
}

/// Escapes the characters that would otherwise be read as markup.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Renders fragments as HTML, wrapping highlighted runs in `<mark>`.
#[must_use]
pub fn fragments_to_html(fragments: &[Fragment<'_>]) -> String {
    let mut html = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Plain(text) => html.push_str(&escape_html(text)),
            Fragment::Marked(text) => {
                html.push_str(MARK_OPEN);
                html.push_str(&escape_html(text));
                html.push_str(MARK_CLOSE);
            }
        }
    }
    html
}

/// Highlights every case-insensitive occurrence of `query` in `text` as HTML.
#[must_use]
pub fn highlight_query(text: &str, query: &str) -> String {
    let marks = Highlighter::new(query).marks(text);
    fragments_to_html(&fragments(text, &marks))
}

#[cfg(test)]
#[path = "tests/highlight.rs"]
mod tests;
