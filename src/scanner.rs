//! Linear substring scan over a document's text-bearing elements.
//!
//! Every candidate element is tested in document order; nothing is indexed, ranked or cached.
//! Each match is attributed to the section container that encloses it, using the page
//! template's markup conventions.

use crate::document::{Document, Node, NodeId};
use crate::highlight::Highlighter;
use std::fmt;

/// Label shown for matches with no titled section container.
pub const UNKNOWN_SECTION: &str = "Unknown Section";

/// Markup conventions owned by the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    /// Tags of the elements whose text is searched.
    pub candidate_tags: Vec<String>,
    /// Class marking section containers.
    pub section_class: String,
    /// Tag of the heading that titles a section container.
    pub section_title_tag: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            candidate_tags: ["h2", "h3", "h4", "p", "li"].map(String::from).to_vec(),
            section_class: "section".to_string(),
            section_title_tag: "h2".to_string(),
        }
    }
}

impl Markup {
    fn is_section(&self, node: &Node) -> bool {
        node.has_class(&self.section_class)
    }
}

/// Where a match sits in the page's section structure.
///
/// Both `Untitled` and `Unattributed` display as [`UNKNOWN_SECTION`]; they stay separate so
/// callers can tell a heading-less container apart from no container at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionLabel {
    /// Inside a section container whose title heading has text.
    Titled(String),
    /// Inside a section container without a title heading, or with an empty one.
    Untitled,
    /// No enclosing section container.
    Unattributed,
}

impl SectionLabel {
    #[must_use]
    /// Text shown for this label.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Titled(title) => title,
            Self::Untitled | Self::Unattributed => UNKNOWN_SECTION,
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate element whose text contains the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matching element.
    pub element: NodeId,
    /// Full text content of the element, as written.
    pub text: String,
    /// Section the element belongs to.
    pub section: SectionLabel,
}

/// Finds every candidate element whose text contains `query`, ignoring case.
///
/// The query is compared literally. Matches are returned in document order and uncapped; an
/// empty query matches nothing.
#[must_use]
pub fn scan(document: &Document, query: &str, markup: &Markup) -> Vec<Match> {
    if query.is_empty() {
        return Vec::new();
    }
    // Same matcher as the renderer, so every match gets at least one mark.
    let highlighter = Highlighter::new(query);

    let matches: Vec<Match> = document
        .elements_with_tags(markup.candidate_tags.as_slice())
        .filter_map(|element| {
            let text = document.node(element).text_content();
            highlighter.is_match(text).then(|| Match {
                element,
                text: text.to_string(),
                section: section_label(document, element, markup),
            })
        })
        .collect();

    tracing::debug!(query, matches = matches.len(), "scanned document");
    matches
}

/// Labels the section container nearest to `element`.
#[must_use]
pub fn section_label(document: &Document, element: NodeId, markup: &Markup) -> SectionLabel {
    match document.nearest_ancestor(element, |node| markup.is_section(node)) {
        Some(container) => container_label(document, container, markup),
        None => SectionLabel::Unattributed,
    }
}

fn container_label(document: &Document, container: NodeId, markup: &Markup) -> SectionLabel {
    document
        .first_descendant(container, |node| node.tag() == markup.section_title_tag)
        .map(|heading| document.node(heading).text_content())
        .filter(|title| !title.is_empty())
        .map_or(SectionLabel::Untitled, |title| {
            SectionLabel::Titled(title.to_string())
        })
}

/// Labels of every section container enclosing `element`, outermost first.
#[must_use]
pub fn section_trail(document: &Document, element: NodeId, markup: &Markup) -> Vec<SectionLabel> {
    let mut trail: Vec<SectionLabel> = document
        .ancestors(element)
        .filter(|&ancestor| markup.is_section(document.node(ancestor)))
        .map(|container| container_label(document, container, markup))
        .collect();
    trail.reverse();
    trail
}

#[cfg(test)]
#[path = "tests/scanner.rs"]
mod tests;
