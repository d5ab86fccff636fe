//! Format trait and implementations for different page types.
//!
//! This module defines the `Format` trait which abstracts over page formats by providing the
//! tree-sitter grammar, a query locating the page title, and the walk that turns a syntax tree
//! into a [`Document`](crate::document::Document) snapshot.

pub mod html;

use crate::document::Document;

/// Grammar and tree conversion for one kind of page.
pub trait Format {
    /// File suffix this format is normally stored under.
    fn file_extension(&self) -> &str;

    /// Grammar used to parse pages of this format.
    fn language(&self) -> tree_sitter::Language;

    /// Query whose `@title` capture is the element holding the page title.
    fn title_query(&self) -> &str;

    /// Converts a parsed syntax tree into an element snapshot.
    fn build_document(&self, tree: &tree_sitter::Tree, source: &str) -> Document;
}
