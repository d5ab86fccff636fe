//! docsift: in-page search and highlighting for static documentation sites.
//!
//! Pages are parsed with tree-sitter into immutable [`document::Document`] snapshots. The
//! [`search::SearchBox`] widget debounces query input, scans the snapshot's text-bearing elements
//! for the query, attributes each match to its section and renders the first results with every
//! occurrence highlighted.

pub mod app_state;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod formats;
pub mod highlight;
pub mod input;
pub mod render;
pub mod report;
pub mod scanner;
pub mod search;
pub mod ui;
