//! Errors raised while turning files on disk into document snapshots.
//!
//! Searching a loaded document never fails; only loading does.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while discovering, reading or parsing pages.
#[derive(Error, Debug)]
pub enum Error {
    /// The page could not be read from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The tree-sitter grammar is incompatible with the linked runtime.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The format's title query does not compile against its grammar.
    #[error("invalid title query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// Result alias for page loading.
pub type Result<T> = std::result::Result<T, Error>;
