//! Discovers pages on disk and loads them into document snapshots.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::formats::html::decode_entities;
use crate::formats::Format;
use std::path::{Path, PathBuf};
use std::{fs, io};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};
use walkdir::WalkDir;

/// A loaded page: where it came from, its title and its element tree.
#[derive(Debug, Clone)]
pub struct Page {
    /// Source file, or a placeholder for pages parsed from memory.
    pub path: PathBuf,
    /// Trimmed text of the page's `<title>`, if it has one.
    pub title: Option<String>,
    /// Immutable element snapshot searched by the widget.
    pub document: Document,
}

impl Page {
    #[must_use]
    /// Title for display, falling back to the file name.
    pub fn display_name(&self) -> String {
        self.title.clone().unwrap_or_else(|| {
            self.path.file_name().map_or_else(
                || self.path.display().to_string(),
                |name| name.to_string_lossy().to_string(),
            )
        })
    }
}

/// Expands `paths` into the files to load.
///
/// Files named explicitly are always kept; directories are walked recursively for files whose
/// extension is in `extensions`. Symlinks inside a directory are not followed. The result is
/// sorted and free of duplicates.
///
/// # Errors
///
/// Returns an error if a path does not exist.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let paths = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut found = Vec::new();
    for path in paths {
        let metadata = fs::metadata(&path)?;
        if metadata.is_dir() {
            collect_dir(&path, extensions, &mut found);
        } else {
            found.push(path);
        }
    }

    found.sort();
    found.dedup();
    Ok(found)
}

fn collect_dir(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) {
    for entry in WalkDir::new(dir) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    found.push(entry.into_path());
                }
            }
            Err(err) => tracing::warn!(%err, "skipping unreadable directory entry"),
        }
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Reads and parses the page at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the grammar fails to load.
pub fn load_page<F: Format>(path: &Path, format: &F) -> Result<Page> {
    let source = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut page = parse_page(&source, format)?;
    page.path = path.to_path_buf();
    tracing::info!(path = %path.display(), nodes = page.document.len(), "loaded page");
    Ok(page)
}

/// Parses in-memory page source.
///
/// # Errors
///
/// Returns an error if the grammar or title query fail to load, or the parser yields no tree.
pub fn parse_page<F: Format>(source: &str, format: &F) -> Result<Page> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(source, None).ok_or(Error::NoTree)?;

    let query = Query::new(&language, format.title_query())?;
    let title = query.capture_index_for_name("title").and_then(|title_idx| {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
        let mut title = None;
        while let Some(m) = matches.next() {
            if let Some(capture) = m.captures.iter().find(|c| c.index == title_idx) {
                let markup = capture.node.utf8_text(source.as_bytes()).unwrap_or_default();
                title = Some(decode_entities(inner_markup(markup)).trim().to_string());
                break;
            }
        }
        title
    });

    Ok(Page {
        path: PathBuf::from(format!("<memory>.{}", format.file_extension())),
        title: title.filter(|t| !t.is_empty()),
        document: format.build_document(&tree, source),
    })
}

/// Strips the outer open and close tags from an element's source.
fn inner_markup(element: &str) -> &str {
    let start = element.find('>').map_or(0, |i| i + 1);
    let end = element.rfind("</").filter(|&i| i >= start).unwrap_or(element.len());
    &element[start..end]
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
