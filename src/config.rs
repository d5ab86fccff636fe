//! Configuration to acknowledge site conventions as well as set defaults.
//!
//! Specifically, we try to find a docsift.toml, and if present we load settings from there.
//! This provides the search widget's tuning, the page template's markup conventions and the
//! file extensions to scan for.

use crate::scanner::Markup;
use crate::search::SearchSettings;
use facet::Facet;
use std::fs;
use std::time::Duration;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "docsift.toml";

#[derive(Facet, Clone)]
/// User preferences loaded from docsift.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 300)]
    /// Quiet period in milliseconds before a typed query is scanned.
    pub debounce_ms: u64,
    #[facet(default = 2)]
    /// Shortest trimmed query, in characters, that triggers a scan.
    pub min_query_chars: usize,
    #[facet(default = 10)]
    /// Most results rendered per scan.
    pub max_results: usize,
    #[facet(default = "search-input".to_string())]
    /// `id` of the query box element.
    pub input_id: String,
    #[facet(default = "search-results".to_string())]
    /// `id` of the results panel element.
    pub results_id: String,
    #[facet(default = "section".to_string())]
    /// Class marking section containers.
    pub section_class: String,
    #[facet(default = "h2".to_string())]
    /// Heading tag that titles a section container.
    pub section_title_tag: String,
    #[facet(default = vec!["h2".to_string(), "h3".to_string(), "h4".to_string(), "p".to_string(), "li".to_string()])]
    /// Tags of the elements whose text is searched.
    pub candidate_tags: Vec<String>,
    #[facet(default = vec!["html".to_string(), "htm".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Config {
    #[must_use]
    /// Load configuration from docsift.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string(CONFIG_FILE) {
            if let Some(config) = Self::from_toml(&contents) {
                return config;
            }
            tracing::warn!(file = CONFIG_FILE, "ignoring unparseable configuration");
        }
        Self::from_toml("").unwrap()
    }

    #[must_use]
    /// Parses configuration text, filling unset keys with defaults.
    pub fn from_toml(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }

    #[must_use]
    /// Settings for the search widget.
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            min_query_chars: self.min_query_chars,
            quiet_period: Duration::from_millis(self.debounce_ms),
            max_results: self.max_results,
            input_id: self.input_id.clone(),
            results_id: self.results_id.clone(),
            markup: Markup {
                candidate_tags: self
                    .candidate_tags
                    .iter()
                    .map(|tag| tag.to_ascii_lowercase())
                    .collect(),
                section_class: self.section_class.clone(),
                section_title_tag: self.section_title_tag.to_ascii_lowercase(),
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
