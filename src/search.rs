//! The page's search widget: a query box feeding a results panel.
//!
//! Input events go through a [`Debouncer`] so that only the last value typed during a burst is
//! scanned. Short queries clear and hide the panel straight away. When the debounced value fires
//! it is scanned against the document and the rendered entries replace the panel's contents.

use crate::debounce::Debouncer;
use crate::document::Document;
use crate::render::{render, Rendered, DEFAULT_LIMIT};
use crate::scanner::{scan, Markup};
use std::time::{Duration, Instant};

/// Tuning and markup conventions for a [`SearchBox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Shortest trimmed query, in characters, that triggers a scan.
    pub min_query_chars: usize,
    /// How long input must stay unchanged before it is scanned.
    pub quiet_period: Duration,
    /// Most entries rendered per scan.
    pub max_results: usize,
    /// `id` of the query box element.
    pub input_id: String,
    /// `id` of the results panel element.
    pub results_id: String,
    /// Page template conventions used by the scanner.
    pub markup: Markup,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            quiet_period: Duration::from_millis(300),
            max_results: DEFAULT_LIMIT,
            input_id: "search-input".to_string(),
            results_id: "search-results".to_string(),
            markup: Markup::default(),
        }
    }
}

/// CSS display state of the results panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Hidden.
    None,
    /// Shown.
    Block,
}

/// The results panel: rendered contents plus visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPanel {
    content: Option<Rendered>,
    display: Display,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self {
            content: None,
            display: Display::None,
        }
    }
}

impl ResultsPanel {
    /// Empties and hides the panel.
    pub fn clear(&mut self) {
        self.content = None;
        self.display = Display::None;
    }

    /// Replaces the panel's contents and shows it.
    pub fn show(&mut self, rendered: Rendered) {
        self.content = Some(rendered);
        self.display = Display::Block;
    }

    #[must_use]
    /// Current display state.
    pub fn display(&self) -> Display {
        self.display
    }

    #[must_use]
    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.display == Display::Block
    }

    #[must_use]
    /// What the panel currently shows, if anything.
    pub fn content(&self) -> Option<&Rendered> {
        self.content.as_ref()
    }

    #[must_use]
    /// Panel markup; empty when cleared.
    pub fn to_html(&self) -> String {
        self.content.as_ref().map(Rendered::to_html).unwrap_or_default()
    }
}

/// What an input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The query was too short; the panel was cleared and hidden.
    Cleared,
    /// A scan was scheduled, replacing a pending one if `superseded`.
    Scheduled {
        /// Whether an earlier scan was cancelled.
        superseded: bool,
    },
    /// A scan ran immediately.
    Searched,
}

/// Search widget bound to one query box and one results panel.
#[derive(Debug)]
pub struct SearchBox {
    settings: SearchSettings,
    debouncer: Debouncer<String>,
    panel: ResultsPanel,
}

impl SearchBox {
    /// Attaches to `document` if it carries both the query box and the results panel.
    ///
    /// A page without either element simply gets no widget.
    #[must_use]
    pub fn attach(document: &Document, settings: SearchSettings) -> Option<Self> {
        let input = document.element_by_id(&settings.input_id);
        let results = document.element_by_id(&settings.results_id);
        if input.is_none() || results.is_none() {
            tracing::debug!(
                input_id = %settings.input_id,
                results_id = %settings.results_id,
                "search widget markup absent, not attaching"
            );
            return None;
        }
        Some(Self::detached(settings))
    }

    #[must_use]
    /// Creates a widget without checking the page for its markup.
    pub fn detached(settings: SearchSettings) -> Self {
        let debouncer = Debouncer::new(settings.quiet_period);
        Self {
            settings,
            debouncer,
            panel: ResultsPanel::default(),
        }
    }

    #[must_use]
    /// Settings the widget was created with.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    #[must_use]
    /// The results panel.
    pub fn panel(&self) -> &ResultsPanel {
        &self.panel
    }

    #[must_use]
    /// Whether a scan is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    #[must_use]
    /// Time until the pending scan is due, if one is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    /// Handles a change of the query box's value at `now`.
    pub fn on_input(&mut self, value: &str, now: Instant) -> InputOutcome {
        let Some(query) = self.accept(value) else {
            self.debouncer.cancel();
            self.panel.clear();
            return InputOutcome::Cleared;
        };
        let superseded = self.debouncer.schedule(query.to_string(), now).is_some();
        tracing::trace!(query, "scan scheduled");
        InputOutcome::Scheduled { superseded }
    }

    /// Runs the pending scan if it is due by `now`. Returns whether a scan ran.
    pub fn poll(&mut self, document: &Document, now: Instant) -> bool {
        match self.debouncer.fire(now) {
            Some(query) => {
                tracing::trace!(%query, "debounced scan fired");
                self.run(document, &query);
                true
            }
            None => false,
        }
    }

    /// Handles `value` immediately, without waiting for a quiet period.
    pub fn submit(&mut self, document: &Document, value: &str) -> InputOutcome {
        self.debouncer.cancel();
        match self.accept(value) {
            Some(query) => {
                self.run(document, query);
                InputOutcome::Searched
            }
            None => {
                self.panel.clear();
                InputOutcome::Cleared
            }
        }
    }

    /// The trimmed query, if it is long enough to scan.
    fn accept<'v>(&self, value: &'v str) -> Option<&'v str> {
        let query = value.trim();
        (query.chars().count() >= self.settings.min_query_chars && !query.is_empty())
            .then_some(query)
    }

    fn run(&mut self, document: &Document, query: &str) {
        let matches = scan(document, query, &self.settings.markup);
        let rendered = render(&matches, query, self.settings.max_results);
        self.panel.show(rendered);
    }
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
