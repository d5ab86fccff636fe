//! The core state machine bridging loaded pages and the interactive search view.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user types
//! and navigates. Each keystroke edits the query and is forwarded to the page's search widget,
//! whose debouncer decides when a scan actually runs; the event loop calls [`AppState::tick`]
//! whenever it wakes up so that a due scan fires without waiting for another key.

use crate::input::Page;
use crate::render::{Rendered, ResultEntry};
use crate::scanner::section_trail;
use crate::search::{SearchBox, SearchSettings};
use std::time::{Duration, Instant};

#[derive(PartialEq, Debug)]
/// Determines navigation scope and quit behavior based on project size.
pub enum FileMode {
    /// Single-page mode quits directly to shell.
    Single,
    /// Multi-page mode returns to the page list before quitting.
    Multi,
}

#[derive(PartialEq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Lists loaded pages for multi-page runs.
    FileList,
    /// Query line and results panel for one page.
    Search,
    /// Full text and section trail of the selected result.
    Detail,
}

/// Session state for the terminal front end.
pub struct AppState {
    /// Every page loaded for this session.
    pub pages: Vec<Page>,
    /// Selected page in the page list, and the page being searched.
    pub current_file_index: usize,
    /// Controls navigation behavior and page list visibility.
    pub file_mode: FileMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Current contents of the query line.
    pub query: String,
    /// Search widget of the open page, absent if the page has no search markup.
    pub search: Option<SearchBox>,
    /// Highlighted row in the results panel.
    pub selected_result: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Settings handed to each page's widget.
    pub settings: SearchSettings,
    /// Search pages even when they lack the widget markup.
    pub standalone: bool,
}

impl AppState {
    #[must_use]
    /// Initialises application state and determines file mode.
    ///
    /// Single-page sessions open straight into the search view, while multi-page sessions start
    /// on the page list and return to it on Esc.
    pub fn new(pages: Vec<Page>, settings: SearchSettings, standalone: bool) -> Self {
        let file_mode = if pages.len() == 1 {
            FileMode::Single
        } else {
            FileMode::Multi
        };

        let mut state = Self {
            pages,
            current_file_index: 0,
            file_mode,
            current_view: View::FileList,
            query: String::new(),
            search: None,
            selected_result: 0,
            message: None,
            settings,
            standalone,
        };

        if state.file_mode == FileMode::Single {
            state.open_current_page();
        }
        state
    }

    #[must_use]
    /// The page under the cursor or being searched.
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_file_index)
    }

    /// Moves the page list cursor up.
    pub fn prev_file(&mut self) {
        self.current_file_index = self.current_file_index.saturating_sub(1);
    }

    /// Moves the page list cursor down.
    pub fn next_file(&mut self) {
        if self.current_file_index + 1 < self.pages.len() {
            self.current_file_index += 1;
        }
    }

    /// Opens the selected page in the search view with an empty query.
    pub fn open_current_page(&mut self) {
        let Some(page) = self.pages.get(self.current_file_index) else {
            return;
        };

        self.search = if self.standalone {
            Some(SearchBox::detached(self.settings.clone()))
        } else {
            SearchBox::attach(&page.document, self.settings.clone())
        };
        self.message = if self.search.is_none() {
            Some(format!(
                "{} has no #{} / #{} search markup",
                page.display_name(),
                self.settings.input_id,
                self.settings.results_id
            ))
        } else {
            None
        };
        self.query.clear();
        self.selected_result = 0;
        self.current_view = View::Search;
    }

    /// Leaves the search view for the page list.
    pub fn close_page(&mut self) {
        self.search = None;
        self.query.clear();
        self.selected_result = 0;
        self.message = None;
        self.current_view = View::FileList;
    }

    /// Appends a typed character to the query.
    pub fn push_char(&mut self, c: char, now: Instant) {
        if self.search.is_some() {
            self.query.push(c);
            self.input_changed(now);
        }
    }

    /// Deletes the last character of the query.
    pub fn pop_char(&mut self, now: Instant) {
        if self.query.pop().is_some() {
            self.input_changed(now);
        }
    }

    /// Empties the query line.
    pub fn clear_query(&mut self, now: Instant) {
        if !self.query.is_empty() {
            self.query.clear();
            self.input_changed(now);
        }
    }

    fn input_changed(&mut self, now: Instant) {
        if let Some(search) = self.search.as_mut() {
            search.on_input(&self.query, now);
        }
    }

    /// Runs a due scan. Returns whether the results changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(page) = self.pages.get(self.current_file_index) else {
            return false;
        };
        let Some(search) = self.search.as_mut() else {
            return false;
        };
        let ran = search.poll(&page.document, now);
        if ran {
            self.selected_result = 0;
        }
        ran
    }

    #[must_use]
    /// How long the event loop may sleep before a pending scan is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.search
            .as_ref()
            .and_then(|search| search.time_until_due(now))
    }

    #[must_use]
    /// Entries currently shown in the results panel.
    pub fn results(&self) -> &[ResultEntry] {
        self.search
            .as_ref()
            .and_then(|search| search.panel().content())
            .map(Rendered::entries)
            .unwrap_or_default()
    }

    #[must_use]
    /// The highlighted result, if the panel shows any.
    pub fn selected_entry(&self) -> Option<&ResultEntry> {
        self.results().get(self.selected_result)
    }

    /// Moves the result cursor down.
    pub fn select_next(&mut self) {
        if self.selected_result + 1 < self.results().len() {
            self.selected_result += 1;
        }
    }

    /// Moves the result cursor up.
    pub fn select_prev(&mut self) {
        self.selected_result = self.selected_result.saturating_sub(1);
    }

    /// Shows the selected result in full.
    pub fn enter_detail_view(&mut self) {
        if self.selected_entry().is_some() {
            self.current_view = View::Detail;
        }
    }

    /// Returns from the detail view to the search view.
    pub fn exit_detail_view(&mut self) {
        self.current_view = View::Search;
    }

    #[must_use]
    /// Section labels enclosing the selected result, outermost first.
    pub fn selected_trail(&self) -> Vec<String> {
        let (Some(page), Some(entry)) = (self.current_page(), self.selected_entry()) else {
            return Vec::new();
        };
        section_trail(&page.document, entry.element, &self.settings.markup)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
