//! The UI renders the application state into something visible and searchable.
//!
//! The draw function dispatches based on the current view. The search view mirrors the page's
//! widget: a query line above a results panel that stays hidden until a scan has rendered
//! something, with each occurrence of the query highlighted.

use crate::app_state::{AppState, FileMode, View};
use crate::highlight::Fragment;
use crate::render::{ResultEntry, NO_RESULTS};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    match app.current_view {
        View::FileList => draw_file_list(f, app),
        View::Search => draw_search(f, app),
        View::Detail => draw_detail(f, app),
    }
}

fn mark_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Converts highlighted fragments into styled spans.
fn highlighted_spans(entry: &ResultEntry) -> Vec<Span<'_>> {
    entry
        .fragments()
        .into_iter()
        .map(|fragment| match fragment {
            Fragment::Plain(text) => Span::raw(text),
            Fragment::Marked(text) => Span::styled(text, mark_style()),
        })
        .collect()
}

fn help_bar<'a>(app: &'a AppState, default: &'a str) -> Paragraph<'a> {
    let text = app.message.as_deref().unwrap_or(default);
    Paragraph::new(text).block(Block::default().borders(Borders::ALL))
}

fn draw_file_list(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let line = Line::from(vec![
                Span::styled(
                    format!("📄 {}", page.display_name()),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", page.path.display()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            let style = if i == app.current_file_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!("Pages ({})", app.pages.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    f.render_widget(
        help_bar(app, "↑/↓: Navigate | Enter: Search page | q: Quit"),
        chunks[1],
    );
}

fn draw_search(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query
            Constraint::Min(0),    // Results
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let page_name = app
        .current_page()
        .map(crate::input::Page::display_name)
        .unwrap_or_default();
    let pending = app.search.as_ref().is_some_and(|s| s.is_pending());
    let query_title = if pending {
        format!("Search {page_name} …")
    } else {
        format!("Search {page_name}")
    };
    let query = Paragraph::new(format!("{}▏", app.query))
        .block(Block::default().borders(Borders::ALL).title(query_title));
    f.render_widget(query, chunks[0]);

    let content = app
        .search
        .as_ref()
        .filter(|search| search.panel().is_visible())
        .and_then(|search| search.panel().content());

    match content {
        None => {
            let hint = Paragraph::new("Type at least two characters to search")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title("Results"));
            f.render_widget(hint, chunks[1]);
        }
        Some(rendered) if rendered.entries().is_empty() => {
            let empty = Paragraph::new(NO_RESULTS)
                .block(Block::default().borders(Borders::ALL).title("Results"));
            f.render_widget(empty, chunks[1]);
        }
        Some(rendered) => {
            let items: Vec<ListItem> = rendered
                .entries()
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let heading = Line::from(Span::styled(
                        entry.section.to_string(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ));
                    let mut body = vec![Span::raw("  ")];
                    body.extend(highlighted_spans(entry));
                    let style = if i == app.selected_result {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    ListItem::new(vec![heading, Line::from(body)]).style(style)
                })
                .collect();

            let title = format!(
                "Results ({} of {})",
                rendered.entries().len(),
                rendered.total()
            );
            let list =
                List::new(items).block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(list, chunks[1]);
        }
    }

    let help = if app.file_mode == FileMode::Multi {
        "Type to search | ↑/↓: Select | Enter: Details | Esc: Clear / Pages | Ctrl+C: Quit"
    } else {
        "Type to search | ↑/↓: Select | Enter: Details | Esc: Clear / Quit | Ctrl+C: Quit"
    };
    f.render_widget(help_bar(app, help), chunks[2]);
}

fn draw_detail(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Text
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let Some(entry) = app.selected_entry() else {
        return;
    };

    let mut trail = app.selected_trail();
    if trail.is_empty() {
        trail.push(entry.section.to_string());
    }
    let breadcrumb = Paragraph::new(trail.join(" > "))
        .block(Block::default().borders(Borders::ALL).title("Sections"));
    f.render_widget(breadcrumb, chunks[0]);

    let tag = app
        .current_page()
        .and_then(|page| page.document.get(entry.element))
        .map(|node| node.tag().to_string())
        .unwrap_or_default();
    let text = Paragraph::new(Line::from(highlighted_spans(entry)))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("<{tag}> result {}", app.selected_result + 1)),
        );
    f.render_widget(text, chunks[1]);

    f.render_widget(help_bar(app, "Esc / q: Back to results"), chunks[2]);
}
