//! docsift: search documentation pages the way their in-page search box does.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use docsift::{app_state, config, formats, input, report, search, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// How long the event loop sleeps when no scan is pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "In-page search and highlighting for static documentation sites", long_about = None)]
struct Args {
    /// Pages or directories to search
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Run one search and print the results panel instead of starting the TUI
    #[arg(long, short = 'q', value_name = "QUERY")]
    query: Option<String>,

    /// Print results as JSON (with --query)
    #[arg(long, requires = "query")]
    json: bool,

    /// Search pages even if they lack the search widget markup
    #[arg(long)]
    standalone: bool,

    /// Maximum number of results rendered per page
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(limit) = args.limit {
        cfg.max_results = limit;
    }

    let files = input::find_documents(args.paths, &cfg.file_extensions)?;

    let format = formats::html::HtmlFormat;
    let mut pages = Vec::new();
    for file in &files {
        match input::load_page(file, &format) {
            Ok(page) => pages.push(page),
            Err(e) => tracing::warn!(error = %e, "skipping page"),
        }
    }

    if pages.is_empty() {
        eprintln!("No matching pages found");
        return Ok(());
    }

    let settings = cfg.settings();

    if let Some(query) = args.query {
        return run_once(&pages, &query, settings, args.standalone, args.json);
    }

    let state = app_state::AppState::new(pages, settings, args.standalone);
    run_tui(state)
}

fn run_once(
    pages: &[input::Page],
    query: &str,
    settings: search::SearchSettings,
    standalone: bool,
    json: bool,
) -> io::Result<()> {
    let mut reports = Vec::new();

    for page in pages {
        let widget = if standalone {
            Some(search::SearchBox::detached(settings.clone()))
        } else {
            search::SearchBox::attach(&page.document, settings.clone())
        };
        let Some(mut widget) = widget else {
            continue;
        };

        widget.submit(&page.document, query);
        let Some(rendered) = widget.panel().content() else {
            continue;
        };

        if json {
            reports.push(report::SearchReport::new(page, query, rendered));
        } else {
            println!("<!-- {} -->", page.path.display());
            println!("{}", rendered.to_html());
        }
    }

    if json {
        let out = serde_json::to_string_pretty(&reports).map_err(io::Error::other)?;
        println!("{out}");
    }

    Ok(())
}

fn run_tui(mut app: app_state::AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Wake up in time for a pending scan
        let timeout = app.time_until_due(Instant::now()).unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}

/// Applies one key press. Returns false when the application should quit.
fn handle_key(app: &mut app_state::AppState, key: event::KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    let now = Instant::now();
    match app.current_view {
        app_state::View::FileList => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Up => app.prev_file(),
            KeyCode::Down => app.next_file(),
            KeyCode::Enter => app.open_current_page(),
            _ => {}
        },
        app_state::View::Search => match key.code {
            KeyCode::Char(c) => app.push_char(c, now),
            KeyCode::Backspace => app.pop_char(now),
            KeyCode::Up => app.select_prev(),
            KeyCode::Down => app.select_next(),
            KeyCode::Enter => app.enter_detail_view(),
            KeyCode::Esc => {
                if !app.query.is_empty() {
                    app.clear_query(now);
                } else if app.file_mode == app_state::FileMode::Multi {
                    app.close_page();
                } else {
                    return false;
                }
            }
            _ => {}
        },
        app_state::View::Detail => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.exit_detail_view(),
            KeyCode::Up => app.select_prev(),
            KeyCode::Down => app.select_next(),
            _ => {}
        },
    }
    true
}
