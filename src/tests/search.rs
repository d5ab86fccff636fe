use super::{Display, InputOutcome, SearchBox, SearchSettings};
use crate::document::Document;
use crate::formats::html::HtmlFormat;
use crate::input::parse_page;
use crate::render::{Rendered, NO_RESULTS};
use std::time::{Duration, Instant};

const QUIET: Duration = Duration::from_millis(300);

fn page(body: &str) -> Document {
    let source = format!(
        r#"<html><body>
<input type="text" id="search-input" placeholder="Search docs">
<div id="search-results" style="display: none"></div>
{body}
</body></html>"#
    );
    parse_page(&source, &HtmlFormat).unwrap().document
}

fn siem_page() -> Document {
    page(
        r#"<section class="section" id="sources">
  <h2>Data Sources</h2>
  <p>Supports syslog and CEF ingestion</p>
</section>"#,
    )
}

fn attached(doc: &Document) -> SearchBox {
    SearchBox::attach(doc, SearchSettings::default()).unwrap()
}

#[test]
fn test_attach_requires_both_elements() {
    let no_results = parse_page(r#"<input id="search-input">"#, &HtmlFormat)
        .unwrap()
        .document;
    let no_input = parse_page(r#"<div id="search-results"></div>"#, &HtmlFormat)
        .unwrap()
        .document;

    assert!(SearchBox::attach(&no_results, SearchSettings::default()).is_none());
    assert!(SearchBox::attach(&no_input, SearchSettings::default()).is_none());
    assert!(SearchBox::attach(&siem_page(), SearchSettings::default()).is_some());
}

#[test]
fn test_cef_scenario() {
    let doc = siem_page();
    let mut search = attached(&doc);
    let start = Instant::now();

    assert_eq!(
        search.on_input("cef", start),
        InputOutcome::Scheduled { superseded: false }
    );
    assert!(!search.panel().is_visible(), "nothing renders before the quiet period");
    assert!(search.poll(&doc, start + QUIET));

    let panel = search.panel();
    assert_eq!(panel.display(), Display::Block);
    let rendered = panel.content().unwrap();
    assert_eq!(rendered.entries().len(), 1);
    assert_eq!(rendered.entries()[0].section.as_str(), "Data Sources");
    assert!(panel
        .to_html()
        .contains("Supports syslog and <mark>CEF</mark> ingestion"));
}

#[test]
fn test_no_results_scenario() {
    let doc = siem_page();
    let mut search = attached(&doc);

    assert_eq!(search.submit(&doc, "zzz"), InputOutcome::Searched);
    let panel = search.panel();
    assert!(panel.is_visible());
    assert_eq!(panel.content(), Some(&Rendered::NoResults));
    assert_eq!(panel.content().unwrap().plain_text(), NO_RESULTS);
}

#[test]
fn test_short_queries_clear_and_hide_immediately() {
    let doc = siem_page();
    let mut search = attached(&doc);
    search.submit(&doc, "syslog");
    assert!(search.panel().is_visible());

    let now = Instant::now();
    search.on_input("sy", now);
    assert!(search.is_pending());

    for value in ["", " ", "s", "  c  ", "\tx\n"] {
        assert_eq!(search.on_input(value, now), InputOutcome::Cleared, "{value:?}");
        assert!(!search.is_pending(), "short input cancels the pending scan");
        assert_eq!(search.panel().display(), Display::None);
        assert!(search.panel().content().is_none());
        assert_eq!(search.panel().to_html(), "");
    }

    assert!(!search.poll(&doc, now + QUIET * 2));
    assert!(!search.panel().is_visible());
}

#[test]
fn test_query_length_counts_characters() {
    let doc = siem_page();
    let mut search = attached(&doc);
    let now = Instant::now();

    for value in ["🔥", "é", " ü "] {
        assert_eq!(search.on_input(value, now), InputOutcome::Cleared, "{value:?}");
    }
    for value in ["🔥🔥", "éé", "ßx"] {
        assert_eq!(
            search.on_input(value, now),
            InputOutcome::Scheduled { superseded: false },
            "{value:?}"
        );
        search.on_input("", now);
    }
}

#[test]
fn test_burst_of_input_runs_one_scan_with_last_value() {
    let doc = siem_page();
    let mut search = attached(&doc);
    let start = Instant::now();

    let mut scans = 0;
    let values = ["sy", "sys", "sysl", "syslo", "data"];
    for (i, value) in values.iter().enumerate() {
        let now = start + Duration::from_millis(50 * i as u64);
        if search.poll(&doc, now) {
            scans += 1;
        }
        let outcome = search.on_input(value, now);
        assert_eq!(outcome, InputOutcome::Scheduled { superseded: i > 0 });
    }
    let last = start + Duration::from_millis(200);
    assert_eq!(search.time_until_due(last), Some(QUIET));
    if search.poll(&doc, last + QUIET) {
        scans += 1;
    }

    assert_eq!(scans, 1);
    let rendered = search.panel().content().unwrap();
    assert_eq!(rendered.entries().len(), 1);
    assert_eq!(rendered.entries()[0].text, "Data Sources");
}

#[test]
fn test_repeated_scans_render_identically() {
    let doc = siem_page();
    let mut search = attached(&doc);

    search.submit(&doc, "  syslog ");
    let first = search.panel().clone();
    search.submit(&doc, "syslog");
    assert_eq!(search.panel(), &first);
}

#[test]
fn test_new_results_replace_old_ones() {
    let doc = siem_page();
    let mut search = attached(&doc);

    search.submit(&doc, "syslog");
    assert_eq!(search.panel().content().unwrap().total(), 1);
    search.submit(&doc, "nothing like this");
    assert_eq!(search.panel().content(), Some(&Rendered::NoResults));
}

#[test]
fn test_settings_are_honoured() {
    let items: String = (0..5).map(|i| format!("<li>alert {i}</li>")).collect();
    let doc = page(&format!("<ul>{items}</ul>"));
    let settings = SearchSettings {
        min_query_chars: 4,
        max_results: 3,
        quiet_period: Duration::from_millis(10),
        ..SearchSettings::default()
    };
    let mut search = SearchBox::attach(&doc, settings).unwrap();

    assert_eq!(search.submit(&doc, "ale"), InputOutcome::Cleared);
    assert_eq!(search.submit(&doc, "alert"), InputOutcome::Searched);
    let rendered = search.panel().content().unwrap();
    assert_eq!(rendered.entries().len(), 3);
    assert_eq!(rendered.total(), 5);

    let now = Instant::now();
    search.on_input("alert 4", now);
    assert!(search.poll(&doc, now + Duration::from_millis(10)));
    assert_eq!(search.panel().content().unwrap().total(), 1);
}
