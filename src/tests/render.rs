use super::{render, Rendered, NO_RESULTS};
use crate::document::DocumentBuilder;
use crate::scanner::{Match, SectionLabel};

fn matches(count: usize) -> Vec<Match> {
    let mut builder = DocumentBuilder::new();
    let ids: Vec<_> = (0..count)
        .map(|_| {
            let id = builder.open_element("li", Vec::new());
            builder.close_element();
            id
        })
        .collect();
    let _ = builder.finish();

    ids.into_iter()
        .enumerate()
        .map(|(i, element)| Match {
            element,
            text: format!("Rule {i}: alert on failed logins"),
            section: SectionLabel::Titled("Detection Rules".to_string()),
        })
        .collect()
}

#[test]
fn test_no_matches_renders_message() {
    let rendered = render(&[], "zzz", 10);
    assert_eq!(rendered, Rendered::NoResults);
    assert_eq!(rendered.plain_text(), NO_RESULTS);
    assert_eq!(rendered.to_html(), "<p>No results found</p>");
    assert!(rendered.entries().is_empty());
    assert_eq!(rendered.total(), 0);
}

#[test]
fn test_truncates_to_first_entries_in_order() {
    for n in [1, 9, 10, 11, 25] {
        let all = matches(n);
        let rendered = render(&all, "alert", 10);
        assert_eq!(rendered.entries().len(), n.min(10), "n = {n}");
        assert_eq!(rendered.total(), n);
        for (entry, m) in rendered.entries().iter().zip(&all) {
            assert_eq!(entry.element, m.element);
            assert_eq!(entry.text, m.text);
        }
    }
}

#[test]
fn test_repeated_sections_are_kept() {
    let rendered = render(&matches(3), "rule", 10);
    let sections: Vec<_> = rendered
        .entries()
        .iter()
        .map(|e| e.section.as_str())
        .collect();
    assert_eq!(sections, vec!["Detection Rules"; 3]);
}

#[test]
fn test_entry_markup() {
    let all = vec![Match {
        element: matches(1)[0].element,
        text: "Supports syslog and CEF ingestion".to_string(),
        section: SectionLabel::Titled("Data Sources".to_string()),
    }];
    let rendered = render(&all, "cef", 10);
    assert_eq!(
        rendered.to_html(),
        r#"<div class="search-result"><h4>Data Sources</h4><p>Supports syslog and <mark>CEF</mark> ingestion</p></div>"#
    );
    assert_eq!(
        rendered.plain_text(),
        "Data Sources: Supports syslog and CEF ingestion"
    );
}

#[test]
fn test_fallback_section_heading() {
    let all = vec![Match {
        element: matches(1)[0].element,
        text: "Orphan <paragraph>".to_string(),
        section: SectionLabel::Unattributed,
    }];
    let html = render(&all, "orphan", 10).to_html();
    assert!(html.contains("<h4>Unknown Section</h4>"), "{html}");
    assert!(html.contains("<mark>Orphan</mark> &lt;paragraph&gt;"), "{html}");
}
