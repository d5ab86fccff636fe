use super::Config;
use crate::search::SearchSettings;
use std::time::Duration;

#[test]
fn test_defaults_match_widget_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.settings(), SearchSettings::default());
    assert_eq!(config.file_extensions, vec!["html", "htm"]);
}

#[test]
fn test_partial_override() {
    let config = Config::from_toml("debounce_ms = 50\nsection_title_tag = \"H3\"\n").unwrap();
    let settings = config.settings();
    assert_eq!(settings.quiet_period, Duration::from_millis(50));
    assert_eq!(settings.markup.section_title_tag, "h3");
    assert_eq!(settings.max_results, 10);
}
