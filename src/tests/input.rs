use super::{find_documents, load_page, parse_page};
use crate::error::Error;
use crate::formats::html::HtmlFormat;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_title_is_extracted_and_decoded() {
    let page = parse_page(
        "<html><head><title> SIEM &amp; SOAR Guide </title></head><body></body></html>",
        &HtmlFormat,
    )
    .unwrap();
    assert_eq!(page.title.as_deref(), Some("SIEM & SOAR Guide"));
    assert_eq!(page.display_name(), "SIEM & SOAR Guide");
}

#[test]
fn test_missing_title_falls_back_to_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("install.html");
    fs::write(&path, "<p>No head here</p>").unwrap();

    let page = load_page(&path, &HtmlFormat).unwrap();
    assert_eq!(page.title, None);
    assert_eq!(page.path, path);
    assert_eq!(page.display_name(), "install.html");
}

#[test]
fn test_find_documents_walks_directories_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("guides");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("index.html"), "").unwrap();
    fs::write(dir.path().join("style.css"), "").unwrap();
    fs::write(nested.join("setup.HTM"), "").unwrap();
    let explicit = dir.path().join("notes.txt");
    fs::write(&explicit, "").unwrap();

    let exts = vec!["html".to_string(), "htm".to_string()];
    let found = find_documents(vec![dir.path().to_path_buf(), explicit.clone()], &exts).unwrap();

    assert_eq!(
        found,
        vec![
            nested.join("setup.HTM"),
            dir.path().join("index.html"),
            explicit,
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("a.html");
    fs::write(&page, "<p>once</p>").unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
    std::os::unix::fs::symlink(&page, dir.path().join("alias.html")).unwrap();

    let exts = vec!["html".to_string()];
    let found = find_documents(vec![dir.path().to_path_buf()], &exts).unwrap();
    assert_eq!(found, vec![page]);
}

#[test]
fn test_missing_path_is_an_error() {
    let result = find_documents(vec![PathBuf::from("/definitely/not/here")], &[]);
    assert!(result.is_err());
}

#[test]
fn test_unreadable_page_reports_path() {
    let err = load_page(&PathBuf::from("/definitely/not/here.html"), &HtmlFormat).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().contains("/definitely/not/here.html"));
}
