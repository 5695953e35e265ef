use std::fs;

use solar_system_lib::{Error, WidgetProvider, WIDGET_TEMPLATE_URI};
use tempfile::tempdir;

#[test]
fn loads_exact_asset() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("solar-system.html"), "<div id=\"exact\"></div>").unwrap();
    fs::write(dir.path().join("solar-system-zzzz.html"), "<div id=\"hashed\"></div>").unwrap();

    let widget = WidgetProvider::new(dir.path()).load().unwrap();
    assert_eq!(widget.html, "<div id=\"exact\"></div>");
    assert_eq!(widget.template_uri, WIDGET_TEMPLATE_URI);
}

#[test]
fn falls_back_to_last_hashed_asset() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("solar-system-1a2b.html"), "old").unwrap();
    fs::write(dir.path().join("solar-system-9f8e.html"), "new").unwrap();
    fs::write(dir.path().join("solar-system-9f8e.js"), "script").unwrap();
    fs::write(dir.path().join("other-widget.html"), "other").unwrap();

    let widget = WidgetProvider::new(dir.path()).load().unwrap();
    assert_eq!(widget.html, "new");
}

#[test]
fn ignores_unrelated_prefixes() {
    let dir = tempdir().unwrap();
    // No separator after the identifier, so this is a different asset.
    fs::write(dir.path().join("solar-systems.html"), "plural").unwrap();

    let err = WidgetProvider::new(dir.path()).load().unwrap_err();
    match err {
        Error::WidgetAssetMissing { identifier, dir: missing_dir } => {
            assert_eq!(identifier, "solar-system");
            assert_eq!(missing_dir, dir.path());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let result = WidgetProvider::new(dir.path()).load();
    assert!(matches!(result, Err(Error::WidgetAssetMissing { .. })));
}
