//! End-to-end scan, bind and render over a temporary source tree.

use docweave::render::{entries, render_json, render_markdown};
use docweave::{DocumentationRun, EntityIndex, Settings};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const WIDGET_H: &str = "\
/// \\file
/// Widget utilities.

/// A rectangular widget.
///
/// Widgets are laid out by their parent.
/// \\notes Not thread-safe.
struct widget
{
    int width; //< Width in pixels.
    int height; //< Height in pixels.
};

/// \\param RED Warm.
/// \\param BLUE Cold.
enum color { RED, BLUE, GREEN };

/// \\entity widget_area
/// Area of a widget.
/// \\returns width times height.
";

const ENTITIES: &str = r#"[
    {"name": "widget", "unique_name": "widget", "kind": "struct", "file": "include/widget.h", "line": 8},
    {"name": "width", "unique_name": "widget::width", "kind": "field", "file": "include/widget.h", "line": 10},
    {"name": "RED", "unique_name": "RED", "kind": "enumerator", "file": "include/widget.h", "line": 16, "shares_line": true},
    {"name": "GREEN", "unique_name": "GREEN", "kind": "enumerator", "file": "include/widget.h", "line": 16, "shares_line": true},
    {"name": "widget_area", "unique_name": "widget_area", "kind": "function", "file": "src/widget.cpp", "line": 3}
]"#;

fn setup() -> (TempDir, DocumentationRun, EntityIndex) {
    let temp_dir = TempDir::new().unwrap();
    let include = temp_dir.path().join("include");
    fs::create_dir_all(&include).unwrap();
    fs::write(include.join("widget.h"), WIDGET_H).unwrap();
    fs::write(include.join("notes.txt"), "/// Not a header.\n").unwrap();

    let entities_path = temp_dir.path().join("entities.json");
    fs::write(&entities_path, ENTITIES).unwrap();
    let entities = EntityIndex::load(&entities_path).unwrap();

    let mut settings = Settings::default();
    settings.input.parallel_threads = 2;
    let run = DocumentationRun::new(Arc::new(settings)).unwrap();

    (temp_dir, run, entities)
}

#[test]
fn test_scan_registers_comments() {
    let (temp_dir, run, _) = setup();
    let stats = run.scan(&[temp_dir.path().to_path_buf()]).unwrap();

    // Only the header is a source file
    assert_eq!(stats.files_scanned, 1);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.duplicates, 0);
    // file, widget, width, height, RED, BLUE, widget_area
    assert_eq!(stats.comments_registered, 7);
    assert_eq!(run.registry().len(), 7);
}

#[test]
fn test_bind_entities() {
    let (temp_dir, run, entities) = setup();
    run.scan(&[temp_dir.path().to_path_buf()]).unwrap();
    let bound = run.bind(&entities);

    assert_eq!(bound.len(), 5);
    let widget = &bound[0];
    assert_eq!(
        widget.comment.as_ref().unwrap().brief().unwrap().text,
        "A rectangular widget."
    );
    assert_eq!(
        bound[1].comment.as_ref().unwrap().brief().unwrap().text,
        "Width in pixels."
    );
    assert_eq!(
        bound[2].comment.as_ref().unwrap().brief().unwrap().text,
        "Warm."
    );
    assert!(!bound[3].is_documented());
    assert_eq!(
        bound[4].comment.as_ref().unwrap().brief().unwrap().text,
        "Area of a widget."
    );
}

#[test]
fn test_render_outputs() {
    let (temp_dir, run, entities) = setup();
    run.scan(&[temp_dir.path().to_path_buf()]).unwrap();
    let bound = run.bind(&entities);

    let docs = entries(&bound, run.settings());
    // GREEN is undocumented
    assert_eq!(docs.len(), 4);

    let markdown = render_markdown(&docs);
    assert!(markdown.contains("## struct `widget`"));
    assert!(markdown.contains("Widgets are laid out by their parent."));
    assert!(markdown.contains("*Notes:* Not thread-safe."));
    assert!(markdown.contains("*Returns:* width times height."));

    let json = render_json(&docs).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 4);
    assert_eq!(value[3]["unique_name"], "widget_area");
}

#[test]
fn test_scan_twice_reports_duplicates() {
    let (temp_dir, run, _) = setup();
    let header = temp_dir.path().join("include").join("widget.h");

    run.scan(std::slice::from_ref(&header)).unwrap();
    let stats = run.scan(std::slice::from_ref(&header)).unwrap();

    assert_eq!(stats.comments_registered, 0);
    assert_eq!(stats.duplicates, 7);
    assert_eq!(stats.conflicts[&header].len(), 7);
    assert!(stats.summary().contains("widget.h: duplicate"));
}
