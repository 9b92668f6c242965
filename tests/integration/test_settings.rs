//! Settings files driving a documentation run.

use docweave::{DocError, DocumentationRun, SectionKind, Settings};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_custom_command_character_and_names() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(
        &config_path,
        r#"
[input]
parallel_threads = 1

[comment]
command_character = "@"

[comment.commands]
requires = "pre"

[output.section_names]
requires = "Preconditions"
"#,
    )
    .unwrap();

    let settings = Settings::load_from(&config_path).unwrap();
    assert_eq!(settings.input.parallel_threads, 1);
    assert_eq!(
        settings.output.section_title(SectionKind::Requires),
        "Preconditions"
    );

    let header = temp_dir.path().join("a.h");
    fs::write(&header, "/// Frob.\n/// @pre x > 0.\nvoid frob(int x);\n").unwrap();

    let run = DocumentationRun::new(Arc::new(settings)).unwrap();
    let stats = run.scan(&[header]).unwrap();
    assert_eq!(stats.warnings, 0);

    let ids = run.registry().ids();
    assert_eq!(ids.len(), 1);
    let comment = run.registry().get(&ids[0]).unwrap();
    let requires: Vec<_> = comment.content().section(SectionKind::Requires).collect();
    assert_eq!(requires.len(), 1);
    assert_eq!(requires[0].text, "x > 0.");
}

#[test]
fn test_renamed_command_frees_old_name() {
    let temp_dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.input.parallel_threads = 1;
    settings
        .comment
        .commands
        .insert("requires".to_string(), "pre".to_string());

    let header = temp_dir.path().join("a.h");
    fs::write(&header, "/// Frob.\n/// \\requires x.\nvoid frob(int x);\n").unwrap();

    let run = DocumentationRun::new(Arc::new(settings)).unwrap();
    let stats = run.scan(&[header]).unwrap();
    assert_eq!(stats.warnings, 1);
}

#[test]
fn test_invalid_settings() {
    let mut settings = Settings::default();
    settings
        .output
        .section_names
        .insert("brief".to_string(), "Summary".to_string());
    assert!(matches!(
        DocumentationRun::new(Arc::new(settings)),
        Err(DocError::ReservedSectionName { .. })
    ));

    let mut settings = Settings::default();
    settings
        .comment
        .commands
        .insert("requires".to_string(), "effects".to_string());
    assert!(matches!(
        DocumentationRun::new(Arc::new(settings)),
        Err(DocError::CommandInUse { .. })
    ));
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(".docweave").join("settings.toml");

    let mut settings = Settings::default();
    settings.output.tab_width = 2;
    settings.input.require_comment = false;
    settings.save(&config_path).unwrap();

    let loaded = Settings::load_from(&config_path).unwrap();
    assert_eq!(loaded.output.tab_width, 2);
    assert!(!loaded.input.require_comment);
}
