// tests/integration_tests/exclude_patterns_test.rs
use super::common::{create_test_file, setup_site};
use anyhow::Result;
use fieldnotes::core::ignore::IGNORE_FILE;
use fieldnotes::{ExcludePatterns, discover};
use std::path::Path;

#[test]
fn test_exclude_patterns() -> Result<()> {
    let patterns = ExcludePatterns::new(&[
        "# Comment line",
        "*.tmp",
        "drafts/",
        "!drafts/keep.md",
        "/top.md",
        "2024/**/*.bak",
    ])?;

    assert!(patterns.is_excluded(Path::new("note.tmp"), false));
    assert!(patterns.is_excluded(Path::new("2025/deep/note.tmp"), false));
    assert!(patterns.is_excluded(Path::new("drafts"), true));
    assert!(patterns.is_excluded(Path::new("2025/drafts"), true));
    assert!(!patterns.is_excluded(Path::new("drafts"), false), "drafts/ only matches directories");
    assert!(!patterns.is_excluded(Path::new("drafts/keep.md"), false));
    assert!(patterns.is_excluded(Path::new("top.md"), false));
    assert!(!patterns.is_excluded(Path::new("2025/top.md"), false));
    assert!(patterns.is_excluded(Path::new("2024/old/x.bak"), false));
    assert!(!patterns.is_excluded(Path::new("note.md"), false));
    Ok(())
}

#[test]
fn test_invalid_pattern_is_an_error() {
    assert!(ExcludePatterns::new(&["[unclosed"]).is_err());
}

#[test]
fn test_discover_honors_config_and_ignore_file() -> Result<()> {
    let (_dir, mut config) = setup_site()?;
    config.exclude = vec!["templates/".to_owned()];
    create_test_file(&config.staging_root, IGNORE_FILE, "# local\nscratch-*.md\n")?;
    create_test_file(&config.staging_root, "keep.md", "keep")?;
    create_test_file(&config.staging_root, "scratch-1.md", "skip")?;
    create_test_file(&config.staging_root, "templates/base.md", "skip")?;
    create_test_file(&config.staging_root, "2025/also.md", "keep")?;

    let documents = discover(&config)?;

    assert_eq!(
        documents,
        vec![
            config.staging_root.join("2025/also.md"),
            config.staging_root.join("keep.md"),
        ]
    );
    Ok(())
}
