// tests/integration_tests/front_matter_test.rs
use super::common::create_test_file;
use anyhow::Result;
use fieldnotes::models::FieldValue;
use fieldnotes::{parse_front_matter, read_front_matter};
use tempfile::TempDir;

#[test]
fn test_front_matter_parsing() {
    let content = "---\ntitle: \"Birds: a list\"\ndate: '2025-06-01'\ntags: [birds, spring]\n---\nBody";
    let front_matter = parse_front_matter(content);

    assert_eq!(front_matter.title(), Some("Birds: a list"));
    assert_eq!(front_matter.date(), Some("2025-06-01"));
    assert_eq!(
        front_matter.get("tags"),
        Some(&FieldValue::List(vec!["birds".to_owned(), "spring".to_owned()]))
    );
    assert!(front_matter.missing_fields().is_empty());
}

#[test]
fn test_front_matter_absent_or_unterminated() {
    assert!(parse_front_matter("No header").is_empty());
    assert!(parse_front_matter("---\ntitle: x\nno closing").is_empty());
    assert!(parse_front_matter("").is_empty());
}

#[test]
fn test_front_matter_blank_values_warn() {
    let front_matter = parse_front_matter("---\ntitle:\ndate: 2025-01-01\n---\n");
    assert_eq!(front_matter.missing_fields(), vec!["title"]);
    assert_eq!(
        front_matter.missing_field_warnings(),
        vec!["Missing 'title' in front matter".to_owned()]
    );
}

#[test]
fn test_read_front_matter_from_disk() -> Result<()> {
    let dir = TempDir::new()?;
    let path = create_test_file(dir.path(), "n.md", "---\ntitle: Disk\n---\n")?;
    assert_eq!(read_front_matter(&path).title(), Some("Disk"));
    assert!(read_front_matter(&dir.path().join("absent.md")).is_empty());
    Ok(())
}
