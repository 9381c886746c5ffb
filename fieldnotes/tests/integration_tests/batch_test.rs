// tests/integration_tests/batch_test.rs
use super::common::{create_test_file, note, setup_site};
use anyhow::Result;
use fieldnotes::{BatchSummary, Publisher, discover, inspect, publish_batch};

#[test]
fn test_failure_does_not_stop_batch() -> Result<()> {
    let (dir, config) = setup_site()?;
    let first = create_test_file(&config.staging_root, "one.md", &note("One", "2025-01-01", ""))?;
    let stray = create_test_file(dir.path(), "elsewhere/two.md", &note("Two", "2025-01-02", ""))?;
    let third = create_test_file(&config.staging_root, "three.md", &note("Three", "2025-01-03", ""))?;

    let publisher = Publisher::new(config.clone())?;
    let outcomes = publish_batch(&publisher, &[first, stray.clone(), third], false);

    let flags: Vec<bool> = outcomes.iter().map(|o| o.success).collect();
    assert_eq!(flags, vec![true, false, true]);
    assert_eq!(outcomes[1].source_path, stray);
    assert!(
        outcomes[1]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("must be inside the staging root"))
    );
    assert!(config.publish_root.join("one.md").is_file());
    assert!(config.publish_root.join("three.md").is_file());
    assert!(!config.publish_root.join("two.md").exists());

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary.published, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total(), 3);
    Ok(())
}

#[test]
fn test_batch_summary_totals() -> Result<()> {
    let (_dir, config) = setup_site()?;
    let a = create_test_file(&config.staging_root, "a.md", "![x](media/x.png) ![s](media/s.png)")?;
    let b = create_test_file(&config.staging_root, "b.md", &note("B", "2025-01-01", "![s](media/s.png)"))?;
    create_test_file(&config.staging_root, "media/x.png", "x")?;
    create_test_file(&config.staging_root, "media/s.png", "s")?;

    let publisher = Publisher::new(config)?;
    let outcomes = publish_batch(&publisher, &[a, b], false);
    let summary = BatchSummary::from_outcomes(&outcomes);

    assert_eq!(summary.published, 2);
    assert_eq!(summary.images_moved, 1);
    assert_eq!(summary.images_copied, 2);
    assert_eq!(summary.warnings, 2);
    Ok(())
}

#[test]
fn test_discover_and_inspect() -> Result<()> {
    let (_dir, config) = setup_site()?;
    create_test_file(
        &config.staging_root,
        "2025/spring.md",
        &note("Spring", "2025-03-20", "![a](./media/a.png)\n<img src='media/b.png'>"),
    )?;
    create_test_file(&config.staging_root, "2025/untitled.md", "just text")?;
    create_test_file(&config.staging_root, "2025/media/a.png", "a")?;
    create_test_file(&config.staging_root, ".drafts/secret.md", "hidden")?;

    let documents = discover(&config)?;
    assert_eq!(
        documents,
        vec![
            config.staging_root.join("2025/spring.md"),
            config.staging_root.join("2025/untitled.md"),
        ]
    );

    let spring = inspect(&documents[0]);
    assert_eq!(spring.front_matter.title(), Some("Spring"));
    assert_eq!(spring.image_count, 2);
    assert!(spring.warnings.is_empty());

    let untitled = inspect(&documents[1]);
    assert!(untitled.front_matter.is_empty());
    assert_eq!(untitled.warnings.len(), 2);

    let gone = inspect(&config.staging_root.join("missing.md"));
    assert_eq!(gone.image_count, 0);
    Ok(())
}
