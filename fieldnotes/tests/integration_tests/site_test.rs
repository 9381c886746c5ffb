// tests/integration_tests/site_test.rs
use super::common::{create_test_file, note, setup_site};
use anyhow::{Result, bail};
use fieldnotes::{Publisher, Renderer, convert, find_published_pages, generate_index};
use std::fs;
use std::path::Path;

/// Emits a page carrying the document's front matter as HTML metadata.
struct MetadataRenderer;

impl Renderer for MetadataRenderer {
    fn render(&self, markdown: &Path, _template: &Path, output: &Path) -> Result<()> {
        let front_matter = fieldnotes::read_front_matter(markdown);
        let Some(title) = front_matter.title() else {
            bail!("no title in {}", markdown.display());
        };
        let date = front_matter
            .date()
            .map(|d| format!("<meta name=\"date\" content=\"{d}\">"))
            .unwrap_or_default();
        fs::write(output, format!("<html><head><title>{title}</title>{date}</head></html>"))?;
        Ok(())
    }
}

#[test]
fn test_publish_convert_index() -> Result<()> {
    let (dir, config) = setup_site()?;
    let a = create_test_file(&config.staging_root, "2025/a.md", &note("Alpha", "2025-01-01", ""))?;
    let b = create_test_file(&config.staging_root, "2025/b.md", "---\ntitle: Beta\n---\n")?;
    create_test_file(&config.staging_root, "2025/c.md", "untitled")?;
    create_test_file(dir.path(), "pages/static/template.html", "$body$")?;

    let publisher = Publisher::new(config.clone())?;
    assert!(publisher.publish(&a, false).success);
    assert!(publisher.publish(&b, false).success);

    let report = convert(&config, &MetadataRenderer, None)?;
    assert_eq!(report.converted.len(), 2);
    assert!(report.failed.is_empty());

    let pages = find_published_pages(&config.index.site_root, &config.index.skip)?;
    let titles: Vec<&str> = pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Beta", "Alpha"]);
    assert_eq!(pages[1].url, "/notes/a.html");

    let index = generate_index(&config)?;
    assert_eq!(index.as_deref(), Some(config.index.output.as_path()));
    let html = fs::read_to_string(&config.index.output)?;
    assert!(html.contains("<a href=\"/notes/a.html\">Alpha</a> - 2025-01-01"));
    assert!(html.contains("<a href=\"/notes/b.html\">Beta</a> - (Draft)"));
    Ok(())
}

#[test]
fn test_renderer_failure_is_counted() -> Result<()> {
    let (_dir, config) = setup_site()?;
    create_test_file(&config.publish_root, "untitled.md", "no header")?;
    create_test_file(&config.publish_root, "titled.md", "---\ntitle: T\n---\n")?;

    let report = convert(&config, &MetadataRenderer, None)?;

    assert_eq!(report.failed, vec![config.publish_root.join("untitled.md")]);
    assert_eq!(report.converted, vec![config.render.output_dir.join("titled.html")]);
    Ok(())
}
