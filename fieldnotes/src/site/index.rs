// src/site/index.rs
use anyhow::{Context as _, Result};
use log::{info, warn};
use regex::Regex;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::config::Config;
use crate::utils::{has_extension, to_url_path};

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>(.*?)</title>").expect("valid title regex"));
static META_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta name="date" content="(.*?)""#).expect("valid date regex")
});

pub const NO_DATE: &str = "No date";

/// One rendered page listed on the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub title: String,
    pub date: String,
    /// Site-absolute URL, e.g. `/notes/post.html`.
    pub url: String,
    pub file: PathBuf,
}

impl PageEntry {
    #[inline]
    #[must_use]
    pub fn is_dated(&self) -> bool {
        self.date != NO_DATE
    }
}

/// Title and date of a rendered page, falling back to the file stem and
/// [`NO_DATE`].
#[must_use]
pub fn extract_metadata(html: &str, file: &Path) -> (String, String) {
    let title = TITLE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| stem_of(file), |m| m.as_str().to_owned());
    let date = META_DATE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| NO_DATE.to_owned(), |m| m.as_str().to_owned());
    (title, date)
}

fn stem_of(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Every `*.html` page under `site_root` except the `skip` names, newest
/// path first.
///
/// # Errors
///
/// Returns an error if the site root cannot be traversed.
pub fn find_published_pages(site_root: &Path, skip: &[String]) -> Result<Vec<PageEntry>> {
    if !site_root.exists() {
        warn!("Site directory not found: {}", site_root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(site_root).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to scan {}", site_root.display()))?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), "html") {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if skip.iter().any(|skipped| skipped.as_str() == name.as_ref()) {
            continue;
        }
        files.push(entry.into_path());
    }
    files.sort_by(|a, b| b.cmp(a));

    let pages = files
        .into_iter()
        .map(|file| {
            let (title, date) = match fs::read_to_string(&file) {
                Ok(html) => extract_metadata(&html, &file),
                Err(err) => {
                    warn!("Could not extract metadata from {}: {err}", file.display());
                    (stem_of(&file), NO_DATE.to_owned())
                }
            };
            let relative = file.strip_prefix(site_root).unwrap_or(&file);
            let url = format!("/{}", to_url_path(relative));
            PageEntry {
                title,
                date,
                url,
                file,
            }
        })
        .collect();
    Ok(pages)
}

/// The index page listing `pages` in the given order.
#[must_use]
pub fn render_index(title: &str, pages: &[PageEntry]) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/styles.css">
</head>
<body>
    <h1>{title}</h1>

    <h2>Available notes</h2>
    <ul>
"#
    );
    for page in pages {
        let date = if page.is_dated() { page.date.as_str() } else { "(Draft)" };
        let _ = writeln!(
            html,
            r#"        <li><a href="{}">{}</a> - {date}</li>"#,
            page.url, page.title
        );
    }
    html.push_str("    </ul>\n</body>\n</html>\n");
    html
}

/// Rebuilds the index page from the pages under the site root.
///
/// Returns the written path, or `None` when there was nothing to list.
///
/// # Errors
///
/// Returns an error if the site cannot be scanned or the index cannot be
/// written.
pub fn generate_index(config: &Config) -> Result<Option<PathBuf>> {
    let pages = find_published_pages(&config.index.site_root, &config.index.skip)?;
    if pages.is_empty() {
        info!("No published pages found");
        return Ok(None);
    }

    let output = &config.index.output;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output, render_index(&config.index.title, &pages))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Generated {} listing {} page(s)", output.display(), pages.len());
    Ok(Some(output.clone()))
}
