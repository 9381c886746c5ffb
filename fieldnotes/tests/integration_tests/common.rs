// tests/integration_tests/common.rs
#![allow(dead_code)]

use anyhow::Result;
use fieldnotes::Config;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

pub fn note(title: &str, date: &str, body: &str) -> String {
    format!("---\ntitle: \"{title}\"\ndate: \"{date}\"\n---\n{body}\n")
}

/// A site tree with default settings rooted in a fresh temporary directory.
pub fn setup_site() -> Result<(TempDir, Config)> {
    let dir = TempDir::new()?;
    let config = Config::rooted_at(dir.path());
    fs::create_dir_all(&config.staging_root)?;
    Ok((dir, config))
}

/// Every entry under `root`; directories map to `None`.
pub fn snapshot(root: &Path) -> Result<BTreeMap<PathBuf, Option<Vec<u8>>>> {
    let mut entries = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(root)?.to_path_buf();
        let content = if entry.file_type().is_file() {
            Some(fs::read(entry.path())?)
        } else {
            None
        };
        entries.insert(relative, content);
    }
    Ok(entries)
}
