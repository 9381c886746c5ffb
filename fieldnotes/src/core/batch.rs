// src/core/batch.rs
use anyhow::Result;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::core::front_matter::parse_front_matter;
use crate::core::ignore::ExcludePatterns;
use crate::core::images::find_image_references;
use crate::core::publisher::Publisher;
use crate::core::usage::UsageCounter;
use crate::models::{FrontMatter, PublishOutcome, StagedNote};
use crate::utils::{has_extension, is_hidden};

/// Lists documents under `root` with the given extension, sorted by path.
///
/// Entries with any hidden path segment below `root` are skipped, as are
/// entries matched by `exclude`. A missing root yields an empty list, and
/// entries that cannot be read (broken links, unreadable folders) are logged
/// and left out.
#[must_use]
pub fn discover_documents(
    root: &Path,
    extension: &str,
    exclude: &ExcludePatterns,
) -> Vec<PathBuf> {
    if !root.exists() {
        debug!("Nothing to discover, {} does not exist", root.display());
        return Vec::new();
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_skip(e, root, exclude))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Could not scan entry under {}: {err}", root.display());
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            documents.push(entry.into_path());
        }
    }

    documents.sort();
    documents
}

/// Staged documents for a configuration, honoring `exclude` and the
/// staging root's ignore file.
///
/// # Errors
///
/// Returns an error on invalid exclude patterns or an unreadable ignore file.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>> {
    let exclude = ExcludePatterns::load(&config.staging_root, &config.exclude)?;
    Ok(discover_documents(
        &config.staging_root,
        &config.extension,
        &exclude,
    ))
}

fn should_skip(entry: &walkdir::DirEntry, root: &Path, exclude: &ExcludePatterns) -> bool {
    if is_hidden(entry) {
        return true;
    }
    entry
        .path()
        .strip_prefix(root)
        .is_ok_and(|relative| exclude.is_excluded(relative, entry.file_type().is_dir()))
}

/// Publishes each source in order. A failed document never stops the batch.
pub fn publish_batch<C: UsageCounter>(
    publisher: &Publisher<C>,
    sources: &[PathBuf],
    dry_run: bool,
) -> Vec<PublishOutcome> {
    sources
        .iter()
        .map(|source| {
            info!("Publishing: {}", source.display());
            publisher.publish(source, dry_run)
        })
        .collect()
}

/// Reads a staged document for listing. Unreadable files show as empty.
#[must_use]
pub fn inspect(path: &Path) -> StagedNote {
    let (front_matter, image_count) = match fs::read_to_string(path) {
        Ok(content) => (
            parse_front_matter(&content),
            find_image_references(&content).len(),
        ),
        Err(err) => {
            warn!("Could not read {}: {err}", path.display());
            (FrontMatter::new(), 0)
        }
    };
    let warnings = front_matter.missing_field_warnings();
    StagedNote {
        path: path.to_path_buf(),
        front_matter,
        image_count,
        warnings,
    }
}
