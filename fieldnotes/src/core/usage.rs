// src/core/usage.rs
use crate::config::Config;
use crate::utils::has_extension;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Decides how many documents still need an image.
pub trait UsageCounter {
    fn count_usage(&self, filename: &str) -> usize;
}

/// Counts documents whose raw text contains the file name anywhere.
///
/// This is a containment check, not a reference parse: a file name mentioned
/// in prose counts too. Counts are summed over every configured root.
#[derive(Debug, Clone)]
pub struct SubstringUsageCounter {
    roots: Vec<PathBuf>,
    extension: String,
}

impl SubstringUsageCounter {
    #[inline]
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, extension: &str) -> Self {
        Self {
            roots,
            extension: extension.to_owned(),
        }
    }

    #[inline]
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.effective_usage_roots(), &config.extension)
    }
}

impl UsageCounter for SubstringUsageCounter {
    fn count_usage(&self, filename: &str) -> usize {
        self.roots
            .iter()
            .map(|root| count_usage(filename, root, &self.extension))
            .fold(0, usize::saturating_add)
    }
}

/// Counts documents under `root` whose text contains `filename`.
///
/// Unreadable documents are logged and left out of the count. A missing root
/// counts as zero.
pub fn count_usage(filename: &str, root: &Path, extension: &str) -> usize {
    if !root.exists() {
        debug!("Usage root does not exist: {}", root.display());
        return 0;
    }

    let mut count: usize = 0;
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Could not scan {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(content) if content.contains(filename) => count = count.saturating_add(1),
            Ok(_) => {}
            Err(err) => warn!("Could not read {}: {err}", entry.path().display()),
        }
    }

    debug!("{filename} is used in {count} file(s) under {}", root.display());
    count
}
