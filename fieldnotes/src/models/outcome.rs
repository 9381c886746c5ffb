// src/models/outcome.rs
use serde::Serialize;
use std::path::{Path, PathBuf};

/// An image duplicated into the media root because other documents still use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedImage {
    pub filename: String,
    pub usage_count: usize,
}

/// Result of publishing one document. `error` is only set when `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishOutcome {
    pub success: bool,
    pub dry_run: bool,
    pub source_path: PathBuf,
    pub destination_path: Option<PathBuf>,
    pub images_moved: Vec<String>,
    pub images_copied: Vec<CopiedImage>,
    pub images_missing: Vec<String>,
    pub paths_updated: usize,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

impl PublishOutcome {
    #[inline]
    #[must_use]
    pub fn new(source_path: &Path, dry_run: bool) -> Self {
        Self {
            success: false,
            dry_run,
            source_path: source_path.to_path_buf(),
            destination_path: None,
            images_moved: Vec::new(),
            images_copied: Vec::new(),
            images_missing: Vec::new(),
            paths_updated: 0,
            warnings: Vec::new(),
            error: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn images_processed(&self) -> usize {
        self.images_moved.len().saturating_add(self.images_copied.len())
    }
}
