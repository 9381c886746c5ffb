// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a document is rejected before any file is touched.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error(
        "Source file {} must be inside the staging root {}",
        .path.display(),
        .staging_root.display()
    )]
    OutsideStaging {
        path: PathBuf,
        staging_root: PathBuf,
    },
}
