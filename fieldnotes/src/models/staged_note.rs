// src/models/staged_note.rs
use super::FrontMatter;
use serde::Serialize;
use std::path::PathBuf;

/// A drafted document as shown by `fieldnotes list`.
#[derive(Debug, Clone, Serialize)]
pub struct StagedNote {
    pub path: PathBuf,
    pub front_matter: FrontMatter,
    pub image_count: usize,
    pub warnings: Vec<String>,
}
