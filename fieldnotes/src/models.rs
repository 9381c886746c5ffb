// src/models.rs
mod batch_summary;
mod front_matter;
mod image_ref;
mod outcome;
mod staged_note;

pub use batch_summary::BatchSummary;
pub use front_matter::{FieldValue, FrontMatter, REQUIRED_FIELDS};
pub use image_ref::{ImageRef, RefSyntax, file_name_of};
pub use outcome::{CopiedImage, PublishOutcome};
pub use staged_note::StagedNote;
