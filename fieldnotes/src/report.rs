// src/report.rs
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::models::{BatchSummary, PublishOutcome, StagedNote};
use crate::site::render::ConversionReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Everything a `publish` run produced, in machine-readable form.
#[derive(Debug, Serialize)]
pub struct PublishReport<'a> {
    pub outcomes: &'a [PublishOutcome],
    pub summary: BatchSummary,
    pub conversion: Option<&'a ConversionReport>,
    pub index: Option<&'a Path>,
    /// Set when rendering or index generation stopped after publishing.
    pub render_error: Option<&'a str>,
}

/// Serializes `value` for the structured formats.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
        OutputFormat::Text => String::new(),
    })
}

#[must_use]
pub fn format_outcome(outcome: &PublishOutcome) -> String {
    let mut out = String::new();
    if !outcome.success {
        let error = outcome.error.as_deref().unwrap_or("unknown error");
        let _ = writeln!(out, "✗ {}: {error}", outcome.source_path.display());
        return out;
    }

    let destination = outcome
        .destination_path
        .as_ref()
        .map_or_else(String::new, |path| path.display().to_string());
    let verb = if outcome.dry_run { "Would publish" } else { "Published" };
    let _ = writeln!(out, "✓ {verb}: {} → {destination}", outcome.source_path.display());

    if outcome.images_processed() > 0 {
        let _ = writeln!(out, "  Images processed: {}", outcome.images_processed());
    }
    if !outcome.images_moved.is_empty() {
        let _ = writeln!(out, "  Images moved: {}", outcome.images_moved.join(", "));
    }
    for copied in &outcome.images_copied {
        let _ = writeln!(
            out,
            "  Image copied: {} (used in {} files)",
            copied.filename, copied.usage_count
        );
    }
    if !outcome.images_missing.is_empty() {
        let _ = writeln!(out, "  Images missing: {}", outcome.images_missing.join(", "));
    }
    if outcome.paths_updated > 0 {
        let _ = writeln!(out, "  Updated {} image path(s)", outcome.paths_updated);
    }
    for warning in &outcome.warnings {
        let _ = writeln!(out, "  ⚠ {warning}");
    }
    out
}

#[must_use]
pub fn format_summary(summary: &BatchSummary, converted: Option<usize>) -> String {
    let mut out = String::from("Summary\n");
    let _ = writeln!(out, "Files published: {}", summary.published);
    if summary.failed > 0 {
        let _ = writeln!(out, "Files failed: {}", summary.failed);
    }
    if let Some(converted) = converted {
        let _ = writeln!(out, "Files converted to HTML: {converted}");
    }
    let _ = writeln!(out, "Images moved: {}", summary.images_moved);
    let _ = writeln!(out, "Images copied: {}", summary.images_copied);
    if summary.warnings > 0 {
        let _ = writeln!(out, "Warnings: {}", summary.warnings);
    }
    out
}

#[must_use]
pub fn format_staged(notes: &[StagedNote]) -> String {
    if notes.is_empty() {
        return "No staged documents found.\n".to_owned();
    }

    let mut out = format!("Found {} staged document(s):\n\n", notes.len());
    for (idx, note) in notes.iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", idx.saturating_add(1), note.path.display());
        let _ = writeln!(out, "    Title: {}", note.front_matter.title().unwrap_or("N/A"));
        let _ = writeln!(out, "    Date: {}", note.front_matter.date().unwrap_or("N/A"));
        let _ = writeln!(out, "    Images: {} found", note.image_count);
        for warning in &note.warnings {
            let _ = writeln!(out, "    ⚠ {warning}");
        }
        out.push('\n');
    }
    out
}

#[must_use]
pub fn format_conversion(report: &ConversionReport) -> String {
    let mut out = String::new();
    for page in &report.converted {
        let _ = writeln!(out, "✓ {}", page.display());
    }
    for failed in &report.failed {
        let _ = writeln!(out, "✗ {}", failed.display());
    }
    for skipped in &report.skipped {
        let _ = writeln!(out, "- skipped {}", skipped.display());
    }
    let _ = writeln!(out, "Converted {} file(s)", report.converted.len());
    out
}
