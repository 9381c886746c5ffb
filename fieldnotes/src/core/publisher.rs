// src/core/publisher.rs
use anyhow::{Context as _, Result};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{Config, Layout};
use crate::core::front_matter::parse_front_matter;
use crate::core::images::{PathRewriter, find_image_references};
use crate::core::usage::{SubstringUsageCounter, UsageCounter};
use crate::error::PublishError;
use crate::models::{CopiedImage, PublishOutcome};

/// What happens to a referenced image that exists in the staging tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    /// Only this document uses it; relocate it.
    Move,
    /// Shared with other documents, or unreferenced; leave the original.
    Copy,
}

impl ImageAction {
    #[inline]
    #[must_use]
    pub const fn classify(usage_count: usize) -> Self {
        if usage_count == 1 { Self::Move } else { Self::Copy }
    }
}

/// Moves one staged document into the publish tree.
///
/// Per document the steps run strictly in order: validate, load, discover
/// images, plan the destination, move or copy each image, rewrite paths, and
/// write the document. Nothing is rolled back if a later step fails.
#[derive(Debug)]
pub struct Publisher<C = SubstringUsageCounter> {
    config: Config,
    rewriter: PathRewriter,
    counter: C,
}

impl Publisher<SubstringUsageCounter> {
    /// # Errors
    ///
    /// Returns an error if the configured media folder name cannot be
    /// turned into a rewrite pattern.
    pub fn new(config: Config) -> Result<Self> {
        let counter = SubstringUsageCounter::from_config(&config);
        Self::with_counter(config, counter)
    }
}

impl<C: UsageCounter> Publisher<C> {
    /// # Errors
    ///
    /// See [`Publisher::new`].
    pub fn with_counter(config: Config, counter: C) -> Result<Self> {
        let rewriter = PathRewriter::from_config(&config)?;
        Ok(Self {
            config,
            rewriter,
            counter,
        })
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Publishes `source`, or with `dry_run` reports what would happen without
    /// touching the file system.
    ///
    /// Never fails: errors end up in the returned outcome with
    /// `success == false`.
    pub fn publish(&self, source: &Path, dry_run: bool) -> PublishOutcome {
        let mut outcome = PublishOutcome::new(source, dry_run);
        match self.run(source, dry_run, &mut outcome) {
            Ok(()) => outcome.success = true,
            Err(err) => {
                warn!("Failed to publish {}: {err:#}", source.display());
                outcome.error = Some(format!("{err:#}"));
            }
        }
        outcome
    }

    /// Each distinct image filename is moved or copied once per document;
    /// repeated references to it are only rewritten.
    fn run(&self, source: &Path, dry_run: bool, outcome: &mut PublishOutcome) -> Result<()> {
        let relative = self.validate(source)?;

        let content = fs::read_to_string(source)
            .with_context(|| format!("Failed to read {}", source.display()))?;
        let front_matter = parse_front_matter(&content);
        outcome.warnings.extend(front_matter.missing_field_warnings());

        let references = find_image_references(&content);
        debug!(
            "Found {} image reference(s) in {}",
            references.len(),
            source.display()
        );

        let destination = self.destination_for(&relative);
        outcome.destination_path = Some(destination.clone());
        if dry_run {
            info!(
                "[dry run] Would copy: {} -> {}",
                source.display(),
                destination.display()
            );
        }

        let media_dir = source
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&self.config.media_dir_name);
        let mut resolved = HashSet::new();
        for reference in &references {
            let filename = reference.filename();
            if !resolved.insert(filename) {
                debug!("{filename} already handled for {}", source.display());
                continue;
            }
            self.resolve_image(&media_dir, filename, dry_run, outcome)?;
        }

        let updated = self.rewriter.rewrite(&content);
        outcome.paths_updated = references.len();

        if dry_run {
            info!(
                "[dry run] Would update {} image path(s)",
                outcome.paths_updated
            );
            return Ok(());
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&destination, updated)
            .with_context(|| format!("Failed to write {}", destination.display()))?;
        info!("Published {} -> {}", source.display(), destination.display());
        Ok(())
    }

    /// Returns the source path relative to the staging root.
    fn validate(&self, source: &Path) -> Result<PathBuf> {
        if !source.exists() {
            return Err(PublishError::SourceNotFound(source.to_path_buf()).into());
        }

        let staging_root = &self.config.staging_root;
        let outside = || PublishError::OutsideStaging {
            path: source.to_path_buf(),
            staging_root: staging_root.clone(),
        };

        let source = source
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", source.display()))?;
        let staging_root = staging_root.canonicalize().map_err(|_| outside())?;
        let relative = source
            .strip_prefix(&staging_root)
            .map_err(|_| outside())?
            .to_path_buf();
        Ok(relative)
    }

    fn destination_for(&self, relative: &Path) -> PathBuf {
        match self.config.layout {
            Layout::Mirror => self.config.publish_root.join(relative),
            Layout::Flatten => relative.file_name().map_or_else(
                || self.config.publish_root.join(relative),
                |name| self.config.publish_root.join(name),
            ),
        }
    }

    fn resolve_image(
        &self,
        media_dir: &Path,
        filename: &str,
        dry_run: bool,
        outcome: &mut PublishOutcome,
    ) -> Result<()> {
        let source_image = media_dir.join(filename);
        if filename.is_empty() || !source_image.is_file() {
            let warning = format!("Image not found: {}", source_image.display());
            warn!("{warning}");
            outcome.images_missing.push(filename.to_owned());
            outcome.warnings.push(warning);
            return Ok(());
        }

        let usage_count = self.counter.count_usage(filename);
        let dest_image = self.config.media_root.join(filename);
        let action = ImageAction::classify(usage_count);

        if dry_run {
            match action {
                ImageAction::Move => info!(
                    "[dry run] Would move: {} -> {}",
                    source_image.display(),
                    dest_image.display()
                ),
                ImageAction::Copy => info!(
                    "[dry run] Would copy: {} -> {} (used in {usage_count} files)",
                    source_image.display(),
                    dest_image.display()
                ),
            }
        } else {
            fs::create_dir_all(&self.config.media_root).with_context(|| {
                format!("Failed to create {}", self.config.media_root.display())
            })?;
            match action {
                ImageAction::Move => {
                    move_file(&source_image, &dest_image)?;
                    info!("Moved {filename} (unique to this file)");
                }
                ImageAction::Copy => {
                    fs::copy(&source_image, &dest_image).with_context(|| {
                        format!(
                            "Failed to copy {} to {}",
                            source_image.display(),
                            dest_image.display()
                        )
                    })?;
                    info!("Copied {filename} (shared, used in {usage_count} files)");
                }
            }
        }

        match action {
            ImageAction::Move => outcome.images_moved.push(filename.to_owned()),
            ImageAction::Copy => outcome.images_copied.push(CopiedImage {
                filename: filename.to_owned(),
                usage_count,
            }),
        }
        Ok(())
    }
}

/// Renames, falling back to copy and delete across file systems.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            debug!("rename failed ({err}), copying {} instead", from.display());
            fs::copy(from, to)
                .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
            fs::remove_file(from)
                .with_context(|| format!("Failed to remove {}", from.display()))?;
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to move {}", from.display())),
    }
}
