// src/site/render.rs
use anyhow::{Context as _, Result, bail};
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{Config, RenderConfig};
use crate::core::batch::discover_documents;
use crate::core::ignore::ExcludePatterns;

/// Turns one published markdown file into HTML.
pub trait Renderer {
    /// # Errors
    ///
    /// Returns an error if the file could not be rendered.
    fn render(&self, markdown: &Path, template: &Path, output: &Path) -> Result<()>;
}

/// Runs `pandoc` (or a compatible program) once per file.
#[derive(Debug, Clone)]
pub struct PandocRenderer {
    program: String,
    args: Vec<String>,
}

impl PandocRenderer {
    #[inline]
    #[must_use]
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_owned(),
            args: args.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(&config.program, &config.args)
    }
}

impl Renderer for PandocRenderer {
    fn render(&self, markdown: &Path, template: &Path, output: &Path) -> Result<()> {
        let result = Command::new(&self.program)
            .arg(markdown)
            .arg(format!("--template={}", template.display()))
            .arg(format!("--output={}", output.display()))
            .args(&self.args)
            .output()
            .with_context(|| format!("Failed to execute `{}`", self.program))?;

        if !result.status.success() {
            bail!(
                "`{}` failed with {}: {}",
                self.program,
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// HTML files written.
    pub converted: Vec<PathBuf>,
    /// Markdown files the renderer rejected.
    pub failed: Vec<PathBuf>,
    /// Markdown files missing or outside the publish root.
    pub skipped: Vec<PathBuf>,
}

/// Renders published documents to `render.output_dir/<stem>.html`.
///
/// With no selection every document under the publish root is rendered.
/// Selected files must exist and sit under the publish root; others are
/// skipped with a warning. A failed file is logged and not retried.
///
/// # Errors
///
/// Returns an error if the publish root cannot be scanned or the output
/// directory cannot be created.
pub fn convert<R: Renderer + ?Sized>(
    config: &Config,
    renderer: &R,
    selection: Option<&[PathBuf]>,
) -> Result<ConversionReport> {
    let mut report = ConversionReport::default();

    let candidates = match selection {
        None => {
            if !config.publish_root.exists() {
                warn!("Markdown directory not found: {}", config.publish_root.display());
                return Ok(report);
            }
            discover_documents(
                &config.publish_root,
                &config.extension,
                &ExcludePatterns::default(),
            )
        }
        Some(files) => {
            let mut accepted = Vec::new();
            for file in files {
                if is_publishable(file, &config.publish_root) {
                    accepted.push(file.clone());
                } else {
                    warn!(
                        "Skipping {}: not found or not in {}",
                        file.display(),
                        config.publish_root.display()
                    );
                    report.skipped.push(file.clone());
                }
            }
            accepted
        }
    };

    if candidates.is_empty() {
        info!("No files to convert");
        return Ok(report);
    }

    let output_dir = &config.render.output_dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    for markdown in candidates {
        let stem = markdown
            .file_stem()
            .map_or_else(|| "index".into(), |stem| stem.to_string_lossy());
        let output = output_dir.join(format!("{stem}.html"));

        match renderer.render(&markdown, &config.render.template, &output) {
            Ok(()) => {
                info!("Converted {} to {}", markdown.display(), output.display());
                report.converted.push(output);
            }
            Err(err) => {
                warn!("Could not convert {}: {err:#}", markdown.display());
                report.failed.push(markdown);
            }
        }
    }

    Ok(report)
}

fn is_publishable(file: &Path, publish_root: &Path) -> bool {
    let (Ok(file), Ok(root)) = (file.canonicalize(), publish_root.canonicalize()) else {
        return false;
    };
    file.is_file() && file.starts_with(root)
}
