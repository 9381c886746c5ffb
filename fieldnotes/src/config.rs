// src/config.rs
use anyhow::{Context as _, Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::images::PathRewriter;

/// Where a published document lands relative to the publish root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Keep the subdirectory path below the staging root.
    #[default]
    Mirror,
    /// Drop subdirectories; every document lands directly in the publish root.
    Flatten,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub program: String,
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub args: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            program: "pandoc".to_owned(),
            template: PathBuf::from("pages/static/template.html"),
            output_dir: PathBuf::from("pages/notes"),
            args: vec!["--standalone".to_owned()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub site_root: PathBuf,
    pub output: PathBuf,
    pub title: String,
    /// File names never listed on the index page.
    pub skip: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("pages"),
            output: PathBuf::from("pages/index.html"),
            title: "Field Notes".to_owned(),
            skip: vec!["index.html".to_owned(), "template.html".to_owned()],
        }
    }
}

/// Settings shared by the publisher, the batch driver and the site helpers.
///
/// Relative paths are resolved against the process working directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub staging_root: PathBuf,
    pub publish_root: PathBuf,
    pub media_root: PathBuf,
    /// Prefix written into rewritten image references.
    pub media_url_prefix: String,
    /// Name of the media folder next to each staged document.
    pub media_dir_name: String,
    pub extension: String,
    pub layout: Layout,
    /// Trees searched by the usage counter. Empty means the staging root only.
    pub usage_roots: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub render: RenderConfig,
    pub index: IndexConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_root: PathBuf::from("working"),
            publish_root: PathBuf::from("markdown"),
            media_root: PathBuf::from("pages/static/media"),
            media_url_prefix: "/static/media".to_owned(),
            media_dir_name: "media".to_owned(),
            extension: "md".to_owned(),
            layout: Layout::default(),
            usage_roots: Vec::new(),
            exclude: Vec::new(),
            render: RenderConfig::default(),
            index: IndexConfig::default(),
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "fieldnotes.toml";

    /// Loads the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `fieldnotes.toml` in the
    /// working directory is used when present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this structure.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            return Self::from_file(path);
        }

        let default_path = Path::new(Self::FILE_NAME);
        if default_path.is_file() {
            return Self::from_file(default_path);
        }

        debug!("No {} found, using defaults", Self::FILE_NAME);
        Ok(Self::default())
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error on malformed TOML, unknown keys, or media settings the
    /// path rewriter cannot use.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.media_dir_name.is_empty() {
            bail!("media_dir_name must not be empty");
        }
        PathRewriter::from_config(&config)?;
        Ok(config)
    }

    /// Default settings with every path placed under `base`.
    #[must_use]
    pub fn rooted_at(base: &Path) -> Self {
        let defaults = Self::default();
        Self {
            staging_root: base.join(&defaults.staging_root),
            publish_root: base.join(&defaults.publish_root),
            media_root: base.join(&defaults.media_root),
            render: RenderConfig {
                template: base.join(&defaults.render.template),
                output_dir: base.join(&defaults.render.output_dir),
                ..defaults.render
            },
            index: IndexConfig {
                site_root: base.join(&defaults.index.site_root),
                output: base.join(&defaults.index.output),
                ..defaults.index
            },
            ..defaults
        }
    }

    /// The roots the usage counter actually scans.
    #[must_use]
    pub fn effective_usage_roots(&self) -> Vec<PathBuf> {
        if self.usage_roots.is_empty() {
            vec![self.staging_root.clone()]
        } else {
            self.usage_roots.clone()
        }
    }
}
