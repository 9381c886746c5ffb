// src/core/ignore.rs
use anyhow::{Context as _, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::Path;

use crate::utils::to_url_path;

pub const IGNORE_FILE: &str = ".fieldnotesignore";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug)]
struct Rule {
    pattern: Pattern,
    negated: bool,
    dir_only: bool,
    /// Matched against the whole relative path instead of the entry name.
    anchored: bool,
}

impl Rule {
    fn matches(&self, relative: &Path, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        if self.anchored {
            return self
                .pattern
                .matches_with(&to_url_path(relative), MATCH_OPTIONS);
        }
        relative
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.pattern.matches_with(name, MATCH_OPTIONS))
    }
}

/// Gitignore-style exclusions applied while discovering staged documents.
///
/// Supported: `#` comments, `!` re-includes, trailing `/` for directories,
/// leading `/` or an inner `/` to anchor at the root. The last matching rule
/// wins.
#[derive(Debug, Default)]
pub struct ExcludePatterns {
    rules: Vec<Rule>,
}

impl ExcludePatterns {
    /// # Errors
    ///
    /// Returns an error if any line is not a valid glob.
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let mut patterns = Self::default();
        for line in lines {
            patterns.add_pattern(line.as_ref())?;
        }
        Ok(patterns)
    }

    /// Config patterns followed by the root's `.fieldnotesignore`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the ignore file cannot be read or holds an
    /// invalid pattern.
    pub fn load(root: &Path, extra: &[String]) -> Result<Self> {
        let mut patterns = Self::new(extra)?;
        let ignore_file = root.join(IGNORE_FILE);
        if ignore_file.is_file() {
            let content = fs::read_to_string(&ignore_file)
                .with_context(|| format!("Failed to read {}", ignore_file.display()))?;
            for line in content.lines() {
                patterns.add_pattern(line)?;
            }
        }
        Ok(patterns)
    }

    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn add_pattern(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (line, negated) = line
            .strip_prefix('!')
            .map_or((line, false), |rest| (rest, true));
        let (line, dir_only) = line
            .strip_suffix('/')
            .map_or((line, false), |rest| (rest, true));
        let (line, rooted) = line
            .strip_prefix('/')
            .map_or((line, false), |rest| (rest, true));

        let pattern =
            Pattern::new(line).with_context(|| format!("Invalid exclude pattern: {line}"))?;
        self.rules.push(Rule {
            pattern,
            negated,
            dir_only,
            anchored: rooted || line.contains('/'),
        });
        Ok(())
    }

    #[must_use]
    pub fn is_excluded(&self, relative: &Path, is_dir: bool) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(relative, is_dir))
            .is_some_and(|rule| !rule.negated)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
