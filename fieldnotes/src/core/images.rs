// src/core/images.rs
use crate::config::Config;
use crate::models::{ImageRef, file_name_of};
use anyhow::{Context as _, Result, bail};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("markdown image pattern is valid")
});

static HTML_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img\s+[^>]*src=["']([^"']+)["']"#).expect("img tag pattern is valid")
});

/// Finds every embedded image reference in a document.
///
/// Markdown `![alt](path)` matches come first in document order, followed by
/// `<img src="...">` matches in document order. Repeated references are kept.
#[must_use]
pub fn find_image_references(body: &str) -> Vec<ImageRef> {
    let markdown = MARKDOWN_IMAGE
        .captures_iter(body)
        .map(|caps| ImageRef::markdown(group(&caps, 1), group(&caps, 2)));
    let html = HTML_IMAGE
        .captures_iter(body)
        .map(|caps| ImageRef::html(group(&caps, 1)));
    markdown.chain(html).collect()
}

fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Rewrites local media references (`./media/x`, `media/x`, `../media/x`) to
/// `<prefix>/x`.
///
/// Only the path is replaced; alt text, tag attributes and quote style are
/// kept. Sub-folders after the media prefix are dropped, so files sharing a
/// name collide under the canonical root. Already-canonical paths never match
/// the local prefixes, which makes [`PathRewriter::rewrite`] idempotent.
#[derive(Debug, Clone)]
pub struct PathRewriter {
    markdown: Regex,
    html: Regex,
    prefix: String,
}

impl PathRewriter {
    /// # Errors
    ///
    /// Returns an error if the media folder name produces an invalid pattern,
    /// or if `url_prefix` itself starts like a local media path.
    pub fn new(media_dir_name: &str, url_prefix: &str) -> Result<Self> {
        let prefix = url_prefix.trim_end_matches('/');
        let prefix_dir = format!("{prefix}/");
        let local_prefixes = [
            format!("./{media_dir_name}/"),
            format!("../{media_dir_name}/"),
            format!("{media_dir_name}/"),
        ];
        if local_prefixes.iter().any(|local| prefix_dir.starts_with(local.as_str())) {
            bail!(
                "media_url_prefix {url_prefix:?} must not start with a local {media_dir_name}/ path"
            );
        }

        let dir = regex::escape(media_dir_name);
        let local = format!(r"\./{dir}/|\.\./{dir}/|{dir}/");

        let markdown_pattern = format!(r"!\[(.*?)\]\((?:{local})(.*?)\)");
        let markdown = Regex::new(&markdown_pattern)
            .with_context(|| format!("Invalid markdown rewrite pattern: {markdown_pattern}"))?;

        let html_pattern = format!(r#"<img(\s+[^>]*)src=(["'])(?:{local})([^"']*)["']"#);
        let html = Regex::new(&html_pattern)
            .with_context(|| format!("Invalid img rewrite pattern: {html_pattern}"))?;

        Ok(Self {
            markdown,
            html,
            prefix: prefix.to_owned(),
        })
    }

    /// # Errors
    ///
    /// See [`PathRewriter::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.media_dir_name, &config.media_url_prefix)
    }

    #[must_use]
    pub fn rewrite(&self, body: &str) -> String {
        let body = self.markdown.replace_all(body, |caps: &Captures<'_>| {
            format!(
                "![{}]({})",
                group(caps, 1),
                self.canonical_path(group(caps, 2))
            )
        });
        self.html
            .replace_all(&body, |caps: &Captures<'_>| {
                let quote = group(caps, 2);
                format!(
                    "<img{}src={quote}{}{quote}",
                    group(caps, 1),
                    self.canonical_path(group(caps, 3))
                )
            })
            .into_owned()
    }

    fn canonical_path(&self, rest: &str) -> String {
        format!("{}/{}", self.prefix, file_name_of(rest))
    }
}
