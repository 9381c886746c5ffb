// src/models/image_ref.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefSyntax {
    /// `![alt](path)`
    Markdown,
    /// `<img ... src="path">`
    Html,
}

/// An embedded image reference as written in a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub alt: String,
    pub path: String,
    pub syntax: RefSyntax,
}

impl ImageRef {
    #[inline]
    #[must_use]
    pub fn markdown(alt: &str, path: &str) -> Self {
        Self {
            alt: alt.to_owned(),
            path: path.to_owned(),
            syntax: RefSyntax::Markdown,
        }
    }

    /// Markup tags carry no alt text.
    #[inline]
    #[must_use]
    pub fn html(path: &str) -> Self {
        Self {
            alt: String::new(),
            path: path.to_owned(),
            syntax: RefSyntax::Html,
        }
    }

    /// The last path segment, e.g. `pic.jpg` for `./media/pic.jpg`.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        file_name_of(&self.path)
    }
}

/// Last `/`-separated segment of a path as written, ignoring trailing slashes.
#[must_use]
pub fn file_name_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
