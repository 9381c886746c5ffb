// src/core/front_matter.rs
use crate::models::{FieldValue, FrontMatter};
use log::warn;
use std::fs;
use std::path::Path;

pub const DELIMITER: &str = "---";

/// Parses the header block between the first two `---` markers.
///
/// The text must start with the delimiter. Each header line holding a colon is
/// split on the first colon into key and value, both trimmed and unquoted. A
/// value written as `[a, b]` becomes a list. Anything else yields an empty
/// [`FrontMatter`]; this never fails.
#[must_use]
pub fn parse_front_matter(content: &str) -> FrontMatter {
    let mut front_matter = FrontMatter::new();
    if !content.starts_with(DELIMITER) {
        return front_matter;
    }

    let mut parts = content.splitn(3, DELIMITER);
    let (Some(_), Some(header), Some(_)) = (parts.next(), parts.next(), parts.next()) else {
        return front_matter;
    };

    for line in header.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = unquote(key.trim());
        let value = unquote(value.trim());
        front_matter.insert(key, parse_value(value));
    }

    front_matter
}

/// Reads a document and parses its front matter. Read failures are logged and
/// produce an empty mapping.
pub fn read_front_matter(path: &Path) -> FrontMatter {
    match fs::read_to_string(path) {
        Ok(content) => parse_front_matter(&content),
        Err(err) => {
            warn!("Could not parse front matter from {}: {err}", path.display());
            FrontMatter::new()
        }
    }
}

fn parse_value(value: &str) -> FieldValue {
    match value.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) if inner.trim().is_empty() => FieldValue::List(Vec::new()),
        Some(inner) => FieldValue::List(
            inner
                .split(',')
                .map(|item| unquote(item.trim()).to_owned())
                .collect(),
        ),
        None => FieldValue::Scalar(value.to_owned()),
    }
}

/// Removes one layer of matching double or single quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
