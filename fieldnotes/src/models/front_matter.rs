// src/models/front_matter.rs
use serde::Serialize;
use std::collections::BTreeMap;

/// Fields whose absence produces a publish warning.
pub const REQUIRED_FIELDS: [&str; 2] = ["title", "date"];

/// A single front matter value: either a scalar or an inline `[a, b]` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Scalar(value) => value.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

/// Flat key/value header of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: BTreeMap<String, FieldValue>,
}

impl FrontMatter {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Later keys replace earlier ones.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(FieldValue::as_str)
    }

    #[inline]
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.get("date").and_then(FieldValue::as_str)
    }

    #[inline]
    #[must_use]
    pub fn tags(&self) -> Option<&[String]> {
        self.get("tags").and_then(FieldValue::as_list)
    }

    /// True when the key exists and holds a non-empty value.
    #[inline]
    #[must_use]
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_blank())
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Names of the required fields that are absent or empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|field| !self.has_value(field))
            .collect()
    }

    /// One warning per missing required field, as shown in publish reports.
    #[must_use]
    pub fn missing_field_warnings(&self) -> Vec<String> {
        self.missing_fields()
            .into_iter()
            .map(|field| format!("Missing '{field}' in front matter"))
            .collect()
    }
}
