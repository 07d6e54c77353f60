//! Catalog header set and plural-rule resolution.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::ExtractError;

pub const CONTENT_TYPE: &str = "content-type";
pub const PLURAL_FORMS: &str = "plural-forms";

pub const DEFAULT_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";
pub const DEFAULT_PLURAL_FORMS: &str = "nplurals = 2; plural = (n !== 1);";

pub const DEFAULT_CHARSET: &str = "UTF-8";

static NPLURALS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nplurals ?= ?(\d)").unwrap());

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)charset\s*=\s*([\w-]+)").unwrap());

/// Read the number of plural forms from a `plural-forms` expression.
///
/// Only a single digit is recognized, e.g. `nplurals = 3; plural = ...`.
pub fn parse_nplurals(expression: &str) -> Result<usize, ExtractError> {
    NPLURALS_REGEX
        .captures(expression)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ExtractError::InvalidPluralForms {
            expression: expression.to_string(),
        })
}

/// Catalog metadata (`Content-Type`, `Plural-Forms`, ...).
///
/// Keys are stored lowercase; insertion order is kept for output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(
    from = "IndexMap<String, String>",
    into = "IndexMap<String, String>"
)]
pub struct HeaderSet {
    entries: IndexMap<String, String>,
}

impl From<IndexMap<String, String>> for HeaderSet {
    fn from(map: IndexMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HeaderSet> for IndexMap<String, String> {
    fn from(headers: HeaderSet) -> Self {
        headers.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = HeaderSet::default();
        for (key, value) in iter {
            headers.insert(key, value);
        }
        headers
    }
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of these headers with `content-type` and `plural-forms` filled in
    /// when missing.
    pub fn with_defaults(&self) -> Self {
        let mut headers = self.clone();
        if headers.get(CONTENT_TYPE).is_none() {
            headers.insert(CONTENT_TYPE, DEFAULT_CONTENT_TYPE);
        }
        if headers.get(PLURAL_FORMS).is_none() {
            headers.insert(PLURAL_FORMS, DEFAULT_PLURAL_FORMS);
        }
        headers
    }

    /// Number of plural slots required by the `plural-forms` header.
    ///
    /// A missing header means the default rule (2 forms); a present but
    /// malformed header is an error.
    pub fn nplurals(&self) -> Result<usize, ExtractError> {
        parse_nplurals(self.get(PLURAL_FORMS).unwrap_or(DEFAULT_PLURAL_FORMS))
    }

    /// Charset declared by `content-type`, or UTF-8.
    pub fn charset(&self) -> String {
        self.get(CONTENT_TYPE)
            .and_then(|value| CHARSET_REGEX.captures(value))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
    }
}
