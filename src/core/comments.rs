//! Translator annotation lookup.
//!
//! A translator annotation is a leading comment whose first non-blank text on
//! some line is the `translators:` marker (any case):
//!
//! ```js
//! // Translators: shown on the login button
//! gettext("Sign in");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::core::call_site::CallSite;
use crate::core::relocation::RelocationTable;

static TRANSLATORS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*translators:\s*(.*?)\s*$").unwrap());

/// Extract the annotation body from a single comment text.
pub fn parse_translator_comment(text: &str) -> Option<&str> {
    TRANSLATORS_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Join the annotations found in a node's leading comments, in order.
pub fn translator_comment<S: AsRef<str>>(comments: &[S]) -> Option<String> {
    let found: Vec<&str> = comments
        .iter()
        .filter_map(|text| parse_translator_comment(text.as_ref()))
        .collect();

    // An empty annotation counts as no annotation.
    let joined = found.join("\n");
    (!joined.is_empty()).then_some(joined)
}

/// Find the annotation for a call-site.
///
/// First match wins:
/// 1. comments on the call itself
/// 2. comments on the statement the call is the direct expression of
/// 3. an annotation relocated from an enclosing variable declaration
pub fn resolve_translator_comment(call: &CallSite, relocations: &RelocationTable) -> Option<String> {
    translator_comment(&call.comments)
        .or_else(|| translator_comment(&call.statement_comments))
        .or_else(|| relocations.get(call.span).map(str::to_string))
}
