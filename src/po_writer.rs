//! PO file rendering for extracted catalogs.
//!
//! Output follows the layout translators' tools expect:
//!
//! ```text
//! msgid ""
//! msgstr ""
//! "Content-Type: text/plain; charset=UTF-8\n"
//! "Plural-Forms: nplurals = 2; plural = (n !== 1);\n"
//!
//! # translator annotation
//! #: src/app.js:10
//! msgid "Hello"
//! msgstr ""
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::core::catalog::{Catalog, Entry};

/// Strings longer than this are folded onto continuation lines.
pub const FOLD_LENGTH: usize = 76;

/// Canonical spelling of well-known header names.
const KNOWN_HEADERS: &[&str] = &[
    "Project-Id-Version",
    "Report-Msgid-Bugs-To",
    "POT-Creation-Date",
    "PO-Revision-Date",
    "Last-Translator",
    "Language",
    "Language-Team",
    "MIME-Version",
    "Content-Type",
    "Content-Transfer-Encoding",
    "Plural-Forms",
];

/// `content-type` → `Content-Type`, `mime-version` → `MIME-Version`.
fn header_name(key: &str) -> String {
    if let Some(known) = KNOWN_HEADERS.iter().find(|h| h.eq_ignore_ascii_case(key)) {
        return known.to_string();
    }
    key.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\u{07}' => escaped.push_str("\\a"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0B}' => escaped.push_str("\\v"),
            '\u{0C}' => escaped.push_str("\\f"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Split a value into escaped line fragments.
///
/// Breaks after every embedded newline, and after spaces when a fragment
/// would exceed [`FOLD_LENGTH`].
fn fold(value: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for piece in value.split_inclusive('\n') {
        let mut current = String::new();
        for word in escape(piece).split_inclusive(' ') {
            if !current.is_empty() && current.len() + word.len() > FOLD_LENGTH {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Render `keyword "value"`, folding long or multi-line values.
fn push_field(out: &mut String, keyword: &str, value: &str) {
    let lines = fold(value);
    if lines.len() == 1 {
        out.push_str(&format!("{} \"{}\"\n", keyword, lines[0]));
        return;
    }
    out.push_str(&format!("{} \"\"\n", keyword));
    for line in lines {
        out.push_str(&format!("\"{}\"\n", line));
    }
}

fn render_header(catalog: &Catalog) -> String {
    let value: String = catalog
        .headers
        .iter()
        .map(|(key, value)| format!("{}: {}\n", header_name(key), value))
        .collect();

    let mut out = String::new();
    push_field(&mut out, "msgid", "");
    // The header block is always folded, one header per line.
    out.push_str("msgstr \"\"\n");
    for line in value.split_inclusive('\n') {
        out.push_str(&format!("\"{}\"\n", escape(line)));
    }
    out
}

fn render_entry(entry: &Entry) -> String {
    let mut out = String::new();

    if let Some(translator) = &entry.comments.translator {
        for line in translator.lines() {
            out.push_str(&format!("# {}\n", line));
        }
    }
    for reference in entry.references() {
        out.push_str(&format!("#: {}\n", reference));
    }

    if let Some(msgctxt) = &entry.msgctxt {
        push_field(&mut out, "msgctxt", msgctxt);
    }
    push_field(&mut out, "msgid", &entry.msgid);

    match &entry.msgid_plural {
        Some(plural) => {
            push_field(&mut out, "msgid_plural", plural);
            for (i, msgstr) in entry.msgstr.iter().enumerate() {
                push_field(&mut out, &format!("msgstr[{}]", i), msgstr);
            }
        }
        None => {
            let msgstr = entry.msgstr.first().map(String::as_str).unwrap_or_default();
            push_field(&mut out, "msgstr", msgstr);
        }
    }
    out
}

/// Render a catalog as PO text.
///
/// The header comes first, then the default context, then named contexts in
/// first-use order, each in bucket order.
pub fn compile(catalog: &Catalog) -> String {
    let blocks: Vec<String> = std::iter::once(render_header(catalog))
        .chain(
            catalog
                .contexts()
                .flat_map(|(_, bucket)| bucket.iter().map(render_entry)),
        )
        .collect();
    blocks.join("\n")
}

/// Compile and write a catalog, creating parent directories as needed.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, compile(catalog))
        .with_context(|| format!("Failed to write catalog: {}", path.display()))
}
