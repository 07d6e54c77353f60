//! Source file discovery.
//!
//! Walks the source root (or the configured `includes`), pruning ignored
//! directories instead of descending into them, and keeps JS/TS sources in
//! path order.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::{DirEntry, WalkDir};

use crate::config::{SOURCE_EXTENSIONS, TEST_FILE_PATTERNS};

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn warn(verbose: bool, message: std::fmt::Arguments<'_>) {
    if verbose {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

/// Paths excluded from a scan.
///
/// Patterns with wildcards are matched against the full path; anything else
/// is a directory or file relative to the scan root.
#[derive(Debug, Default)]
pub struct IgnoreRules {
    prefixes: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    pub fn new(root: &Path, ignores: &[String], ignore_test_files: bool, verbose: bool) -> Self {
        let mut rules = Self::default();

        for ignore in ignores {
            if !has_wildcard(ignore) {
                rules.prefixes.push(root.join(ignore));
                continue;
            }
            match Pattern::new(ignore) {
                Ok(pattern) => rules.patterns.push(pattern),
                Err(e) => warn(verbose, format_args!("Invalid ignore pattern '{}': {}", ignore, e)),
            }
        }

        if ignore_test_files {
            rules
                .patterns
                .extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }
        rules
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        let path = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path))
    }
}

/// Result of scanning files.
pub struct ScanResult {
    /// Source files in lexicographic order, so extraction order is stable.
    pub files: BTreeSet<String>,
    /// Entries that could not be read.
    pub skipped_count: usize,
}

/// Directories to walk: `root` itself, or every existing directory named by
/// `includes` (literal paths or glob patterns relative to `root`).
fn scan_roots(root: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![root.to_path_buf()];
    }

    let mut roots = Vec::new();
    for include in includes {
        let full = root.join(include);
        if !has_wildcard(include) {
            if full.exists() {
                roots.push(full);
            } else {
                warn(
                    verbose,
                    format_args!("Include path does not exist: {}", full.display()),
                );
            }
            continue;
        }
        match glob(&full.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|p| p.is_dir())),
            Err(e) => warn(verbose, format_args!("Invalid glob pattern '{}': {}", include, e)),
        }
    }
    roots
}

pub fn scan_files(
    root: &Path,
    includes: &[String],
    ignores: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanResult {
    let rules = IgnoreRules::new(root, ignores, ignore_test_files, verbose);
    let mut result = ScanResult {
        files: BTreeSet::new(),
        skipped_count: 0,
    };

    for scan_root in scan_roots(root, includes, verbose) {
        let walker = WalkDir::new(scan_root)
            .into_iter()
            .filter_entry(|entry| !rules.is_ignored(entry.path()));

        for entry in walker {
            match entry {
                Ok(entry) if is_source_file(&entry) => {
                    result
                        .files
                        .insert(entry.path().to_string_lossy().into_owned());
                }
                Ok(_) => {}
                Err(e) => {
                    result.skipped_count += 1;
                    warn(verbose, format_args!("Cannot access path: {}", e));
                }
            }
        }
    }

    result
}

fn is_source_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && is_scannable_file(entry.path())
}

/// JS/TS sources, excluding TypeScript declaration files.
fn is_scannable_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.ends_with(".d.ts") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
