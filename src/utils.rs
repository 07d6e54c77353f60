//! Common utility functions shared across the codebase.

use std::env;

/// Normalize a configured base directory into a prefix ending in `/`.
///
/// `.` resolves to the current working directory at call time; any other
/// value has its trailing slashes trimmed before one `/` is appended.
/// Returns `None` if the working directory cannot be determined.
///
/// # Examples
///
/// ```
/// use potgen::utils::resolve_base_directory;
///
/// assert_eq!(resolve_base_directory("/srv/app///").as_deref(), Some("/srv/app/"));
/// assert_eq!(resolve_base_directory("src").as_deref(), Some("src/"));
/// assert_eq!(resolve_base_directory("/").as_deref(), Some("/"));
/// ```
pub fn resolve_base_directory(base: &str) -> Option<String> {
    if base == "." {
        let cwd = env::current_dir().ok()?;
        let cwd = cwd.to_string_lossy();
        return Some(format!("{}/", cwd.trim_end_matches('/')));
    }
    Some(format!("{}/", base.trim_end_matches('/')))
}

/// Strip `base` from the start of `path` if it is a prefix.
///
/// # Examples
///
/// ```
/// use potgen::utils::strip_base_directory;
///
/// assert_eq!(strip_base_directory("/srv/app/src/a.js", Some("/srv/app/")), "src/a.js");
/// assert_eq!(strip_base_directory("/other/a.js", Some("/srv/app/")), "/other/a.js");
/// assert_eq!(strip_base_directory("a.js", None), "a.js");
/// ```
pub fn strip_base_directory<'a>(path: &'a str, base: Option<&str>) -> &'a str {
    match base {
        Some(base) => path.strip_prefix(base).unwrap_or(path),
        None => path,
    }
}
