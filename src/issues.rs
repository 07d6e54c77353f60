//! Problems found while extracting, reported to the user but not fatal.

use std::fmt;

/// A source file that could not be read or parsed.
///
/// The file contributes no messages; extraction continues with the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl fmt::Display for ParseErrorIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.file_path, self.error)
    }
}
