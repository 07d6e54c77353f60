//! Call-site extraction from parsed modules.
//!
//! Bridges swc's AST and the extraction session: the visitor turns
//! declarations and call expressions into engine inputs, in traversal order.

pub mod visitor;


pub use visitor::{CallSiteVisitor, FileExtraction, unwrap_expr};

use crate::core::parsers::jsx::ParsedSource;
use crate::core::session::ExtractionSession;

/// Feed every declaration and translation call of one parsed file to `session`.
///
/// `file_path` is the path recorded in references.
pub fn extract_file(
    file_path: &str,
    parsed: &ParsedSource,
    session: &mut ExtractionSession,
) -> FileExtraction {
    CallSiteVisitor::new(file_path, &parsed.source_map, &parsed.comments, session)
        .extract(&parsed.module)
}
