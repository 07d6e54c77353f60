//! Extraction engine.
//!
//! - `signature`: which calls are translation calls and what their arguments mean
//! - `comments` / `relocation`: translator annotations and their precedence
//! - `headers` / `catalog`: catalog metadata and entry merging
//! - `session`: the per-traversal state fed by the AST visitor in `extract`
//! - `context`: the CLI pipeline (config, scan, parse, extract)

pub mod call_site;
pub mod catalog;
pub mod comments;
pub mod context;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod headers;
pub mod parsers;
pub mod relocation;
pub mod session;
pub mod signature;

pub use catalog::{Catalog, ContextBucket, Entry};
pub use context::{ExtractContext, ExtractOutput};
pub use error::ExtractError;
pub use session::{ExtractionSession, SessionOptions, SessionStats};
