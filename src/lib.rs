//! potgen - gettext message extraction for JavaScript and TypeScript
//!
//! potgen scans JS/TS/JSX sources for calls to gettext-style functions
//! (`gettext`, `ngettext`, `pgettext`, ...), collects their literal
//! arguments, translator annotations and source references, and writes a
//! PO template for translators.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`extract`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (signatures, comments, catalog, session, swc visitor)
//! - `issues`: Non-fatal problems reported to the user
//! - `po_writer`: PO text rendering
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod po_writer;
pub mod utils;
