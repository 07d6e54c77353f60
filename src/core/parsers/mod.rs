//! Source file parsing.
//!
//! - `jsx`: JS/JSX/TS/TSX parser (uses swc for AST generation)

pub mod jsx;
