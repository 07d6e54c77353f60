//! Engine-facing view of the syntax tree.
//!
//! The session never sees swc types. The visitor in `crate::core::extract`
//! lowers declarations and call expressions into the plain structs below,
//! which keeps the engine testable without parsing any source.

use swc_common::Span;

/// Structural span of an expression: byte offsets of its first and last token.
///
/// Two nodes are "the same expression" for alias relocation purposes only if
/// their spans are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanKey {
    pub lo: u32,
    pub hi: u32,
}

impl SpanKey {
    pub fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }
}

impl From<Span> for SpanKey {
    fn from(span: Span) -> Self {
        Self::new(span.lo.0, span.hi.0)
    }
}

/// Position of a call-site in a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    /// 1-based line number.
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

/// Names under which a call's callee can be looked up in the registry.
///
/// - `gettext("x")` → `name: Some("gettext")`
/// - `i18n.gettext("x")` → `property: Some("gettext")`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Callee {
    pub name: Option<String>,
    pub property: Option<String>,
}

impl Callee {
    pub fn ident(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            property: None,
        }
    }

    pub fn member(property: impl Into<String>) -> Self {
        Self {
            name: None,
            property: Some(property.into()),
        }
    }
}

/// Statically known value of one call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A string literal.
    Literal(String),
    /// Anything else: identifiers, template strings, calls, spreads...
    Dynamic,
}

impl ArgValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            ArgValue::Literal(value) => Some(value),
            ArgValue::Dynamic => None,
        }
    }
}

/// A call expression as seen by the extraction session.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub callee: Callee,
    pub args: Vec<ArgValue>,
    pub location: SourceLocation,
    pub span: SpanKey,
    /// Leading comment texts attached directly to the call.
    pub comments: Vec<String>,
    /// Leading comment texts of the enclosing statement, when the call is that
    /// statement's direct expression.
    pub statement_comments: Vec<String>,
}

/// One declarator of a variable declaration.
#[derive(Debug, Clone, Default)]
pub struct Declarator {
    pub comments: Vec<String>,
    /// Span of the initializer expression (parentheses looked through).
    pub init_span: Option<SpanKey>,
}

/// A `var`/`let`/`const` declaration as seen by the extraction session.
#[derive(Debug, Clone, Default)]
pub struct Declaration {
    pub comments: Vec<String>,
    pub declarators: Vec<Declarator>,
}
