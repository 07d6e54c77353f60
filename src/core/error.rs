use thiserror::Error;

/// Errors raised by the extraction engine.
///
/// Per-call problems (unknown callee, missing msgid, non-literal arguments) are
/// never errors; they simply produce no entry. Only configuration that would
/// corrupt every later entry is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The `plural-forms` header has no `nplurals = <digit>` clause.
    #[error("Invalid plural-forms header: \"{expression}\" (expected `nplurals = <digit>`)")]
    InvalidPluralForms { expression: String },
}
