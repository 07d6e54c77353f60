//! Translator annotations moved from a declaration to its initializer.
//!
//! ```js
//! // translators: page title
//! const title = gettext("Dashboard");
//! ```
//!
//! The comment belongs to the `const` declaration, not to the call. When the
//! declaration is visited its annotation is recorded against the initializer's
//! span, and the call picks it up when it is visited with that exact span.
//! Later references to `title` are a different expression and get nothing.

use std::collections::HashMap;

use crate::core::call_site::{Declaration, SpanKey};
use crate::core::comments::translator_comment;

#[derive(Debug, Clone, Default)]
pub struct RelocationTable {
    entries: HashMap<SpanKey, String>,
}

impl RelocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, span: SpanKey, comment: impl Into<String>) {
        self.entries.insert(span, comment.into());
    }

    pub fn get(&self, span: SpanKey) -> Option<&str> {
        self.entries.get(&span).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all recorded spans. Spans are only comparable within one file.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record the declaration's annotation for every declarator that has an
    /// initializer but no annotation of its own.
    ///
    /// Returns the number of relocations recorded.
    pub fn record_declaration(&mut self, declaration: &Declaration) -> usize {
        let Some(comment) = translator_comment(&declaration.comments) else {
            return 0;
        };

        let mut recorded = 0;
        for declarator in &declaration.declarators {
            if translator_comment(&declarator.comments).is_some() {
                continue;
            }
            if let Some(span) = declarator.init_span {
                self.record(span, comment.clone());
                recorded += 1;
            }
        }
        recorded
    }
}
