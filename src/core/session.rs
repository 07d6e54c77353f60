//! Extraction session: the state of one traversal.
//!
//! The host traversal feeds declarations and call-sites in source order:
//!
//! ```ignore
//! let mut session = ExtractionSession::new(SessionOptions::default())?;
//! session.visit_declaration(&declaration);
//! session.visit_call(&call_site);
//! let catalog = session.catalog();
//! ```
//!
//! The catalog is consistent after every call, so a snapshot taken at any
//! point is a valid result for everything visited so far.

use crate::core::call_site::{CallSite, Callee, Declaration, SourceLocation};
use crate::core::catalog::{AddOutcome, Catalog, Entry};
use crate::core::comments::resolve_translator_comment;
use crate::core::error::ExtractError;
use crate::core::headers::HeaderSet;
use crate::core::relocation::RelocationTable;
use crate::core::signature::{SignatureRegistry, extract_arguments};
use crate::utils::{resolve_base_directory, strip_base_directory};

pub const DEFAULT_FILE_NAME: &str = "gettext.po";

/// Settings for one extraction session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub function_names: SignatureRegistry,
    /// Identity of the output catalog.
    pub file_name: String,
    /// Header overrides; defaults are filled in per catalog.
    pub headers: HeaderSet,
    /// Prefix stripped from reference paths. `.` means the working directory.
    pub base_directory: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            function_names: SignatureRegistry::default(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            headers: HeaderSet::new(),
            base_directory: None,
        }
    }
}

/// Result of feeding one call-site to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The callee is not a registered translation function.
    Unmatched,
    /// The call matched; this is what happened to its entry.
    Matched(AddOutcome),
}

/// Counters for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub calls_matched: usize,
    /// Matched calls without a literal msgid.
    pub calls_discarded: usize,
}

pub struct ExtractionSession {
    registry: SignatureRegistry,
    base_directory: Option<String>,
    file_name: String,
    catalog: Catalog,
    relocations: RelocationTable,
    stats: SessionStats,
}

impl ExtractionSession {
    /// Start a session targeting `options.file_name`.
    ///
    /// Fails if the configured `plural-forms` header is malformed.
    pub fn new(options: SessionOptions) -> Result<Self, ExtractError> {
        let catalog = Catalog::new(&options.headers)?;
        Ok(Self {
            registry: options.function_names,
            base_directory: options.base_directory,
            file_name: options.file_name,
            catalog,
            relocations: RelocationTable::new(),
            stats: SessionStats::default(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Switch the session to another output file.
    ///
    /// If `file_name` differs from the current target, a fresh catalog is
    /// created with `headers` and the finished one is returned together with
    /// its file name. Retargeting to the current file is a no-op.
    pub fn retarget(
        &mut self,
        file_name: &str,
        headers: &HeaderSet,
    ) -> Result<Option<(String, Catalog)>, ExtractError> {
        if file_name == self.file_name {
            return Ok(None);
        }
        let catalog = Catalog::new(headers)?;
        let previous_name = std::mem::replace(&mut self.file_name, file_name.to_string());
        let previous = std::mem::replace(&mut self.catalog, catalog);
        Ok(Some((previous_name, previous)))
    }

    /// Whether `callee` names a registered translation function.
    pub fn is_translation_call(&self, callee: &Callee) -> bool {
        self.registry.match_callee(callee).is_some()
    }

    /// Start visiting a new source file.
    ///
    /// Span offsets restart in every file, so relocations recorded for the
    /// previous file are dropped.
    pub fn begin_file(&mut self) {
        self.relocations.clear();
    }

    /// Record annotations of a variable declaration for its initializers.
    pub fn visit_declaration(&mut self, declaration: &Declaration) {
        self.relocations.record_declaration(declaration);
    }

    /// Extract a call-site into the catalog.
    pub fn visit_call(&mut self, call: &CallSite) -> CallOutcome {
        let Some(signature) = self.registry.match_callee(&call.callee) else {
            return CallOutcome::Unmatched;
        };
        self.stats.calls_matched += 1;

        let args = extract_arguments(signature.roles, &call.args);
        let Some(msgid) = args.msgid else {
            self.stats.calls_discarded += 1;
            return CallOutcome::Matched(AddOutcome::Discarded);
        };

        let mut entry = Entry::new(msgid, self.reference(&call.location));
        entry.msgid_plural = args.msgid_plural;
        entry.msgctxt = args.msgctxt;
        if args.wants_plural_slots {
            entry.msgstr = vec![String::new(); self.catalog.nplurals()];
        }
        entry.comments.translator = resolve_translator_comment(call, &self.relocations);

        CallOutcome::Matched(self.catalog.add(entry))
    }

    /// `path:line`, with the base directory stripped from the path.
    fn reference(&self, location: &SourceLocation) -> String {
        let base = self.base_directory.as_deref().and_then(resolve_base_directory);
        let path = strip_base_directory(&location.file_path, base.as_deref());
        format!("{}:{}", path, location.line)
    }
}
