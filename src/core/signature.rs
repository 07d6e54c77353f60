//! Call-signature registry and argument extraction.
//!
//! A signature maps a function name to the roles of its positional arguments:
//!
//! ```text
//! npgettext(msgctxt, msgid, msgid_plural, count)
//! ```
//!
//! Calls are matched by their callee identifier (`gettext(...)`) or, for member
//! calls, by the property name (`i18n.gettext(...)`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::call_site::{ArgValue, Callee};

/// Semantic role of one positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgRole {
    /// Text domain. Read but never copied into the catalog.
    Domain,
    Msgctxt,
    Msgid,
    MsgidPlural,
    /// Plural count. Read but never copied into the catalog.
    Count,
}

/// Which callee name hit the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedName {
    /// `gettext("x")`
    Direct,
    /// `obj.gettext("x")`
    Property,
}

/// Result of a successful registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureMatch<'a> {
    pub roles: &'a [Option<ArgRole>],
    pub matched: MatchedName,
}

/// Function name → ordered argument roles.
///
/// A `None` role (`null` in JSON) marks a position that is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SignatureRegistry(IndexMap<String, Vec<Option<ArgRole>>>);

impl Default for SignatureRegistry {
    fn default() -> Self {
        use ArgRole::*;

        let entries: [(&str, &[ArgRole]); 8] = [
            ("gettext", &[Msgid]),
            ("dgettext", &[Domain, Msgid]),
            ("ngettext", &[Msgid, MsgidPlural, Count]),
            ("dngettext", &[Domain, Msgid, MsgidPlural, Count]),
            ("pgettext", &[Msgctxt, Msgid]),
            ("dpgettext", &[Domain, Msgctxt, Msgid]),
            ("npgettext", &[Msgctxt, Msgid, MsgidPlural, Count]),
            ("dnpgettext", &[Domain, Msgctxt, Msgid, MsgidPlural, Count]),
        ];

        Self(
            entries
                .into_iter()
                .map(|(name, roles)| (name.to_string(), roles.iter().copied().map(Some).collect()))
                .collect(),
        )
    }
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, roles: Vec<Option<ArgRole>>) {
        self.0.insert(name.into(), roles);
    }

    pub fn get(&self, name: &str) -> Option<&[Option<ArgRole>]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a callee. The direct name is tried before the property name.
    pub fn match_callee(&self, callee: &Callee) -> Option<SignatureMatch<'_>> {
        if let Some(roles) = callee.name.as_deref().and_then(|name| self.get(name)) {
            return Some(SignatureMatch {
                roles,
                matched: MatchedName::Direct,
            });
        }
        callee
            .property
            .as_deref()
            .and_then(|name| self.get(name))
            .map(|roles| SignatureMatch {
                roles,
                matched: MatchedName::Property,
            })
    }
}

/// Catalog fields read from a call's arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArgs {
    pub msgid: Option<String>,
    pub msgid_plural: Option<String>,
    pub msgctxt: Option<String>,
    /// A `msgid_plural` position was present in the call, so the entry needs
    /// plural slots.
    pub wants_plural_slots: bool,
}

/// Read catalog fields from `args` according to `roles`.
///
/// Extra arguments beyond the role list are ignored. Only non-empty string
/// literals produce values; `domain` and `count` never do.
pub fn extract_arguments(roles: &[Option<ArgRole>], args: &[ArgValue]) -> ExtractedArgs {
    let mut extracted = ExtractedArgs::default();

    for (role, arg) in roles.iter().zip(args) {
        let Some(role) = role else {
            continue;
        };
        let value = arg
            .as_literal()
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        if *role == ArgRole::MsgidPlural {
            extracted.wants_plural_slots = true;
        }
        // A position without a usable value never clears an earlier one
        let Some(value) = value else {
            continue;
        };
        match role {
            ArgRole::Domain | ArgRole::Count => {}
            ArgRole::Msgid => extracted.msgid = Some(value),
            ArgRole::Msgctxt => extracted.msgctxt = Some(value),
            ArgRole::MsgidPlural => extracted.msgid_plural = Some(value),
        }
    }

    extracted
}
