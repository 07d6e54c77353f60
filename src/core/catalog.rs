//! Catalog data structure and the insert-or-merge algorithm.
//!
//! # Ordering
//!
//! Every insert or merge re-sorts the affected context bucket by the lowercase
//! reference string of its entries. The resulting key order depends only on
//! the (msgid, reference) pairs seen so far, never on traversal order, so
//! re-running extraction over the same sources gives identical output.

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::core::error::ExtractError;
use crate::core::headers::HeaderSet;

/// Separator between references of one entry.
pub const REFERENCE_SEPARATOR: char = '\n';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comments {
    /// Newline-joined, sorted, deduplicated `path:line` references.
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator: Option<String>,
}

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub msgid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgid_plural: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgctxt: Option<String>,
    /// Empty for singular entries; `nplurals` empty slots for plural entries.
    pub msgstr: Vec<String>,
    pub comments: Comments,
}

impl Entry {
    pub fn new(msgid: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            msgid: msgid.into(),
            msgid_plural: None,
            msgctxt: None,
            msgstr: Vec::new(),
            comments: Comments {
                reference: reference.into(),
                translator: None,
            },
        }
    }

    /// Iterate over this entry's individual references.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.comments.reference.split(REFERENCE_SEPARATOR)
    }

    /// Add a reference, keeping the list sorted and free of duplicates.
    ///
    /// Returns false if the reference was already present.
    fn add_reference(&mut self, reference: &str) -> bool {
        let mut refs: Vec<&str> = self.references().collect();
        if refs.contains(&reference) {
            return false;
        }
        refs.push(reference);
        refs.sort_unstable();
        self.comments.reference = refs.join("\n");
        true
    }
}

/// What happened to a candidate entry handed to [`Catalog::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was created.
    Inserted,
    /// The reference was appended to an existing entry.
    Merged,
    /// The existing entry already listed this reference.
    Unchanged,
    /// The candidate had an empty msgid and was dropped.
    Discarded,
}

/// Entries sharing one message context, keyed by msgid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContextBucket {
    entries: IndexMap<String, Entry>,
}

impl ContextBucket {
    pub fn get(&self, msgid: &str) -> Option<&Entry> {
        self.entries.get(msgid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn msgids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add(&mut self, entry: Entry) -> AddOutcome {
        let outcome = match self.entries.get_mut(&entry.msgid) {
            Some(existing) => {
                if existing.add_reference(&entry.comments.reference) {
                    AddOutcome::Merged
                } else {
                    AddOutcome::Unchanged
                }
            }
            None if entry.msgid.is_empty() => return AddOutcome::Discarded,
            None => {
                self.entries.insert(entry.msgid.clone(), entry);
                AddOutcome::Inserted
            }
        };
        self.sort_by_reference();
        outcome
    }

    /// Sort by lowercase reference, ascending; equal references by msgid.
    fn sort_by_reference(&mut self) {
        self.entries.sort_by(|_, a, _, b| {
            a.comments
                .reference
                .to_lowercase()
                .cmp(&b.comments.reference.to_lowercase())
                .then_with(|| a.msgid.cmp(&b.msgid))
        });
    }
}

/// All messages extracted for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub charset: String,
    pub headers: HeaderSet,
    nplurals: usize,
    default_context: ContextBucket,
    /// Named contexts in order of first use.
    contexts: IndexMap<String, ContextBucket>,
}

impl Catalog {
    /// Create an empty catalog, filling in default headers.
    ///
    /// Fails if the `plural-forms` header cannot be parsed.
    pub fn new(headers: &HeaderSet) -> Result<Self, ExtractError> {
        let headers = headers.with_defaults();
        let nplurals = headers.nplurals()?;
        Ok(Self {
            charset: headers.charset(),
            headers,
            nplurals,
            default_context: ContextBucket::default(),
            contexts: IndexMap::new(),
        })
    }

    /// Plural slot count parsed from the headers at creation time.
    pub fn nplurals(&self) -> usize {
        self.nplurals
    }

    /// Insert a candidate entry or merge its reference into an existing one.
    ///
    /// The bucket is chosen by `entry.msgctxt`. A named bucket is only created
    /// when something is actually stored in it.
    pub fn add(&mut self, entry: Entry) -> AddOutcome {
        if entry.msgid.is_empty() {
            return AddOutcome::Discarded;
        }
        match entry.msgctxt.clone() {
            Some(ctx) => self.contexts.entry(ctx).or_default().add(entry),
            None => self.default_context.add(entry),
        }
    }

    /// The bucket for `msgctxt`, or the default bucket for `None`.
    pub fn context(&self, msgctxt: Option<&str>) -> Option<&ContextBucket> {
        match msgctxt {
            Some(ctx) => self.contexts.get(ctx),
            None => Some(&self.default_context),
        }
    }

    /// Look up an entry by context and msgid.
    pub fn get(&self, msgctxt: Option<&str>, msgid: &str) -> Option<&Entry> {
        self.context(msgctxt).and_then(|bucket| bucket.get(msgid))
    }

    /// All buckets: the default one first, then named contexts in first-use order.
    pub fn contexts(&self) -> impl Iterator<Item = (Option<&str>, &ContextBucket)> {
        std::iter::once((None, &self.default_context)).chain(
            self.contexts
                .iter()
                .map(|(name, bucket)| (Some(name.as_str()), bucket)),
        )
    }

    /// Total number of entries across all contexts.
    pub fn message_count(&self) -> usize {
        self.contexts().map(|(_, bucket)| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.message_count() == 0
    }
}

/// Serialized as `{charset, headers, translations: {<msgctxt>: {<msgid>: entry}}}`
/// with the default context under the empty key.
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Translations<'a>(&'a Catalog);

        impl Serialize for Translations<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(None)?;
                for (name, bucket) in self.0.contexts() {
                    map.serialize_entry(name.unwrap_or(""), bucket)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("charset", &self.charset)?;
        map.serialize_entry("headers", &self.headers)?;
        map.serialize_entry("translations", &Translations(self))?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::catalog::*;
    use crate::po_writer::compile;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::new(&HeaderSet::new()).unwrap()
    }

    fn keys(catalog: &Catalog, ctx: Option<&str>) -> Vec<String> {
        catalog
            .context(ctx)
            .unwrap()
            .msgids()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_new_catalog_has_default_headers() {
        let catalog = catalog();
        assert_eq!(catalog.charset, "UTF-8");
        assert_eq!(catalog.nplurals(), 2);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_new_catalog_rejects_bad_plural_forms() {
        let headers: HeaderSet = [("plural-forms", "plural=(n != 1);")].into_iter().collect();
        assert!(matches!(
            Catalog::new(&headers),
            Err(ExtractError::InvalidPluralForms { .. })
        ));
    }

    #[test]
    fn test_insert_then_merge_references() {
        let mut catalog = catalog();
        assert_eq!(catalog.add(Entry::new("Hello", "a.js:20")), AddOutcome::Inserted);
        assert_eq!(catalog.add(Entry::new("Hello", "a.js:10")), AddOutcome::Merged);
        assert_eq!(catalog.add(Entry::new("Hello", "a.js:20")), AddOutcome::Unchanged);

        let entry = catalog.get(None, "Hello").unwrap();
        assert_eq!(entry.comments.reference, "a.js:10\na.js:20");
        assert_eq!(catalog.message_count(), 1);
    }

    #[test]
    fn test_merge_sorts_case_sensitively() {
        let mut catalog = catalog();
        catalog.add(Entry::new("Hi", "b.js:1"));
        catalog.add(Entry::new("Hi", "B.js:1"));
        catalog.add(Entry::new("Hi", "a.js:1"));

        let entry = catalog.get(None, "Hi").unwrap();
        assert_eq!(entry.comments.reference, "B.js:1\na.js:1\nb.js:1");
    }

    #[test]
    fn test_merge_keeps_first_translator_comment() {
        let mut catalog = catalog();
        let mut first = Entry::new("Save", "a.js:1");
        first.comments.translator = Some("first".to_string());
        let mut second = Entry::new("Save", "b.js:1");
        second.comments.translator = Some("second".to_string());

        catalog.add(first);
        catalog.add(second);

        let entry = catalog.get(None, "Save").unwrap();
        assert_eq!(entry.comments.translator.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_msgid_is_discarded() {
        let mut catalog = catalog();
        let mut entry = Entry::new("", "a.js:1");
        entry.msgctxt = Some("menu".to_string());

        assert_eq!(catalog.add(entry), AddOutcome::Discarded);
        assert!(catalog.is_empty());
        assert!(catalog.context(Some("menu")).is_none());
    }

    #[test]
    fn test_contexts_are_separate_buckets() {
        let mut catalog = catalog();
        let mut in_menu = Entry::new("Open", "a.js:2");
        in_menu.msgctxt = Some("menu".to_string());
        catalog.add(in_menu);
        catalog.add(Entry::new("Open", "a.js:1"));

        assert_eq!(catalog.message_count(), 2);
        assert_eq!(catalog.get(Some("menu"), "Open").unwrap().comments.reference, "a.js:2");
        assert_eq!(catalog.get(None, "Open").unwrap().comments.reference, "a.js:1");

        let names: Vec<Option<&str>> = catalog.contexts().map(|(name, _)| name).collect();
        assert_eq!(names, vec![None, Some("menu")]);
    }

    #[test]
    fn test_bucket_order_is_by_lowercase_reference() {
        let mut catalog = catalog();
        catalog.add(Entry::new("zeta", "src/Z.js:1"));
        catalog.add(Entry::new("alpha", "src/b.js:1"));
        catalog.add(Entry::new("beta", "src/a.js:9"));

        assert_eq!(keys(&catalog, None), vec!["beta", "alpha", "zeta"]);
    }

    #[test]
    fn test_order_is_independent_of_insertion_order() {
        let pairs = [
            ("One", "x.js:3"),
            ("Two", "a.js:7"),
            ("One", "m.js:1"),
            ("Three", "c.js:2"),
        ];

        let mut forward = catalog();
        for (msgid, reference) in pairs {
            forward.add(Entry::new(msgid, reference));
        }
        let mut backward = catalog();
        for (msgid, reference) in pairs.iter().rev() {
            backward.add(Entry::new(*msgid, *reference));
        }

        assert_eq!(forward, backward);
        assert_eq!(keys(&forward, None), vec!["Two", "Three", "One"]);
        assert_eq!(keys(&backward, None), keys(&forward, None));
    }

    #[test]
    fn test_same_reference_orders_by_msgid() {
        let mut forward = catalog();
        forward.add(Entry::new("b", "a.js:1"));
        forward.add(Entry::new("a", "a.js:1"));

        let mut reversed = catalog();
        reversed.add(Entry::new("a", "a.js:1"));
        reversed.add(Entry::new("b", "a.js:1"));

        assert_eq!(keys(&forward, None), vec!["a", "b"]);
        assert_eq!(keys(&reversed, None), keys(&forward, None));
        assert_eq!(compile(&forward), compile(&reversed));
    }

    #[test]
    fn test_serialize_shape() {
        let mut catalog = catalog();
        let mut entry = Entry::new("Open", "a.js:1");
        entry.msgctxt = Some("menu".to_string());
        catalog.add(entry);
        catalog.add(Entry::new("Hello", "a.js:2"));

        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["charset"], "UTF-8");
        assert_eq!(json["headers"]["plural-forms"], "nplurals = 2; plural = (n !== 1);");
        assert_eq!(json["translations"][""]["Hello"]["comments"]["reference"], "a.js:2");
        assert_eq!(json["translations"]["menu"]["Open"]["msgctxt"], "menu");
        assert!(json["translations"][""]["Hello"]["comments"].get("translator").is_none());
    }
}
