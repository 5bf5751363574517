//! Translation store for a single gettext domain.
//!
//! A [`Domain`] is format-agnostic: the `.po` and `.mo` parsers both populate
//! one, and a decoded [`DomainSnapshot`] rebuilds one without knowing which
//! parser produced the original data.

mod snapshot;
mod translation;

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use crate::format::{sprintf, untranslated_plural};
use crate::plural::{PluralRule, default_plural_index, parse_plural_forms};

pub use snapshot::DomainSnapshot;
pub use translation::Translation;

/// Messages, context tables and plural metadata for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain {
    headers: BTreeMap<String, Vec<String>>,
    language: String,
    plural_forms: String,
    nplurals: usize,
    plural: String,
    rule: Option<PluralRule>,
    translations: HashMap<String, Translation>,
    contexts: HashMap<String, HashMap<String, Translation>>,
}

impl Domain {
    /// Creates an empty domain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a header block (`Key: Value` lines, as stored in the msgstr of
    /// the empty msgid) and applies the `Language` and `Plural-Forms` headers.
    pub fn parse_headers(&mut self, block: &str) {
        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = canonical_header_key(key.trim());
            if key.is_empty() {
                continue;
            }
            self.headers
                .entry(key)
                .or_default()
                .push(value.trim().to_owned());
        }

        if let Some(language) = self.header("Language") {
            self.language = language.to_owned();
        }
        if let Some(header) = self.header("Plural-Forms").map(str::to_owned) {
            self.apply_plural_forms(&header);
        }
    }

    fn apply_plural_forms(&mut self, header: &str) {
        self.plural_forms = header.to_owned();
        if let Some((nplurals, plural)) = parse_plural_forms(header) {
            self.nplurals = nplurals;
            self.plural = plural;
        }
        self.compile_rule();
    }

    fn compile_rule(&mut self) {
        self.rule = None;
        if self.plural.is_empty() {
            return;
        }
        match PluralRule::parse(self.nplurals, &self.plural) {
            Ok(rule) => self.rule = Some(rule),
            Err(err) => tracing::warn!(
                plural = %self.plural,
                error = %err,
                "ignoring unparsable plural expression"
            ),
        }
    }

    /// Stores `translation`, under `context` when one is given.
    ///
    /// An existing entry with the same id is replaced.
    pub fn insert(&mut self, context: Option<&str>, translation: Translation) {
        let table = match context {
            Some(context) => self.contexts.entry(context.to_owned()).or_default(),
            None => &mut self.translations,
        };
        table.insert(translation.id().to_owned(), translation);
    }

    /// First value of header `key` (canonical `Title-Case` spelling).
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All headers, keyed by canonical name.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// Value of the `Language` header.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Raw `Plural-Forms` header text.
    #[must_use]
    pub fn plural_forms(&self) -> &str {
        &self.plural_forms
    }

    /// Declared number of plural forms, `0` when undeclared.
    #[must_use]
    pub const fn nplurals(&self) -> usize {
        self.nplurals
    }

    /// Plural selector expression text.
    #[must_use]
    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Plural form index for `n`.
    #[must_use]
    pub fn plural_index(&self, n: u64) -> usize {
        self.rule
            .as_ref()
            .map_or_else(|| default_plural_index(n), |rule| rule.select(n))
    }

    /// Number of context-free messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    /// Whether the domain holds no messages at all, contextual or not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty() && self.contexts.values().all(HashMap::is_empty)
    }

    /// Context-free entry for `id`.
    #[must_use]
    pub fn translation(&self, id: &str) -> Option<&Translation> {
        self.translations.get(id)
    }

    /// Entry for `id` within `context`.
    #[must_use]
    pub fn context_translation(&self, context: &str, id: &str) -> Option<&Translation> {
        self.contexts.get(context).and_then(|table| table.get(id))
    }

    /// Translates `id`, formatting the result with `args`.
    #[must_use]
    pub fn get(&self, id: &str, args: &[&dyn Display]) -> String {
        self.translation(id)
            .map_or_else(|| sprintf(id, args), |entry| sprintf(entry.get(), args))
    }

    /// Translates the plural form of `id` selected by `n`.
    #[must_use]
    pub fn get_n(&self, id: &str, plural_id: &str, n: u64, args: &[&dyn Display]) -> String {
        self.translation(id).map_or_else(
            || untranslated_plural(id, plural_id, n, args),
            |entry| sprintf(entry.get_n(self.plural_index(n)), args),
        )
    }

    /// Translates `id` within `context`.
    #[must_use]
    pub fn get_c(&self, id: &str, context: &str, args: &[&dyn Display]) -> String {
        self.context_translation(context, id)
            .map_or_else(|| sprintf(id, args), |entry| sprintf(entry.get(), args))
    }

    /// Translates the plural form of `id` within `context`.
    #[must_use]
    pub fn get_nc(
        &self,
        id: &str,
        plural_id: &str,
        n: u64,
        context: &str,
        args: &[&dyn Display],
    ) -> String {
        self.context_translation(context, id).map_or_else(
            || untranslated_plural(id, plural_id, n, args),
            |entry| sprintf(entry.get_n(self.plural_index(n)), args),
        )
    }

    /// Every context-free message id mapped to its singular translation.
    #[must_use]
    pub fn get_all(&self) -> BTreeMap<String, String> {
        self.translations
            .iter()
            .map(|(id, entry)| (id.clone(), entry.get().to_owned()))
            .collect()
    }
}

/// Canonicalises a MIME-style header key: `content-type` becomes
/// `Content-Type`.
fn canonical_header_key(key: &str) -> String {
    key.split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}
