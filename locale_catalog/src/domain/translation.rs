//! A single catalog entry and its translated forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One message: its source id, optional plural id, translated forms indexed
/// by plural form, and source references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    id: String,
    plural_id: String,
    forms: BTreeMap<usize, String>,
    refs: Vec<String>,
}

impl Translation {
    /// Creates an untranslated entry for `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the plural source id.
    #[must_use]
    pub fn with_plural_id(mut self, plural_id: impl Into<String>) -> Self {
        self.plural_id = plural_id.into();
        self
    }

    /// Sets the translated text for plural form `index` (`0` for singular).
    #[must_use]
    pub fn with_form(mut self, index: usize, text: impl Into<String>) -> Self {
        self.set_form(index, text);
        self
    }

    /// Sets the translated text for plural form `index` in place.
    pub fn set_form(&mut self, index: usize, text: impl Into<String>) {
        self.forms.insert(index, text.into());
    }

    /// Records a source reference such as `src/main.rs:42`.
    pub fn add_ref(&mut self, reference: impl Into<String>) {
        self.refs.push(reference.into());
    }

    /// Source id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Plural source id, empty when the entry is not pluralised.
    #[must_use]
    pub fn plural_id(&self) -> &str {
        &self.plural_id
    }

    /// Source references recorded for the entry.
    #[must_use]
    pub fn refs(&self) -> &[String] {
        &self.refs
    }

    /// Singular translation, or the source id when untranslated.
    #[must_use]
    pub fn get(&self) -> &str {
        self.form(0).unwrap_or(self.id.as_str())
    }

    /// Translation for plural form `index`.
    ///
    /// Falls back to the source id for form `0` and to the plural source id
    /// for every other form.
    #[must_use]
    pub fn get_n(&self, index: usize) -> &str {
        self.form(index).unwrap_or(if index == 0 {
            self.id.as_str()
        } else {
            self.plural_id.as_str()
        })
    }

    fn form(&self, index: usize) -> Option<&str> {
        self.forms
            .get(&index)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}
