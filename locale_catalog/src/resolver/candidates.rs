//! Candidate-path generation and deduplication for `FileResolver`.

use std::collections::HashSet;

use camino::Utf8PathBuf;
use unic_langid::LanguageIdentifier;

use super::FileResolver;
use crate::parser::CatalogFormat;

const MESSAGES_DIR: &str = "LC_MESSAGES";

impl FileResolver {
    fn push_unique<T>(items: &mut Vec<T>, seen: &mut HashSet<String>, candidate: T)
    where
        T: AsRef<str>,
    {
        if !candidate.as_ref().is_empty() && seen.insert(candidate.as_ref().to_owned()) {
            items.push(candidate);
        }
    }

    /// Directory names tried for the locale, most specific first.
    ///
    /// For `en_US` with tag `en-US` this yields `en_US`, `en-US` and `en`.
    #[must_use]
    pub fn directory_variants(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut variants = Vec::new();
        Self::push_unique(&mut variants, &mut seen, self.language.clone());
        // An undetermined tag names no directory.
        if self.tag != LanguageIdentifier::default() {
            let tag = self.tag.to_string();
            let underscored = tag.replace('-', "_");
            Self::push_unique(&mut variants, &mut seen, tag);
            Self::push_unique(&mut variants, &mut seen, underscored);
        }
        if self.language.chars().count() > 2 {
            let short: String = self.language.chars().take(2).collect();
            Self::push_unique(&mut variants, &mut seen, short);
        }
        variants
    }

    /// Ordered candidate paths for `domain` in `format`.
    ///
    /// Every `<variant>/LC_MESSAGES/` location is listed before the bare
    /// `<variant>/` locations.
    #[must_use]
    pub fn candidates(&self, domain: &str, format: CatalogFormat) -> Vec<Utf8PathBuf> {
        let file_name = format!("{domain}.{}", format.extension());
        let variants = self.directory_variants();
        let nested = variants
            .iter()
            .map(|variant| self.path.join(variant).join(MESSAGES_DIR).join(&file_name));
        let flat = variants
            .iter()
            .map(|variant| self.path.join(variant).join(&file_name));

        let mut seen = HashSet::new();
        let mut paths = Vec::new();
        for candidate in nested.chain(flat) {
            Self::push_unique(&mut paths, &mut seen, candidate);
        }
        paths
    }
}
