//! Flattened catalog handed to external translation stores.

use std::collections::HashMap;

use camino::Utf8PathBuf;
use serde::{Serialize, Serializer};
use unic_langid::LanguageIdentifier;

/// Every context-free translation of a locale, merged across domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleCatalog {
    /// Language tag of the locale.
    #[serde(serialize_with = "serialize_tag")]
    pub tag: LanguageIdentifier,
    /// Base directory the catalogs were loaded from.
    pub path: Utf8PathBuf,
    /// Message id to singular translation.
    pub translations: HashMap<String, String>,
}

fn serialize_tag<S: Serializer>(tag: &LanguageIdentifier, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(tag)
}
