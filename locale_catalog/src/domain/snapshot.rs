//! Serializable form of a [`Domain`].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{Domain, Translation};
use crate::codec::{FORMAT_VERSION, check_version};
use crate::error::{CatalogError, CatalogResult};

const CONTEXT: &str = "domain snapshot";

/// Everything needed to rebuild a [`Domain`] without its source file.
///
/// The compiled plural selector is not stored; it is recompiled from
/// `plural` when the snapshot is restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSnapshot {
    /// Format version, always written first.
    pub version: u8,
    /// Canonicalised, multi-valued headers.
    pub headers: BTreeMap<String, Vec<String>>,
    /// Value of the `Language` header.
    pub language: String,
    /// Raw `Plural-Forms` header.
    pub plural_forms: String,
    /// Declared plural form count.
    pub nplurals: usize,
    /// Plural selector expression text.
    pub plural: String,
    /// Context-free messages keyed by id.
    pub translations: BTreeMap<String, Translation>,
    /// Contextual messages keyed by context, then id.
    pub contexts: BTreeMap<String, BTreeMap<String, Translation>>,
}

impl Domain {
    /// Captures the domain's state.
    #[must_use]
    pub fn snapshot(&self) -> DomainSnapshot {
        DomainSnapshot {
            version: FORMAT_VERSION,
            headers: self.headers.clone(),
            language: self.language.clone(),
            plural_forms: self.plural_forms.clone(),
            nplurals: self.nplurals,
            plural: self.plural.clone(),
            translations: sorted(&self.translations),
            contexts: self
                .contexts
                .iter()
                .map(|(context, table)| (context.clone(), sorted(table)))
                .collect(),
        }
    }

    /// Rebuilds a domain from `snapshot`, recompiling its plural selector.
    #[must_use]
    pub fn from_snapshot(snapshot: DomainSnapshot) -> Self {
        let mut domain = Self {
            headers: snapshot.headers,
            language: snapshot.language,
            plural_forms: snapshot.plural_forms,
            nplurals: snapshot.nplurals,
            plural: snapshot.plural,
            rule: None,
            translations: snapshot.translations.into_iter().collect(),
            contexts: snapshot
                .contexts
                .into_iter()
                .map(|(context, table)| (context, table.into_iter().collect()))
                .collect(),
        };
        domain.compile_rule();
        domain
    }

    /// Encodes the domain as a versioned binary blob.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Encode`] when serialization fails.
    pub fn to_bytes(&self) -> CatalogResult<Vec<u8>> {
        postcard::to_stdvec(&self.snapshot()).map_err(|err| CatalogError::encode(CONTEXT, err))
    }

    /// Decodes a blob produced by [`Domain::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedVersion`] when the blob was written
    /// by a different format version and [`CatalogError::Decode`] when it is
    /// truncated or corrupt.
    pub fn from_bytes(bytes: &[u8]) -> CatalogResult<Self> {
        check_version(bytes, CONTEXT)?;
        let snapshot: DomainSnapshot =
            postcard::from_bytes(bytes).map_err(|err| CatalogError::decode(CONTEXT, err))?;
        Ok(Self::from_snapshot(snapshot))
    }
}

fn sorted(table: &HashMap<String, Translation>) -> BTreeMap<String, Translation> {
    table
        .iter()
        .map(|(id, entry)| (id.clone(), entry.clone()))
        .collect()
}
