//! Binary persistence for assembled locales.
//!
//! A locale is written as a [`LocaleSnapshot`] whose `domains` field holds
//! each domain's own encoded [`DomainSnapshot`](crate::DomainSnapshot), so a
//! single domain can also be persisted or restored on its own through
//! [`Domain::to_bytes`] and [`Domain::from_bytes`]. Both layers start with a
//! [`FORMAT_VERSION`] byte; postcard data is not self-describing, so the byte
//! is checked before anything else is decoded.

use std::collections::{BTreeMap, HashMap};

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::{CatalogError, CatalogResult};
use crate::locale::{DomainRegistry, Locale};

/// Version byte written at the start of every encoded blob.
pub const FORMAT_VERSION: u8 = 1;

const CONTEXT: &str = "locale snapshot";

/// Envelope persisted for a [`Locale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSnapshot {
    /// Format version, always written first.
    pub version: u8,
    /// Base directory of the catalog tree.
    pub path: Utf8PathBuf,
    /// Simplified language identifier.
    pub language: String,
    /// Default domain name, if one was set.
    pub default_domain: Option<String>,
    /// Each domain encoded independently, keyed by name.
    pub domains: BTreeMap<String, Vec<u8>>,
}

/// Rejects blobs whose leading version byte is not [`FORMAT_VERSION`].
pub(crate) fn check_version(bytes: &[u8], context: &'static str) -> CatalogResult<()> {
    match bytes.first() {
        None => Err(CatalogError::decode(
            context,
            postcard::Error::DeserializeUnexpectedEnd,
        )),
        Some(&FORMAT_VERSION) => Ok(()),
        Some(&found) => Err(CatalogError::UnsupportedVersion {
            context: context.into(),
            found,
            expected: FORMAT_VERSION,
        }),
    }
}

/// Encodes `locale` and every loaded domain.
///
/// The registry is read under the locale's shared lock, so the blob reflects
/// one consistent state.
///
/// # Errors
///
/// Returns [`CatalogError::Encode`] when serialization fails.
pub fn encode_locale(locale: &Locale) -> CatalogResult<Vec<u8>> {
    let snapshot = locale.with_registry(|registry| -> CatalogResult<LocaleSnapshot> {
        let domains = registry
            .domains
            .iter()
            .map(|(name, domain)| Ok((name.clone(), domain.to_bytes()?)))
            .collect::<CatalogResult<BTreeMap<_, _>>>()?;
        Ok(LocaleSnapshot {
            version: FORMAT_VERSION,
            path: locale.path().to_path_buf(),
            language: locale.language().to_owned(),
            default_domain: registry.default_domain.clone(),
            domains,
        })
    })?;
    let bytes = postcard::to_stdvec(&snapshot).map_err(|err| CatalogError::encode(CONTEXT, err))?;
    tracing::debug!(
        domains = snapshot.domains.len(),
        bytes = bytes.len(),
        "encoded locale"
    );
    Ok(bytes)
}

/// Rebuilds a locale from a blob produced by [`encode_locale`].
///
/// Either every domain decodes or the call fails; no partially restored
/// locale is returned.
///
/// # Errors
///
/// Returns [`CatalogError::UnsupportedVersion`] for blobs written by another
/// format version and [`CatalogError::Decode`] for truncated or corrupt data.
pub fn decode_locale(bytes: &[u8]) -> CatalogResult<Locale> {
    check_version(bytes, CONTEXT)?;
    let snapshot: LocaleSnapshot =
        postcard::from_bytes(bytes).map_err(|err| CatalogError::decode(CONTEXT, err))?;
    let domains = snapshot
        .domains
        .iter()
        .map(|(name, blob)| Ok((name.clone(), Domain::from_bytes(blob)?)))
        .collect::<CatalogResult<HashMap<_, _>>>()?;
    tracing::debug!(language = %snapshot.language, "decoded locale");
    let registry = DomainRegistry {
        domains,
        default_domain: snapshot.default_domain,
    };
    Ok(Locale::from_registry(
        snapshot.path,
        &snapshot.language,
        registry,
    ))
}

impl Locale {
    /// Encodes the locale; see [`encode_locale`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Encode`] when serialization fails.
    pub fn to_bytes(&self) -> CatalogResult<Vec<u8>> {
        encode_locale(self)
    }

    /// Decodes a locale; see [`decode_locale`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedVersion`] or
    /// [`CatalogError::Decode`] when the blob cannot be restored.
    pub fn from_bytes(bytes: &[u8]) -> CatalogResult<Self> {
        decode_locale(bytes)
    }
}

#[cfg(test)]
mod tests;
