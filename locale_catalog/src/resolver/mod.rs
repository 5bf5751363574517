//! Locates the catalog file backing a domain.
//!
//! A [`FileResolver`] expands the locale's language into directory-name
//! variants, probes `<variant>/LC_MESSAGES/<domain>.<ext>` and
//! `<variant>/<domain>.<ext>` for each format, and picks between the `.po`
//! and `.mo` hits by modification time.

mod candidates;

use std::time::SystemTime;

use camino::{Utf8Path, Utf8PathBuf};
use unic_langid::LanguageIdentifier;

use crate::parser::CatalogFormat;

/// Resolves domain names to catalog files below a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResolver {
    path: Utf8PathBuf,
    language: String,
    tag: LanguageIdentifier,
}

impl FileResolver {
    /// Creates a resolver for the simplified `language` and its parsed `tag`.
    #[must_use]
    pub fn new(
        path: impl Into<Utf8PathBuf>,
        language: impl Into<String>,
        tag: LanguageIdentifier,
    ) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
            tag,
        }
    }

    /// Base directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Simplified language identifier.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Parsed language tag.
    #[must_use]
    pub const fn tag(&self) -> &LanguageIdentifier {
        &self.tag
    }

    /// Picks the file backing `domain`, or `None` when no candidate exists.
    ///
    /// A `.po` file wins only when it is strictly newer than the `.mo` file;
    /// equal timestamps favour the compiled catalog.
    #[must_use]
    pub fn resolve(&self, domain: &str) -> Option<Utf8PathBuf> {
        let po = self.find(domain, CatalogFormat::Po);
        let mo = self.find(domain, CatalogFormat::Mo);
        let chosen = match (po, mo) {
            (Some(po), Some(mo)) => {
                if modified(&po) > modified(&mo) {
                    Some(po)
                } else {
                    Some(mo)
                }
            }
            (None, Some(mo)) => Some(mo),
            (Some(po), None) => Some(po),
            (None, None) => None,
        };
        match &chosen {
            Some(path) => tracing::debug!(domain, %path, "resolved catalog file"),
            None => tracing::debug!(domain, language = %self.language, "no catalog file found"),
        }
        chosen
    }

    /// First existing candidate for `domain` in `format`.
    #[must_use]
    pub fn find(&self, domain: &str, format: CatalogFormat) -> Option<Utf8PathBuf> {
        self.candidates(domain, format).into_iter().find(|candidate| {
            let exists = candidate.exists();
            tracing::trace!(%candidate, exists, "probed catalog candidate");
            exists
        })
    }
}

/// Modification time of `path`, or the epoch when it cannot be read.
fn modified(path: &Utf8Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
