//! Primary error enum for catalog loading and persistence.

use std::borrow::Cow;

use camino::Utf8PathBuf;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Result alias used throughout the crate.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading or persisting translation catalogs.
///
/// Lookups never produce these: a missing domain or message degrades to
/// formatting the untranslated key instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// No `.po` or `.mo` file exists for the domain under any candidate path.
    #[error("no .po or .mo file found for domain '{domain}' (language '{language}')")]
    NotFound {
        /// Domain that was requested.
        domain: String,
        /// Simplified language identifier of the locale.
        language: String,
    },

    /// The resolved path names a directory.
    #[error("cannot parse a directory: '{path}'")]
    IsDirectory {
        /// Offending path.
        path: Utf8PathBuf,
    },

    /// The file extension does not map to a known catalog format.
    #[error("unsupported catalog file type: '{path}'")]
    UnsupportedFormat {
        /// Offending path.
        path: Utf8PathBuf,
    },

    /// Reading catalog data from the filesystem failed.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Path being read.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// Compiled catalog data could not be interpreted.
    #[error("malformed catalog data{}: {message}", describe_origin(.path))]
    Malformed {
        /// File the data came from, when known.
        path: Option<Utf8PathBuf>,
        /// Description of the defect.
        message: String,
    },

    /// A persisted blob could not be decoded.
    #[error("failed to decode {context}: {source}")]
    Decode {
        /// What was being decoded.
        context: Cow<'static, str>,
        /// Error reported by the binary codec.
        #[source]
        source: postcard::Error,
    },

    /// A persisted blob was written with a different format version.
    #[error("unsupported {context} format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// What was being decoded.
        context: Cow<'static, str>,
        /// Version byte found in the blob.
        found: u8,
        /// Version this build understands.
        expected: u8,
    },

    /// A catalog could not be encoded.
    #[error("failed to encode {context}: {source}")]
    Encode {
        /// What was being encoded.
        context: Cow<'static, str>,
        /// Error reported by the binary codec.
        #[source]
        source: postcard::Error,
    },

    /// Export was requested for a language other than the locale's own.
    #[error("language tags do not match: {expected} != {requested}")]
    TagMismatch {
        /// Tag of the locale.
        expected: LanguageIdentifier,
        /// Tag supplied by the caller.
        requested: LanguageIdentifier,
    },
}

fn describe_origin(path: &Option<Utf8PathBuf>) -> String {
    path.as_ref()
        .map_or_else(String::new, |origin| format!(" in '{origin}'"))
}
