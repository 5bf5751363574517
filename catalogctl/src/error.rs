//! Error types for `catalogctl`.

use camino::Utf8PathBuf;
use locale_catalog::CatalogError;
use thiserror::Error;

/// Errors surfaced by the `catalogctl` commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogctlError {
    /// Layered settings could not be extracted.
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file {0} does not exist")]
    MissingConfig(Utf8PathBuf),

    /// The catalog library reported a failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// `--tag` was not a valid language identifier.
    #[error("failed to parse language tag '{value}': {message}")]
    InvalidTag {
        /// Text given on the command line.
        value: String,
        /// Parser diagnostic.
        message: String,
    },

    /// `get --plural` needs a count to choose a form.
    #[error("--plural requires --count")]
    MissingCount,

    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// Export could not be rendered as JSON.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<figment::Error> for CatalogctlError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
