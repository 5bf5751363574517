//! Layered settings for `catalogctl`.
//!
//! Values are merged from lowest to highest precedence: built-in defaults,
//! the TOML configuration file, `CATALOGCTL_*` environment variables and
//! finally the command-line flags.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;
use crate::error::CatalogctlError;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "catalogctl.toml";

/// Prefix of environment variables that override settings.
pub const ENV_PREFIX: &str = "CATALOGCTL_";

/// Effective settings after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base directory holding the language directories.
    pub path: Utf8PathBuf,
    /// Language identifier of the locale.
    pub language: String,
    /// Domains to load, in order; the first becomes the default.
    pub domains: Vec<String>,
    /// Explicit default domain.
    pub default_domain: Option<String>,
    /// Persisted locale to load instead of the source catalogs.
    pub pack: Option<Utf8PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: Utf8PathBuf::from("locales"),
            language: "en_US".to_owned(),
            domains: vec!["default".to_owned()],
            default_domain: None,
            pack: None,
        }
    }
}

impl Settings {
    /// Merges defaults, configuration file, environment and `args`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogctlError::MissingConfig`] when `--config` names a
    /// file that does not exist, or [`CatalogctlError::Config`] when a layer
    /// holds a value of the wrong type.
    pub fn load(args: &GlobalArgs) -> Result<Self, CatalogctlError> {
        let file = match &args.config {
            Some(explicit) if !explicit.is_file() => {
                return Err(CatalogctlError::MissingConfig(explicit.clone()));
            }
            Some(explicit) => explicit.as_path(),
            None => Utf8Path::new(DEFAULT_CONFIG_FILE),
        };
        tracing::debug!(config = %file, "loading settings");

        let settings = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(args))
            .extract()?;
        Ok(settings)
    }
}
