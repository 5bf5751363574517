//! Diagnostic logging for the `catalogctl` binary.

use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::CatalogctlError;

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "debug";

/// Builds the filter: `--verbose` forces debug, otherwise `RUST_LOG`
/// applies and falls back to warnings only.
#[must_use]
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_DIRECTIVE);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs a compact stderr subscriber as the global default.
///
/// # Errors
///
/// Returns [`CatalogctlError::Logging`] when a global subscriber is already
/// set.
pub fn init(verbose: bool) -> Result<(), CatalogctlError> {
    let console = layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(console)
        .try_init()
        .map_err(|err| CatalogctlError::Logging(err.to_string()))
}
