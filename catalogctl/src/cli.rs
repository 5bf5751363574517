//! Command-line interface definitions for `catalogctl`.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

/// Parsed CLI arguments for `catalogctl`.
#[derive(Debug, Parser)]
#[command(name = "catalogctl")]
#[command(about = "Resolve, query, export and pack gettext catalogs")]
#[command(version)]
pub struct Cli {
    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
///
/// Unset options are skipped when serialised so they do not mask values
/// from the configuration file or the environment.
#[derive(Debug, Clone, Default, Args, Serialize)]
pub struct GlobalArgs {
    /// Base directory holding the language directories.
    #[arg(long, global = true, value_name = "dir")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Utf8PathBuf>,
    /// Language identifier, for example `de_DE.UTF-8`.
    #[arg(long, global = true, value_name = "language")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Configuration file (defaults to `catalogctl.toml` when present).
    #[arg(long, global = true, value_name = "file")]
    #[serde(skip)]
    pub config: Option<Utf8PathBuf>,
    /// Load a persisted locale instead of the source catalogs.
    #[arg(long, global = true, value_name = "file")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack: Option<Utf8PathBuf>,
    /// Domain to load (repeat for several domains).
    #[arg(long = "domain", global = true, value_name = "name")]
    #[serde(rename = "domains", skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    /// Domain used by lookups that do not name one.
    #[arg(long, global = true, value_name = "name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_domain: Option<String>,
    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    #[serde(skip)]
    pub verbose: bool,
}

/// Subcommands understood by `catalogctl`.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the catalog file chosen for a domain.
    Resolve {
        /// Domain to resolve.
        domain: String,
    },
    /// Translate a message.
    Get(GetArgs),
    /// Print the merged catalog as JSON.
    Export {
        /// Language tag the caller expects (defaults to the locale's own).
        #[arg(long, value_name = "tag")]
        tag: Option<String>,
    },
    /// Write the loaded locale to a binary file.
    Pack {
        /// Destination file.
        #[arg(long, value_name = "file")]
        out: Utf8PathBuf,
    },
    /// List loaded domains, marking the default with `*`.
    Domains,
}

/// Arguments of the `get` subcommand.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Message identifier.
    pub msgid: String,
    /// Plural identifier; selects a form by `--count`.
    #[arg(long, value_name = "id", requires = "count")]
    pub plural: Option<String>,
    /// Count used to choose the plural form.
    #[arg(long, value_name = "n")]
    pub count: Option<u64>,
    /// Message context.
    #[arg(long, value_name = "ctx")]
    pub context: Option<String>,
    /// Domain to look in instead of the default.
    #[arg(long = "in", value_name = "domain")]
    pub domain: Option<String>,
    /// Values substituted into the translation.
    #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
