//! CLI entrypoint for `catalogctl`.

use std::io::Write;

use catalogctl::cli::Cli;
use catalogctl::config::Settings;
use catalogctl::error::CatalogctlError;
use catalogctl::{commands, logging};
use clap::Parser;

fn main() -> Result<(), CatalogctlError> {
    run()
}

fn run() -> Result<(), CatalogctlError> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose)?;
    let settings = Settings::load(&cli.global)?;
    tracing::debug!(?settings, "effective settings");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.command, &settings, &mut out)?;
    out.flush().map_err(CatalogctlError::Output)
}
