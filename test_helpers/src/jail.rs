//! Isolated configuration environments for `catalogctl` tests.
//!
//! [`with_settings_jail`] enters a [`figment::Jail`] (a scratch working
//! directory plus environment restoration), optionally writes a
//! `catalogctl.toml` into it, exports the given variables and then runs the
//! test body.

use anyhow::{Result, anyhow};

/// File name the CLI reads when no `--config` flag is given.
pub const CONFIG_FILE: &str = "catalogctl.toml";

/// Runs `body` inside a jail seeded with `config` and `env`.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `body` fails.
pub fn with_settings_jail<F, T>(config: Option<&str>, env: &[(&str, &str)], body: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        if let Some(contents) = config {
            jail.create_file(CONFIG_FILE, contents)?;
        }
        for (key, value) in env {
            jail.set_env(key, value);
        }
        output = Some(body(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail body did not return a value"))
}
