//! Subcommand implementations.
//!
//! Every command writes its result to the supplied writer so the binary can
//! hand over a locked stdout while tests capture output in memory.

use std::fmt::Display;
use std::io::Write;

use locale_catalog::{CatalogError, Locale, decode_locale, encode_locale};
use unic_langid::LanguageIdentifier;

use crate::cli::{Command, GetArgs};
use crate::config::Settings;
use crate::error::CatalogctlError;
use crate::output;

/// Builds the locale described by `settings`.
///
/// A configured pack is decoded as-is; otherwise every configured domain is
/// loaded from the catalog tree in order. An explicit default domain is
/// applied last in both cases.
///
/// # Errors
///
/// Returns an error when the pack cannot be read or decoded, or when a
/// domain cannot be resolved or parsed.
pub fn load_locale(settings: &Settings) -> Result<Locale, CatalogctlError> {
    let locale = if let Some(pack) = &settings.pack {
        let bytes = output::read_pack(pack)?;
        decode_locale(&bytes)?
    } else {
        let locale = Locale::new(settings.path.clone(), &settings.language);
        for domain in &settings.domains {
            locale.add_domain(domain)?;
        }
        locale
    };
    if let Some(name) = &settings.default_domain {
        locale.set_default_domain(name);
    }
    Ok(locale)
}

/// Runs `command` against `settings`, writing its output to `out`.
///
/// # Errors
///
/// Returns an error when the locale cannot be built, the command fails or
/// the output cannot be written.
pub fn run(
    command: &Command,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), CatalogctlError> {
    match command {
        Command::Resolve { domain } => resolve(settings, domain, out),
        Command::Get(args) => {
            let locale = load_locale(settings)?;
            let text = translate(&locale, args)?;
            writeln!(out, "{text}").map_err(CatalogctlError::Output)
        }
        Command::Export { tag } => export(&load_locale(settings)?, tag.as_deref(), out),
        Command::Pack { out: destination } => {
            let locale = load_locale(settings)?;
            let bytes = encode_locale(&locale)?;
            let written = output::write_pack(destination, &bytes)?;
            writeln!(out, "{written}").map_err(CatalogctlError::Output)
        }
        Command::Domains => list_domains(&load_locale(settings)?, out),
    }
}

fn resolve(settings: &Settings, domain: &str, out: &mut dyn Write) -> Result<(), CatalogctlError> {
    let locale = Locale::new(settings.path.clone(), &settings.language);
    let path = locale
        .resolver()
        .resolve(domain)
        .ok_or_else(|| CatalogError::NotFound {
            domain: domain.to_owned(),
            language: locale.language().to_owned(),
        })?;
    writeln!(out, "{path}").map_err(CatalogctlError::Output)
}

/// Dispatches `get` to the lookup matching the given flags.
///
/// # Errors
///
/// Returns [`CatalogctlError::MissingCount`] when `--plural` is given
/// without `--count`.
pub fn translate(locale: &Locale, args: &GetArgs) -> Result<String, CatalogctlError> {
    let values: Vec<&dyn Display> = args.args.iter().map(|value| value as &dyn Display).collect();
    let id = args.msgid.as_str();
    let context = args.context.as_deref();
    let domain = args.domain.as_deref();

    let Some(plural) = args.plural.as_deref() else {
        return Ok(match (context, domain) {
            (None, None) => locale.get(id, &values),
            (None, Some(name)) => locale.get_in_domain(name, id, &values),
            (Some(ctx), None) => locale.get_context(id, ctx, &values),
            (Some(ctx), Some(name)) => locale.get_context_in_domain(name, id, ctx, &values),
        });
    };
    let n = args.count.ok_or(CatalogctlError::MissingCount)?;
    Ok(match (context, domain) {
        (None, None) => locale.get_plural(id, plural, n, &values),
        (None, Some(name)) => locale.get_plural_in_domain(name, id, plural, n, &values),
        (Some(ctx), None) => locale.get_plural_context(id, plural, n, ctx, &values),
        (Some(ctx), Some(name)) => {
            locale.get_plural_context_in_domain(name, id, plural, n, ctx, &values)
        }
    })
}

fn export(locale: &Locale, tag: Option<&str>, out: &mut dyn Write) -> Result<(), CatalogctlError> {
    let tag = match tag {
        Some(value) => value
            .parse::<LanguageIdentifier>()
            .map_err(|err| CatalogctlError::InvalidTag {
                value: value.to_owned(),
                message: err.to_string(),
            })?,
        None => locale.tag().clone(),
    };
    let catalog = locale.export_catalog(&tag)?;
    serde_json::to_writer_pretty(&mut *out, &catalog)?;
    writeln!(out).map_err(CatalogctlError::Output)
}

fn list_domains(locale: &Locale, out: &mut dyn Write) -> Result<(), CatalogctlError> {
    let default = locale.default_domain();
    for name in locale.domain_names() {
        let marker = if default.as_deref() == Some(name.as_str()) {
            '*'
        } else {
            ' '
        };
        writeln!(out, "{marker} {name}").map_err(CatalogctlError::Output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
