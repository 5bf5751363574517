//! Tests for the subcommands against a temporary catalog tree.
#![expect(
    clippy::shadow_reuse,
    reason = "fixtures are unwrapped under their own name"
)]

use anyhow::{Context, Result, ensure};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use test_helpers::mo::{Endian, MoBuilder};
use test_helpers::tree::{Layout, LocaleTree};

use super::*;

const HELP_PO: &str = r#"msgid ""
msgstr ""
"Language: fr\n"
"Plural-Forms: nplurals=2; plural=(n > 1);\n"

msgid "Help"
msgstr "Aide"

msgctxt "menu"
msgid "Quit"
msgstr "Quitter"
"#;

/// A French tree with a compiled `app` domain and a text `help` domain.
#[fixture]
fn tree() -> Result<LocaleTree> {
    let tree = LocaleTree::new()?;
    let mo = MoBuilder::new(Endian::Little)
        .header("Language: fr\nPlural-Forms: nplurals=2; plural=(n > 1);\n")
        .message("Hello %s", "Bonjour %s")
        .plural("%d file", "%d files", &["%d fichier", "%d fichiers"])
        .context("menu", "Open", "Ouvrir")
        .build();
    tree.write_catalog("fr", Layout::Nested, "app.mo", mo)?;
    tree.write_catalog("fr_FR", Layout::Flat, "help.po", HELP_PO)?;
    Ok(tree)
}

fn settings(tree: &LocaleTree) -> Settings {
    Settings {
        path: tree.root().to_path_buf(),
        language: "fr_FR.UTF-8".to_owned(),
        domains: vec!["app".to_owned(), "help".to_owned()],
        default_domain: None,
        pack: None,
    }
}

fn run_to_string(command: &Command, settings: &Settings) -> Result<String> {
    let mut out = Vec::new();
    run(command, settings, &mut out)?;
    String::from_utf8(out).context("command output is not UTF-8")
}

fn get(msgid: &str) -> GetArgs {
    GetArgs {
        msgid: msgid.to_owned(),
        plural: None,
        count: None,
        context: None,
        domain: None,
        args: Vec::new(),
    }
}

#[rstest]
fn resolve_prints_chosen_file(tree: Result<LocaleTree>) -> Result<()> {
    let tree = tree?;
    let printed = run_to_string(
        &Command::Resolve {
            domain: "help".to_owned(),
        },
        &settings(&tree),
    )?;
    ensure!(printed == format!("{}\n", tree.root().join("fr_FR/help.po")), "printed {printed}");
    Ok(())
}

#[rstest]
fn resolve_reports_missing_domain(tree: Result<LocaleTree>) -> Result<()> {
    let tree = tree?;
    let mut out = Vec::new();
    let outcome = run(
        &Command::Resolve {
            domain: "absent".to_owned(),
        },
        &settings(&tree),
        &mut out,
    );
    ensure!(
        matches!(
            outcome,
            Err(CatalogctlError::Catalog(CatalogError::NotFound { ref domain, .. })) if domain == "absent"
        ),
        "got {outcome:?}"
    );
    ensure!(out.is_empty());
    Ok(())
}

#[rstest]
#[case::singular(get("Hello %s"), &["Zoé"], "Bonjour Zoé")]
#[case::named(GetArgs { domain: Some("help".to_owned()), ..get("Help") }, &[], "Aide")]
#[case::context(GetArgs { context: Some("menu".to_owned()), ..get("Open") }, &[], "Ouvrir")]
#[case::named_context(
    GetArgs { context: Some("menu".to_owned()), domain: Some("help".to_owned()), ..get("Quit") },
    &[],
    "Quitter"
)]
#[case::plural(
    GetArgs { plural: Some("%d files".to_owned()), count: Some(3), ..get("%d file") },
    &["3"],
    "3 fichiers"
)]
#[case::plural_one(
    GetArgs { plural: Some("%d files".to_owned()), count: Some(1), ..get("%d file") },
    &["1"],
    "1 fichier"
)]
#[case::untranslated(GetArgs { domain: Some("help".to_owned()), ..get("Hello %s") }, &["Zoé"], "Hello Zoé")]
fn get_dispatches_to_matching_lookup(
    tree: Result<LocaleTree>,
    #[case] args: GetArgs,
    #[case] values: &[&str],
    #[case] expected: &str,
) -> Result<()> {
    let tree = tree?;
    let args = GetArgs {
        args: values.iter().map(|value| (*value).to_owned()).collect(),
        ..args
    };
    let printed = run_to_string(&Command::Get(args), &settings(&tree))?;
    ensure!(printed == format!("{expected}\n"), "printed {printed}");
    Ok(())
}

#[rstest]
fn plural_without_count_is_rejected() {
    let locale = Locale::new("locales", "fr");
    let args = GetArgs {
        plural: Some("%d files".to_owned()),
        ..get("%d file")
    };
    assert!(matches!(
        translate(&locale, &args),
        Err(CatalogctlError::MissingCount)
    ));
}

#[rstest]
fn domains_marks_default(tree: Result<LocaleTree>) -> Result<()> {
    let tree = tree?;
    let mut config = settings(&tree);
    let printed = run_to_string(&Command::Domains, &config)?;
    ensure!(printed == "* app\n  help\n", "printed {printed:?}");

    config.default_domain = Some("help".to_owned());
    let redirected = run_to_string(&Command::Domains, &config)?;
    ensure!(redirected == "  app\n* help\n", "printed {redirected:?}");
    Ok(())
}

#[rstest]
fn export_prints_merged_json(tree: Result<LocaleTree>) -> Result<()> {
    let tree = tree?;
    let printed = run_to_string(&Command::Export { tag: None }, &settings(&tree))?;
    let json: serde_json::Value = serde_json::from_str(&printed)?;
    ensure!(json["tag"] == "fr-FR", "json: {json}");
    ensure!(json["translations"]["Help"] == "Aide");
    ensure!(json["translations"]["Hello %s"] == "Bonjour %s");
    Ok(())
}

#[rstest]
#[case("fr-CA")]
#[case("not a tag!")]
fn export_rejects_foreign_or_invalid_tags(
    tree: Result<LocaleTree>,
    #[case] tag: &str,
) -> Result<()> {
    let tree = tree?;
    let mut out = Vec::new();
    let outcome = run(
        &Command::Export {
            tag: Some(tag.to_owned()),
        },
        &settings(&tree),
        &mut out,
    );
    ensure!(
        matches!(
            outcome,
            Err(CatalogctlError::InvalidTag { .. }
                | CatalogctlError::Catalog(CatalogError::TagMismatch { .. }))
        ),
        "got {outcome:?}"
    );
    Ok(())
}

#[rstest]
fn pack_round_trips_through_settings(tree: Result<LocaleTree>) -> Result<()> {
    let tree = tree?;
    let destination: Utf8PathBuf = tree.root().join("out/fr.pack");
    let printed = run_to_string(
        &Command::Pack {
            out: destination.clone(),
        },
        &settings(&tree),
    )?;
    ensure!(printed == format!("{destination}\n"));

    let packed = Settings {
        path: Utf8PathBuf::from("unused"),
        domains: Vec::new(),
        pack: Some(destination),
        ..settings(&tree)
    };
    let locale = load_locale(&packed)?;
    ensure!(locale.domain_names() == ["app", "help"]);
    ensure!(locale.get("Hello %s", &[&"Zoé"]) == "Bonjour Zoé");
    ensure!(locale.get_context_in_domain("help", "Quit", "menu", &[]) == "Quitter");
    Ok(())
}

#[rstest]
fn missing_configured_domain_fails_loading(tree: Result<LocaleTree>) -> Result<()> {
    let tree = tree?;
    let config = Settings {
        domains: vec!["app".to_owned(), "absent".to_owned()],
        ..settings(&tree)
    };
    let outcome = load_locale(&config);
    ensure!(
        matches!(
            outcome,
            Err(CatalogctlError::Catalog(CatalogError::NotFound { .. }))
        ),
        "a missing domain must fail"
    );
    Ok(())
}

#[rstest]
fn missing_pack_reports_its_path(tree: Result<LocaleTree>) -> Result<()> {
    let tree = tree?;
    let absent = tree.root().join("absent.pack");
    let config = Settings {
        pack: Some(absent.clone()),
        ..settings(&tree)
    };
    let outcome = load_locale(&config);
    ensure!(
        matches!(outcome, Err(CatalogctlError::Io { ref path, .. }) if *path == absent),
        "a missing pack must name its path"
    );
    Ok(())
}
