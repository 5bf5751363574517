//! Tests for the locale façade: registry rules, fallbacks and export.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface broken fixtures"
)]

use anyhow::{Result, ensure};
use rstest::{fixture, rstest};
use test_helpers::mo::{Endian, MoBuilder};
use test_helpers::tree::{Layout, LocaleTree};
use unic_langid::langid;

use super::*;
use crate::domain::Translation;
use crate::parser::PoParser;

/// Parser wrapper around a hand-built domain.
struct Prebuilt(Domain);

impl CatalogParser for Prebuilt {
    fn parse(&mut self, _data: &[u8]) -> CatalogResult<()> {
        Ok(())
    }

    fn domain(&self) -> &Domain {
        &self.0
    }

    fn into_domain(self: Box<Self>) -> Domain {
        self.0
    }
}

fn domain_with(entries: &[(&str, &str)]) -> Box<dyn CatalogParser> {
    let mut domain = Domain::new();
    for (id, text) in entries {
        domain.insert(None, Translation::new(*id).with_form(0, *text));
    }
    Box::new(Prebuilt(domain))
}

#[fixture]
fn locale() -> Locale {
    let locale = Locale::new("locales", "es_ES");
    locale.add_parsed_domain("main", domain_with(&[("Hello", "Hola"), ("Bye", "Adiós")]));
    locale.add_parsed_domain("extra", domain_with(&[("Hello", "Buenas"), ("Yes", "Sí")]));
    locale
}

#[rstest]
fn first_added_domain_becomes_default(locale: Locale) {
    assert_eq!(locale.default_domain().as_deref(), Some("main"));
    assert_eq!(locale.get("Hello", &[]), "Hola");
}

#[rstest]
fn set_default_domain_redirects_default_lookups(locale: Locale) {
    locale.set_default_domain("extra");
    assert_eq!(locale.get("Hello", &[]), "Buenas");
    locale.add_parsed_domain("later", domain_with(&[("Hello", "Ey")]));
    assert_eq!(locale.default_domain().as_deref(), Some("extra"));
}

#[rstest]
fn default_may_name_an_unloaded_domain(locale: Locale) {
    locale.set_default_domain("ghost");
    assert_eq!(locale.get("Hello %s", &[&"Ana"]), "Hello Ana");
}

#[rstest]
fn named_lookups_fall_back_to_formatting(locale: Locale) {
    assert_eq!(locale.get_in_domain("extra", "Yes", &[]), "Sí");
    assert_eq!(locale.get_in_domain("missing", "Hi %s", &[&"Ana"]), "Hi Ana");
    assert_eq!(
        locale.get_context_in_domain("missing", "Open", "menu", &[]),
        "Open"
    );
}

#[rstest]
#[case(1, "1 cat")]
#[case(0, "0 cats")]
#[case(7, "7 cats")]
fn missing_domain_plurals_use_germanic_rule(#[case] n: u64, #[case] expected: &str) {
    let locale = Locale::new("locales", "es");
    assert_eq!(locale.get_plural("%d cat", "%d cats", n, &[&n]), expected);
    assert_eq!(
        locale.get_plural_context("%d cat", "%d cats", n, "pets", &[&n]),
        expected
    );
    assert_eq!(
        locale.get_plural_in_domain("zoo", "%d cat", "%d cats", n, &[&n]),
        expected
    );
    assert_eq!(
        locale.get_plural_context_in_domain("zoo", "%d cat", "%d cats", n, "pets", &[&n]),
        expected
    );
}

#[rstest]
fn lookups_without_args_return_text_verbatim() {
    let locale = Locale::new("locales", "es");
    assert_eq!(locale.get("100%", &[]), "100%");
    assert_eq!(locale.get_context("50% off", "shop", &[]), "50% off");
}

#[rstest]
fn contextual_lookups_use_loaded_domain() -> Result<()> {
    let locale = Locale::new("locales", "es");
    let mut parser = PoParser::new();
    parser.parse(
        br#"msgctxt "menu"
msgid "File"
msgstr "Archivo"

msgctxt "menu"
msgid "%d file"
msgid_plural "%d files"
msgstr[0] "%d archivo"
msgstr[1] "%d archivos"
"#,
    )?;
    locale.add_parsed_domain("ui", Box::new(parser));
    ensure!(locale.get_context("File", "menu", &[]) == "Archivo");
    ensure!(locale.get_context_in_domain("ui", "File", "toolbar", &[]) == "File");
    ensure!(locale.get_plural_context("%d file", "%d files", 4, "menu", &[&4]) == "4 archivos");
    Ok(())
}

#[rstest]
fn deeply_nested_plural_header_still_loads() -> Result<()> {
    let expression = format!("{}n{}", "(".repeat(2_000), ")".repeat(2_000));
    let catalog = format!(
        "msgid \"\"\nmsgstr \"Plural-Forms: nplurals=2; plural={expression};\\n\"\n\n\
         msgid \"%d cat\"\nmsgid_plural \"%d cats\"\nmsgstr[0] \"%d gato\"\nmsgstr[1] \"%d gatos\"\n"
    );
    let mut parser = PoParser::new();
    parser.parse(catalog.as_bytes())?;
    let locale = Locale::new("locales", "es");
    locale.add_parsed_domain("pets", Box::new(parser));
    ensure!(locale.get_plural("%d cat", "%d cats", 1, &[&1]) == "1 gato");
    ensure!(locale.get_plural("%d cat", "%d cats", 3, &[&3]) == "3 gatos");
    Ok(())
}

#[rstest]
fn re_adding_replaces_whole_domain(locale: Locale) {
    locale.add_parsed_domain("main", domain_with(&[("Hello", "Qué tal")]));
    assert_eq!(locale.get("Hello", &[]), "Qué tal");
    assert_eq!(locale.get("Bye", &[]), "Bye");
    assert_eq!(locale.default_domain().as_deref(), Some("main"));
}

#[rstest]
fn introspection_lists_sorted_domains(locale: Locale) {
    assert_eq!(locale.domain_names(), ["extra", "main"]);
    assert!(locale.has_domain("extra"));
    assert!(!locale.has_domain("ghost"));
    assert_eq!(locale.language(), "es_ES");
    assert_eq!(locale.tag(), &langid!("es-ES"));
}

#[rstest]
fn export_merges_domains_last_name_wins(locale: Locale) -> Result<()> {
    let catalog = locale.export_catalog(&langid!("es-ES"))?;
    ensure!(catalog.path == "locales");
    ensure!(catalog.translations.len() == 3);
    // "main" sorts after "extra", so its translation wins.
    ensure!(catalog.translations.get("Hello").map(String::as_str) == Some("Hola"));
    ensure!(catalog.translations.get("Yes").map(String::as_str) == Some("Sí"));
    Ok(())
}

#[rstest]
fn export_rejects_other_tags(locale: Locale) {
    let err = locale
        .export_catalog(&langid!("es-MX"))
        .expect_err("tag mismatch");
    assert_eq!(err.to_string(), "language tags do not match: es-ES != es-MX");
}

#[rstest]
fn export_serializes_tag_as_string(locale: Locale) -> Result<()> {
    let catalog = locale.export_catalog(&langid!("es-ES"))?;
    let json = serde_json::to_value(&catalog)?;
    ensure!(json["tag"] == "es-ES", "json: {json}");
    ensure!(json["translations"]["Bye"] == "Adiós");
    Ok(())
}

#[rstest]
fn add_domain_reports_missing_catalog() -> Result<()> {
    let tree = LocaleTree::new()?;
    let locale = Locale::new(tree.root(), "it");
    let err = locale.add_domain("app").expect_err("nothing on disk");
    ensure!(
        matches!(err, CatalogError::NotFound { ref domain, ref language } if domain == "app" && language == "it"),
        "got {err}"
    );
    ensure!(locale.default_domain().is_none());
    Ok(())
}

#[rstest]
fn add_domain_loads_resolved_file() -> Result<()> {
    let tree = LocaleTree::new()?;
    let mo = MoBuilder::new(Endian::Little)
        .message("Good morning", "Buongiorno")
        .build();
    tree.write_catalog("it", Layout::Nested, "app.mo", mo)?;
    let locale = Locale::new(tree.root(), "it_IT.UTF-8");
    locale.add_domain("app")?;
    ensure!(locale.default_domain().as_deref() == Some("app"));
    ensure!(locale.get("Good morning", &[]) == "Buongiorno");
    Ok(())
}

#[rstest]
fn failed_add_leaves_registry_untouched() -> Result<()> {
    let tree = LocaleTree::new()?;
    tree.write_catalog("it", Layout::Flat, "app.mo", b"garbage")?;
    let locale = Locale::new(tree.root(), "it");
    let err = locale.add_domain("app").expect_err("corrupt catalog");
    ensure!(matches!(err, CatalogError::Malformed { .. }), "got {err}");
    ensure!(!locale.has_domain("app"));
    ensure!(locale.default_domain().is_none());
    Ok(())
}
