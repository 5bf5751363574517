//! Tests for locale persistence.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface broken fixtures"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "fixtures are unwrapped under their own name"
)]

use anyhow::{Result, ensure};
use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::Translation;
use crate::parser::{CatalogFormat, CatalogParser};

fn parsed(po: &str) -> Result<Box<dyn CatalogParser>> {
    let mut parser = CatalogFormat::Po.parser();
    parser.parse(po.as_bytes())?;
    Ok(parser)
}

#[fixture]
fn locale() -> Result<Locale> {
    let locale = Locale::new("/srv/locales", "uk_UA.UTF-8");
    locale.add_parsed_domain(
        "app",
        parsed(
            r#"msgid ""
msgstr "Language: uk\nPlural-Forms: nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\n"

msgid "%d day"
msgid_plural "%d days"
msgstr[0] "%d день"
msgstr[1] "%d дні"
msgstr[2] "%d днів"

msgctxt "door"
msgid "Open"
msgstr "Відчинити"
"#,
        )?,
    );
    locale.add_parsed_domain("errors", parsed("msgid \"Oops\"\nmsgstr \"Халепа\"\n")?);
    Ok(locale)
}

#[rstest]
fn round_trip_preserves_configuration(locale: Result<Locale>) -> Result<()> {
    let locale = locale?;
    let restored = decode_locale(&encode_locale(&locale)?)?;
    ensure!(restored.path() == locale.path());
    ensure!(restored.language() == "uk_UA");
    ensure!(restored.tag() == locale.tag());
    ensure!(restored.default_domain().as_deref() == Some("app"));
    ensure!(restored.domain_names() == ["app", "errors"]);
    Ok(())
}

#[rstest]
fn round_trip_preserves_lookups(locale: Result<Locale>) -> Result<()> {
    let locale = locale?;
    let restored = Locale::from_bytes(&locale.to_bytes()?)?;
    for n in [1_u64, 3, 5, 11, 21] {
        ensure!(
            restored.get_plural("%d day", "%d days", n, &[&n])
                == locale.get_plural("%d day", "%d days", n, &[&n]),
            "plural form differs for {n}"
        );
    }
    ensure!(restored.get_plural("%d day", "%d days", 22, &[&22]) == "22 дні");
    ensure!(restored.get_context("Open", "door", &[]) == "Відчинити");
    ensure!(restored.get_in_domain("errors", "Oops", &[]) == "Халепа");
    Ok(())
}

#[rstest]
fn round_trip_preserves_domain_tables(locale: Result<Locale>) -> Result<()> {
    let locale = locale?;
    let restored = decode_locale(&encode_locale(&locale)?)?;
    let equal = locale.with_registry(|original| {
        restored.with_registry(|copy| original.domains == copy.domains)
    });
    ensure!(equal, "domain tables differ after round trip");
    Ok(())
}

#[rstest]
fn round_trip_keeps_unset_default() -> Result<()> {
    let locale = Locale::new("locales", "fr");
    let restored = decode_locale(&encode_locale(&locale)?)?;
    ensure!(restored.default_domain().is_none());
    ensure!(restored.domain_names().is_empty());
    Ok(())
}

#[rstest]
fn rejects_foreign_version(locale: Result<Locale>) -> Result<()> {
    let mut bytes = encode_locale(&locale?)?;
    if let Some(first) = bytes.first_mut() {
        *first = FORMAT_VERSION.wrapping_add(1);
    }
    let err = decode_locale(&bytes).expect_err("version mismatch");
    ensure!(
        matches!(err, CatalogError::UnsupportedVersion { found: 2, expected: 1, .. }),
        "got {err}"
    );
    Ok(())
}

#[rstest]
fn rejects_empty_input() {
    let err = decode_locale(&[]).expect_err("empty blob");
    assert!(matches!(err, CatalogError::Decode { .. }));
}

#[rstest]
fn rejects_corrupt_domain_blob() -> Result<()> {
    let mut domains = BTreeMap::new();
    domains.insert(String::from("app"), vec![FORMAT_VERSION, 0xff, 0xff]);
    let snapshot = LocaleSnapshot {
        version: FORMAT_VERSION,
        path: Utf8PathBuf::from("locales"),
        language: String::from("fr"),
        default_domain: Some(String::from("app")),
        domains,
    };
    let bytes = postcard::to_stdvec(&snapshot)?;
    let err = decode_locale(&bytes).expect_err("corrupt domain");
    ensure!(matches!(err, CatalogError::Decode { .. }), "got {err}");
    Ok(())
}

#[rstest]
fn domain_blobs_decode_independently() -> Result<()> {
    let mut domain = Domain::new();
    domain.insert(None, Translation::new("Yes").with_form(0, "Так"));
    let restored = Domain::from_bytes(&domain.to_bytes()?)?;
    ensure!(restored.get("Yes", &[]) == "Так");
    Ok(())
}

const PLURAL_HEADERS: [&str; 4] = [
    "",
    "Language: de\nPlural-Forms: nplurals=2; plural=(n != 1);\n",
    "Language: pl\nPlural-Forms: nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\n",
    "Language: ja\nPlural-Forms: nplurals=1; plural=0;\n",
];

fn arb_translation() -> impl Strategy<Value = Translation> {
    (
        "[a-z %]{1,12}",
        "[a-z %]{0,12}",
        prop::collection::vec("[a-zа-яё %]{0,12}", 1..4),
        prop::collection::vec("[a-z/.:0-9]{1,10}", 0..3),
    )
        .prop_map(|(id, plural_id, forms, refs)| {
            let mut translation = Translation::new(id).with_plural_id(plural_id);
            for (index, text) in forms.into_iter().enumerate() {
                translation.set_form(index, text);
            }
            for reference in refs {
                translation.add_ref(reference);
            }
            translation
        })
}

fn arb_domain() -> impl Strategy<Value = Domain> {
    (
        prop::sample::select(PLURAL_HEADERS.to_vec()),
        prop::collection::vec(arb_translation(), 0..6),
        prop::collection::vec(("[a-z]{1,6}", arb_translation()), 0..4),
    )
        .prop_map(|(header, messages, contextual)| {
            let mut domain = Domain::new();
            domain.parse_headers(header);
            for translation in messages {
                domain.insert(None, translation);
            }
            for (context, translation) in contextual {
                domain.insert(Some(&context), translation);
            }
            domain
        })
}

fn arb_registry() -> impl Strategy<Value = DomainRegistry> {
    (
        prop::collection::hash_map("[a-z]{1,8}", arb_domain(), 0..4),
        prop::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(domains, default_domain)| DomainRegistry {
            domains,
            default_domain,
        })
}

fn round_trip(locale: &Locale) -> Result<Locale, TestCaseError> {
    let bytes = encode_locale(locale).map_err(|err| TestCaseError::fail(err.to_string()))?;
    decode_locale(&bytes).map_err(|err| TestCaseError::fail(err.to_string()))
}

proptest! {
    #[test]
    fn any_populated_locale_survives_a_round_trip(registry in arb_registry()) {
        let locale = Locale::from_registry(Utf8PathBuf::from("locales"), "pl_PL", registry);
        let restored = round_trip(&locale)?;

        prop_assert_eq!(restored.default_domain(), locale.default_domain());
        prop_assert_eq!(restored.domain_names(), locale.domain_names());
        let tables_match = locale.with_registry(|original| {
            restored.with_registry(|copy| {
                original.domains.iter().all(|(name, domain)| {
                    copy.domains.get(name).is_some_and(|other| {
                        other.get_all() == domain.get_all() && other.snapshot() == domain.snapshot()
                    })
                })
            })
        });
        prop_assert!(tables_match, "a domain changed across the round trip");
    }
}
