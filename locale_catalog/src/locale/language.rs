//! Normalisation of caller-supplied language identifiers.

use unic_langid::LanguageIdentifier;

/// Drops the codeset and modifier suffixes of a POSIX locale name.
///
/// Everything from the first `:`, `@` or `.` is removed and the remainder
/// trimmed, so `en_US.UTF-8` becomes `en_US` and `sr_RS@latin` becomes
/// `sr_RS`.
#[must_use]
pub fn simplify_language(language: &str) -> &str {
    language
        .split([':', '@', '.'])
        .next()
        .unwrap_or_default()
        .trim()
}

/// Parses `language` into a tag, accepting `_` or `-` as separators.
///
/// Unparsable input yields the undetermined tag (`und`) and logs a warning.
#[must_use]
pub fn parse_tag(language: &str) -> LanguageIdentifier {
    language
        .replace('_', "-")
        .parse::<LanguageIdentifier>()
        .unwrap_or_else(|err| {
            tracing::warn!(language, error = %err, "unparsable language tag; using 'und'");
            LanguageIdentifier::default()
        })
}
