//! Lenient reader for editable `.po` catalogs.
//!
//! Lines the reader does not recognise are skipped rather than rejected, so
//! parsing never fails.

use std::collections::BTreeMap;

use crate::domain::{Domain, Translation};
use crate::error::CatalogResult;

use super::CatalogParser;

/// Parser for `.po` text catalogs.
#[derive(Debug, Default)]
pub struct PoParser {
    domain: Domain,
}

impl PoParser {
    /// Creates a parser with an empty domain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogParser for PoParser {
    fn parse(&mut self, data: &[u8]) -> CatalogResult<()> {
        let text = String::from_utf8_lossy(data);
        let mut entry = Entry::default();
        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                entry.finish_if_translated(&mut self.domain);
                if let Some(refs) = comment.strip_prefix(':') {
                    entry.refs.extend(refs.split_whitespace().map(str::to_owned));
                }
                continue;
            }
            if line.starts_with('"') {
                entry.append(&unquote(line));
                continue;
            }
            let Some((keyword, value)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            entry.apply(&mut self.domain, keyword, unquote(value.trim()));
        }
        entry.finish(&mut self.domain);
        Ok(())
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn into_domain(self: Box<Self>) -> Domain {
        self.domain
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    PluralId,
    Form(usize),
}

/// Entry under construction.
#[derive(Debug, Default)]
struct Entry {
    context: Option<String>,
    id: Option<String>,
    plural_id: String,
    forms: BTreeMap<usize, String>,
    refs: Vec<String>,
    last: Option<Field>,
}

impl Entry {
    fn apply(&mut self, domain: &mut Domain, keyword: &str, value: String) {
        let field = match keyword {
            "msgctxt" => Field::Context,
            "msgid" => Field::Id,
            "msgid_plural" => Field::PluralId,
            "msgstr" => Field::Form(0),
            other => match form_index(other) {
                Some(index) => Field::Form(index),
                None => return,
            },
        };
        let starts_new = match field {
            Field::Context => self.id.is_some() || self.context.is_some(),
            Field::Id => self.id.is_some(),
            Field::PluralId | Field::Form(_) => false,
        };
        if starts_new {
            self.finish(domain);
        }
        self.last = Some(field);
        match field {
            Field::Context => self.context = Some(value),
            Field::Id => self.id = Some(value),
            Field::PluralId => self.plural_id = value,
            Field::Form(index) => {
                self.forms.insert(index, value);
            }
        }
    }

    fn append(&mut self, text: &str) {
        let target = match self.last {
            Some(Field::Context) => self.context.as_mut(),
            Some(Field::Id) => self.id.as_mut(),
            Some(Field::PluralId) => Some(&mut self.plural_id),
            Some(Field::Form(index)) => self.forms.get_mut(&index),
            None => None,
        };
        if let Some(target) = target {
            target.push_str(text);
        }
    }

    fn finish_if_translated(&mut self, domain: &mut Domain) {
        if !self.forms.is_empty() {
            self.finish(domain);
        }
    }

    fn finish(&mut self, domain: &mut Domain) {
        let entry = std::mem::take(self);
        let Some(id) = entry.id else {
            // Comments collected before the first msgid belong to it.
            self.refs = entry.refs;
            return;
        };
        if id.is_empty() && entry.context.is_none() {
            if let Some(header) = entry.forms.get(&0) {
                domain.parse_headers(header);
            }
            return;
        }
        let mut translation = Translation::new(id).with_plural_id(entry.plural_id);
        for (index, text) in entry.forms {
            translation.set_form(index, text);
        }
        for reference in entry.refs {
            translation.add_ref(reference);
        }
        domain.insert(entry.context.as_deref(), translation);
    }
}

fn form_index(keyword: &str) -> Option<usize> {
    keyword
        .strip_prefix("msgstr[")?
        .strip_suffix(']')?
        .trim()
        .parse()
        .ok()
}

/// Strips surrounding quotes and resolves C escapes.
fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .map_or(value, |rest| rest.strip_suffix('"').unwrap_or(rest));
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{7}'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    //! Unit tests for `.po` string handling.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#""plain""#, "plain")]
    #[case(r#""line\nbreak""#, "line\nbreak")]
    #[case(r#""say \"hi\"""#, "say \"hi\"")]
    #[case(r#""back\\slash""#, "back\\slash")]
    #[case(r#""tab\there""#, "tab\there")]
    #[case("unquoted", "unquoted")]
    fn unquotes_and_unescapes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unquote(raw), expected);
    }

    #[rstest]
    #[case("msgstr[0]", Some(0))]
    #[case("msgstr[12]", Some(12))]
    #[case("msgstr[x]", None)]
    #[case("msgstr", None)]
    fn reads_form_indices(#[case] keyword: &str, #[case] expected: Option<usize>) {
        assert_eq!(form_index(keyword), expected);
    }
}
