//! printf-style interpolation applied to every lookup result.
//!
//! Directives follow the familiar `%[flags][width][.precision]verb` shape.
//! Every verb renders its argument through [`Display`]; `%q` additionally
//! wraps the text in double quotes and `%%` emits a literal percent sign.
//! A template rendered without arguments is returned verbatim, so catalogs
//! containing bare `%` characters survive lookups that pass nothing.

use std::fmt::Display;
use std::iter::Peekable;
use std::str::Chars;

/// Largest width or precision honoured by [`sprintf`].
pub(crate) const MAX_FIELD: usize = 1_000_000;

/// Renders `template`, substituting `args` in order.
///
/// Missing arguments render as `%!<verb>(MISSING)`; surplus arguments are
/// ignored so a plural fallback may receive the count without using it.
///
/// # Examples
///
/// ```rust
/// use locale_catalog::sprintf;
///
/// assert_eq!(sprintf("%d files", &[&5]), "5 files");
/// assert_eq!(sprintf("one file", &[&1]), "one file");
/// assert_eq!(sprintf("100%", &[]), "100%");
/// ```
#[must_use]
pub fn sprintf(template: &str, args: &[&dyn Display]) -> String {
    if args.is_empty() {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut remaining = args.iter();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        let Some(directive) = Directive::parse(&mut chars) else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if directive.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if directive.bad_precision {
            out.push_str("%!(BADPREC)");
        }
        if directive.verb == '%' {
            out.push('%');
            continue;
        }
        match remaining.next() {
            Some(arg) => directive.render(&mut out, *arg),
            None => {
                out.push_str("%!");
                out.push(directive.verb);
                out.push_str("(MISSING)");
            }
        }
    }

    out
}

/// Formats untranslated plural text: `singular` when `n == 1`, otherwise
/// `plural`.
pub(crate) fn untranslated_plural(
    singular: &str,
    plural: &str,
    n: u64,
    args: &[&dyn Display],
) -> String {
    sprintf(if n == 1 { singular } else { plural }, args)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Directive {
    left_align: bool,
    zero_pad: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
    verb: char,
}

impl Directive {
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Option<Self> {
        let mut directive = Self::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => directive.left_align = true,
                '0' => directive.zero_pad = true,
                '+' | ' ' | '#' => {}
                _ => break,
            }
            chars.next();
        }
        let width = take_number(chars);
        directive.bad_width = width.is_some_and(|value| value > MAX_FIELD);
        directive.width = width.filter(|value| *value <= MAX_FIELD);
        if chars.next_if_eq(&'.').is_some() {
            let precision = take_number(chars).unwrap_or(0);
            directive.bad_precision = precision > MAX_FIELD;
            directive.precision = (precision <= MAX_FIELD).then_some(precision);
        }
        directive.verb = chars.next()?;
        Some(directive)
    }

    fn render(&self, out: &mut String, arg: &dyn Display) {
        let text = match (self.verb, self.precision) {
            ('q', _) => format!("\"{arg}\""),
            (_, Some(precision)) => format!("{arg:.precision$}"),
            (_, None) => arg.to_string(),
        };
        let padding = self
            .width
            .map_or(0, |width| width.saturating_sub(text.chars().count()));
        if self.left_align {
            out.push_str(&text);
            out.extend(std::iter::repeat_n(' ', padding));
        } else {
            let fill = if self.zero_pad { '0' } else { ' ' };
            out.extend(std::iter::repeat_n(fill, padding));
            out.push_str(&text);
        }
    }
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) {
        chars.next();
        let current = value.unwrap_or(0);
        value = Some(
            current
                .saturating_mul(10)
                .saturating_add(usize::try_from(digit).unwrap_or(0)),
        );
    }
    value
}
