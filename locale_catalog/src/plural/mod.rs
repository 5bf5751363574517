//! `Plural-Forms` header parsing and plural selector evaluation.
//!
//! Catalog headers describe plural selection with a C expression over `n`,
//! for example `nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 ? 1 : 2);`.
//! [`PluralRule`] compiles that expression once so lookups only walk a small
//! tree.

mod expr;

use thiserror::Error;

use expr::Expr;

/// Errors raised while compiling a plural selector expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluralError {
    /// A character outside the expression grammar was found.
    #[error("unexpected character '{0}' in plural expression")]
    InvalidCharacter(char),
    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token '{0}' in plural expression")]
    UnexpectedToken(String),
    /// The expression ended early.
    #[error("plural expression ended unexpectedly")]
    UnexpectedEnd,
    /// An integer literal did not fit in 64 bits.
    #[error("integer literal '{0}' is out of range")]
    LiteralOutOfRange(String),
    /// The expression nests deeper than the parser accepts.
    #[error("plural expression nests deeper than {0} levels")]
    TooDeep(usize),
}

/// Compiled plural selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    nplurals: usize,
    expr: Expr,
}

impl PluralRule {
    /// Compiles `expression` for a catalog declaring `nplurals` forms.
    ///
    /// # Errors
    ///
    /// Returns a [`PluralError`] when the expression is not valid C syntax
    /// over `n`.
    pub fn parse(nplurals: usize, expression: &str) -> Result<Self, PluralError> {
        Ok(Self {
            nplurals,
            expr: Expr::parse(expression)?,
        })
    }

    /// Number of plural forms declared by the catalog.
    #[must_use]
    pub const fn nplurals(&self) -> usize {
        self.nplurals
    }

    /// Returns the plural form index for `n`, clamped to the declared range.
    #[must_use]
    pub fn select(&self, n: u64) -> usize {
        let index = usize::try_from(self.expr.eval(n)).unwrap_or(usize::MAX);
        index.min(self.nplurals.saturating_sub(1))
    }
}

/// Plural index used when a catalog declares no usable rule: singular for
/// exactly one, plural otherwise.
#[must_use]
pub const fn default_plural_index(n: u64) -> usize {
    if n == 1 { 0 } else { 1 }
}

/// Splits a `Plural-Forms` header into its `nplurals` count and the raw
/// `plural` expression text.
///
/// Returns `None` when either part is missing or `nplurals` is not a number.
///
/// # Examples
///
/// ```rust
/// use locale_catalog::plural::parse_plural_forms;
///
/// let (count, expr) = parse_plural_forms("nplurals=2; plural=(n != 1);").unwrap();
/// assert_eq!(count, 2);
/// assert_eq!(expr, "(n != 1)");
/// ```
#[must_use]
pub fn parse_plural_forms(header: &str) -> Option<(usize, String)> {
    let mut nplurals = None;
    let mut plural = None;
    for part in header.split(';') {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim() {
            "nplurals" => nplurals = value.trim().parse::<usize>().ok(),
            "plural" => plural = Some(value.trim().to_owned()),
            _ => {}
        }
    }
    Some((nplurals?, plural.filter(|text| !text.is_empty())?))
}
