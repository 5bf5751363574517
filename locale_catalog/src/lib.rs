//! Runtime manager for gettext translation catalogs.
//!
//! A [`Locale`] points at a directory of `.po`/`.mo` files for one language
//! and serves translations from any number of named domains. Domains are
//! located by [`FileResolver`], parsed by a [`CatalogParser`] and kept in a
//! registry behind a reader/writer lock, so one locale can be shared across
//! threads while domains are added or reloaded.
//!
//! Lookups come in four shapes (singular, plural, contextual and plural
//! contextual), each against the default domain or a named one. They never
//! fail: untranslated text is formatted and returned as-is.
//!
//! An assembled locale can be persisted with [`encode_locale`] and restored
//! with [`decode_locale`] without touching the source files again.

mod codec;
mod domain;
mod error;
mod format;
mod locale;
mod parser;
pub mod plural;
mod resolver;

pub use codec::{FORMAT_VERSION, LocaleSnapshot, decode_locale, encode_locale};
pub use domain::{Domain, DomainSnapshot, Translation};
pub use error::{CatalogError, CatalogResult};
pub use format::sprintf;
pub use locale::{Locale, LocaleCatalog, parse_tag, simplify_language};
pub use parser::{CatalogFormat, CatalogParser, MoParser, PoParser, parse_file};
pub use resolver::FileResolver;
