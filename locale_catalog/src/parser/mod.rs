//! Catalog file parsers and extension-based dispatch.
//!
//! Both formats feed a [`Domain`]. [`CatalogFormat`] maps a file extension to
//! its parser and [`parse_file`] performs the filesystem checks shared by
//! every format.

mod mo;
mod po;

use std::fmt::Display;

use camino::Utf8Path;

use crate::domain::Domain;
use crate::error::{CatalogError, CatalogResult};

pub use mo::MoParser;
pub use po::PoParser;

/// Turns the raw bytes of one catalog file into a [`Domain`].
///
/// Implement this to load catalogs from formats the crate does not ship a
/// reader for, then hand the parser to
/// [`Locale::add_parsed_domain`](crate::Locale::add_parsed_domain).
pub trait CatalogParser: Send {
    /// Parses `data`, adding its entries to the parser's domain.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] when the data cannot be
    /// interpreted.
    fn parse(&mut self, data: &[u8]) -> CatalogResult<()>;

    /// Domain built so far.
    fn domain(&self) -> &Domain;

    /// Consumes the parser, yielding its domain.
    fn into_domain(self: Box<Self>) -> Domain;

    /// Singular lookup against the parsed domain.
    fn get(&self, id: &str, args: &[&dyn Display]) -> String {
        self.domain().get(id, args)
    }

    /// Plural lookup against the parsed domain.
    fn get_n(&self, id: &str, plural_id: &str, n: u64, args: &[&dyn Display]) -> String {
        self.domain().get_n(id, plural_id, n, args)
    }

    /// Contextual lookup against the parsed domain.
    fn get_c(&self, id: &str, context: &str, args: &[&dyn Display]) -> String {
        self.domain().get_c(id, context, args)
    }

    /// Contextual plural lookup against the parsed domain.
    fn get_nc(
        &self,
        id: &str,
        plural_id: &str,
        n: u64,
        context: &str,
        args: &[&dyn Display],
    ) -> String {
        self.domain().get_nc(id, plural_id, n, context, args)
    }
}

/// Catalog file formats the crate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CatalogFormat {
    /// Editable text catalog (`.po`).
    Po,
    /// Compiled binary catalog (`.mo`).
    Mo,
}

impl CatalogFormat {
    /// Every supported format, in the order the resolver probes them.
    pub const ALL: [Self; 2] = [Self::Po, Self::Mo];

    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Po => "po",
            Self::Mo => "mo",
        }
    }

    /// Format implied by the extension of `path`. Only the lowercase
    /// spellings `po` and `mo` are recognised.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension()?;
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == ext)
    }

    /// Fresh parser for this format.
    #[must_use]
    pub fn parser(self) -> Box<dyn CatalogParser> {
        match self {
            Self::Po => Box::new(PoParser::new()),
            Self::Mo => Box::new(MoParser::new()),
        }
    }
}

/// Reads and parses the catalog at `path`, choosing the parser by extension.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] when the file cannot be inspected or read,
/// [`CatalogError::IsDirectory`] for a directory,
/// [`CatalogError::UnsupportedFormat`] for an unknown extension and
/// [`CatalogError::Malformed`] when the contents cannot be interpreted.
pub fn parse_file(path: &Utf8Path) -> CatalogResult<Box<dyn CatalogParser>> {
    let metadata = std::fs::metadata(path).map_err(|err| CatalogError::io(path, err))?;
    if metadata.is_dir() {
        return Err(CatalogError::IsDirectory {
            path: path.to_path_buf(),
        });
    }
    let format = CatalogFormat::from_path(path).ok_or_else(|| CatalogError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let data = std::fs::read(path).map_err(|err| CatalogError::io(path, err))?;
    let mut parser = format.parser();
    parser.parse(&data).map_err(|err| err.at_path(path))?;
    tracing::debug!(path = %path, ?format, "parsed catalog file");
    Ok(parser)
}
