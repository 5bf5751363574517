//! Reader for compiled `.mo` catalogs.
//!
//! Layout: a 32-bit magic number whose byte order fixes the endianness of the
//! rest of the file, a revision, the string count, then the offsets of the
//! original and translated string tables. Each table holds `(length, offset)`
//! pairs pointing into the file.

use crate::domain::{Domain, Translation};
use crate::error::{CatalogError, CatalogResult};

use super::CatalogParser;

const MAGIC: u32 = 0x9504_12de;
const HEADER_LEN: usize = 20;
const CONTEXT_SEPARATOR: char = '\u{4}';
const PLURAL_SEPARATOR: char = '\0';

/// Parser for `.mo` binary catalogs.
#[derive(Debug, Default)]
pub struct MoParser {
    domain: Domain,
}

impl MoParser {
    /// Creates a parser with an empty domain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogParser for MoParser {
    fn parse(&mut self, data: &[u8]) -> CatalogResult<()> {
        let reader = Reader::new(data)?;
        let count = reader.word(8)?;
        let originals = reader.word(12)?;
        let translations = reader.word(16)?;

        for index in 0..count {
            let original = reader.table_string(originals, index)?;
            let translated = reader.table_string(translations, index)?;
            self.insert(&original, &translated);
        }
        Ok(())
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn into_domain(self: Box<Self>) -> Domain {
        self.domain
    }
}

impl MoParser {
    fn insert(&mut self, original: &str, translated: &str) {
        if original.is_empty() {
            self.domain.parse_headers(translated);
            return;
        }
        let (context, key) = match original.split_once(CONTEXT_SEPARATOR) {
            Some((context, key)) => (Some(context), key),
            None => (None, original),
        };
        let (id, plural_id) = key.split_once(PLURAL_SEPARATOR).unwrap_or((key, ""));
        let mut translation = Translation::new(id).with_plural_id(plural_id);
        for (index, form) in translated.split(PLURAL_SEPARATOR).enumerate() {
            translation.set_form(index, form);
        }
        self.domain.insert(context, translation);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

struct Reader<'a> {
    data: &'a [u8],
    order: ByteOrder,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> CatalogResult<Self> {
        if data.len() < HEADER_LEN {
            return Err(CatalogError::malformed("file shorter than the .mo header"));
        }
        let little = Self {
            data,
            order: ByteOrder::Little,
        };
        if little.word(0)? == MAGIC {
            return Ok(little);
        }
        let big = Self {
            data,
            order: ByteOrder::Big,
        };
        if big.word(0)? == MAGIC {
            return Ok(big);
        }
        Err(CatalogError::malformed("bad .mo magic number"))
    }

    #[expect(
        clippy::little_endian_bytes,
        clippy::big_endian_bytes,
        reason = "the .mo magic number declares the file's byte order"
    )]
    fn word(&self, offset: u32) -> CatalogResult<u32> {
        let bytes: [u8; 4] = self
            .slice(offset, 4)?
            .try_into()
            .map_err(|_| CatalogError::malformed("short read"))?;
        Ok(match self.order {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        })
    }

    fn slice(&self, offset: u32, len: u32) -> CatalogResult<&'a [u8]> {
        let start = usize::try_from(offset).map_err(|_| out_of_range(offset))?;
        let len = usize::try_from(len).map_err(|_| out_of_range(offset))?;
        start
            .checked_add(len)
            .and_then(|end| self.data.get(start..end))
            .ok_or_else(|| out_of_range(offset))
    }

    fn table_string(&self, table: u32, index: u32) -> CatalogResult<String> {
        let entry = index
            .checked_mul(8)
            .and_then(|delta| table.checked_add(delta))
            .ok_or_else(|| out_of_range(table))?;
        let len = self.word(entry)?;
        let offset = self.word(entry.checked_add(4).ok_or_else(|| out_of_range(entry))?)?;
        let bytes = self.slice(offset, len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

fn out_of_range(offset: u32) -> CatalogError {
    CatalogError::malformed(format!("offset {offset:#x} lies outside the file"))
}
