//! Encoder for compiled `.mo` catalog fixtures.

/// Byte order of the encoded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

/// Builds `.mo` file bytes from message pairs.
#[derive(Debug, Clone)]
pub struct MoBuilder {
    endian: Endian,
    entries: Vec<(String, String)>,
}

const MAGIC: u32 = 0x9504_12de;
const HEADER_LEN: usize = 28;

impl MoBuilder {
    /// Starts an empty catalog in `endian` byte order.
    #[must_use]
    pub const fn new(endian: Endian) -> Self {
        Self {
            endian,
            entries: Vec::new(),
        }
    }

    /// Adds the header entry.
    #[must_use]
    pub fn header(self, text: &str) -> Self {
        self.raw("", text)
    }

    /// Adds a singular message.
    #[must_use]
    pub fn message(self, id: &str, text: &str) -> Self {
        self.raw(id, text)
    }

    /// Adds a plural message with one string per form.
    #[must_use]
    pub fn plural(self, id: &str, plural_id: &str, forms: &[&str]) -> Self {
        self.raw(&format!("{id}\0{plural_id}"), &forms.join("\0"))
    }

    /// Adds a message scoped to `context`.
    #[must_use]
    pub fn context(self, context: &str, id: &str, text: &str) -> Self {
        self.raw(&format!("{context}\u{4}{id}"), text)
    }

    /// Adds an entry with pre-encoded original and translated strings.
    #[must_use]
    pub fn raw(mut self, original: &str, translated: &str) -> Self {
        self.entries
            .push((original.to_owned(), translated.to_owned()));
        self
    }

    /// Encodes the catalog.
    ///
    /// # Panics
    ///
    /// Panics if the catalog exceeds the 4 GiB addressable by the format.
    #[must_use]
    #[expect(clippy::expect_used, reason = "fixtures are always small")]
    pub fn build(mut self) -> Vec<u8> {
        self.entries.sort();
        let count = self.entries.len();
        let originals_at = HEADER_LEN;
        let translations_at = originals_at + count * 8;
        let mut strings_at = translations_at + count * 8;

        let mut originals = Vec::with_capacity(count);
        let mut translations = Vec::with_capacity(count);
        let mut strings = Vec::new();
        for (original, _) in &self.entries {
            originals.push((original.len(), strings_at));
            strings_at += original.len() + 1;
            strings.extend_from_slice(original.as_bytes());
            strings.push(0);
        }
        for (_, translated) in &self.entries {
            translations.push((translated.len(), strings_at));
            strings_at += translated.len() + 1;
            strings.extend_from_slice(translated.as_bytes());
            strings.push(0);
        }

        let word = |value: usize| u32::try_from(value).expect("fixture fits in 32 bits");
        let mut out = Vec::with_capacity(strings_at);
        for value in [
            MAGIC,
            0,
            word(count),
            word(originals_at),
            word(translations_at),
            0,
            word(HEADER_LEN),
        ] {
            self.push_word(&mut out, value);
        }
        for (len, offset) in originals.into_iter().chain(translations) {
            self.push_word(&mut out, word(len));
            self.push_word(&mut out, word(offset));
        }
        out.extend_from_slice(&strings);
        out
    }

    #[expect(
        clippy::little_endian_bytes,
        clippy::big_endian_bytes,
        reason = "fixtures exercise both byte orders explicitly"
    )]
    fn push_word(&self, out: &mut Vec<u8>, value: u32) {
        match self.endian {
            Endian::Little => out.extend_from_slice(&value.to_le_bytes()),
            Endian::Big => out.extend_from_slice(&value.to_be_bytes()),
        }
    }
}
