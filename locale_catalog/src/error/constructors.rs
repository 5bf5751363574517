//! Convenience constructors for [`CatalogError`] values.

use std::borrow::Cow;

use camino::{Utf8Path, Utf8PathBuf};

use super::CatalogError;

impl CatalogError {
    pub(crate) fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            path: None,
            message: message.into(),
        }
    }

    pub(crate) fn decode(context: impl Into<Cow<'static, str>>, source: postcard::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn encode(context: impl Into<Cow<'static, str>>, source: postcard::Error) -> Self {
        Self::Encode {
            context: context.into(),
            source,
        }
    }

    /// Attaches `path` to errors raised while parsing in-memory data.
    #[must_use]
    pub(crate) fn at_path(self, path: &Utf8Path) -> Self {
        match self {
            Self::Malformed {
                path: None,
                message,
            } => Self::Malformed {
                path: Some(Utf8PathBuf::from(path)),
                message,
            },
            other => other,
        }
    }
}
