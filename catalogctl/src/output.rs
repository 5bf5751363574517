//! Reading and writing persisted locale files.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::CatalogctlError;

fn io_error(path: &Utf8Path) -> impl FnOnce(std::io::Error) -> CatalogctlError + '_ {
    move |source| CatalogctlError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Splits `path` into its parent directory and file name.
fn split(path: &Utf8Path) -> Result<(&Utf8Path, &str), CatalogctlError> {
    let file_name = path.file_name().ok_or_else(|| CatalogctlError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Ok((parent, file_name))
}

/// Writes `bytes` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`CatalogctlError::Io`] when a directory or the file cannot be
/// written.
pub fn write_pack(path: &Utf8Path, bytes: &[u8]) -> Result<Utf8PathBuf, CatalogctlError> {
    let (parent, file_name) = split(path)?;
    let dir = ensure_dir(parent)?;
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(io_error(path))?;
    file.write_all(bytes).map_err(io_error(path))?;
    tracing::debug!(path = %path, bytes = bytes.len(), "wrote locale pack");
    Ok(path.to_path_buf())
}

/// Reads a persisted locale from `path`.
///
/// # Errors
///
/// Returns [`CatalogctlError::Io`] when the file cannot be read.
pub fn read_pack(path: &Utf8Path) -> Result<Vec<u8>, CatalogctlError> {
    let (parent, file_name) = split(path)?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error(parent))?;
    dir.read(file_name).map_err(io_error(path))
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, CatalogctlError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error(path))?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error(path))
        }
        Err(open_err) => Err(io_error(path)(open_err)),
    }
}
