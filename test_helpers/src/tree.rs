//! Temporary locale directory trees.
//!
//! A [`LocaleTree`] owns a [`TempDir`] and writes catalog files through a
//! `cap-std` directory handle, so fixtures can never escape the tree.

use std::time::{Duration, SystemTime};

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// Where a catalog sits below its language directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `<variant>/LC_MESSAGES/<file>`
    Nested,
    /// `<variant>/<file>`
    Flat,
}

/// A locale base directory that is removed when dropped.
pub struct LocaleTree {
    _temp: TempDir,
    root: Utf8PathBuf,
    dir: Dir,
}

impl LocaleTree {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("create locale tree")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("temporary directory is not UTF-8: {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .context("open locale tree with cap-std")?;
        Ok(Self {
            _temp: temp,
            root,
            dir,
        })
    }

    /// Base directory of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> Result<Utf8PathBuf> {
        let path = Utf8Path::new(relative);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
            self.dir
                .create_dir_all(parent)
                .with_context(|| format!("create {parent}"))?;
        }
        self.dir
            .write(path, contents)
            .with_context(|| format!("write {relative}"))?;
        Ok(self.root.join(path))
    }

    /// Writes a catalog named `file_name` for language directory `variant`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_catalog(
        &self,
        variant: &str,
        layout: Layout,
        file_name: &str,
        contents: impl AsRef<[u8]>,
    ) -> Result<Utf8PathBuf> {
        let relative = match layout {
            Layout::Nested => format!("{variant}/LC_MESSAGES/{file_name}"),
            Layout::Flat => format!("{variant}/{file_name}"),
        };
        self.write(&relative, contents)
    }

    /// Creates the directory `relative` and its parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_dir(&self, relative: &str) -> Result<Utf8PathBuf> {
        self.dir
            .create_dir_all(relative)
            .with_context(|| format!("create {relative}"))?;
        Ok(self.root.join(relative))
    }

    /// Sets the modification time of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its time updated.
    pub fn set_modified(&self, path: &Utf8Path, time: SystemTime) -> Result<()> {
        let file = std::fs::File::options()
            .write(true)
            .open(path)
            .with_context(|| format!("open {path} for timestamp update"))?;
        file.set_modified(time)
            .with_context(|| format!("set modification time of {path}"))
    }
}

/// A fixed point `seconds` after the Unix epoch.
#[must_use]
pub fn epoch_plus(seconds: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(seconds)
}
