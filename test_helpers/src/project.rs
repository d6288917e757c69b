//! Throwaway project trees for loader and discovery tests.
//!
//! A [`TempProject`] owns a temporary directory and offers helpers to write
//! configuration files, test sources and directories relative to it. All
//! paths are canonical UTF-8 so they compare equal to what the loader
//! reports.
//!
//! # Examples
//!
//! ```
//! use test_helpers::project::TempProject;
//!
//! # fn main() -> anyhow::Result<()> {
//! let project = TempProject::new()?;
//! project.write_json("jest.config.json", &serde_json::json!({ "roots": ["tests"] }))?;
//! project.touch("tests/foo.spec.ts")?;
//! assert!(project.path("tests/foo.spec.ts").is_file());
//! # Ok(())
//! # }
//! ```

use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary project directory removed on drop.
#[derive(Debug)]
pub struct TempProject {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl TempProject {
    /// Creates an empty project directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temporary project")?;
        let canonical = dir
            .path()
            .canonicalize()
            .context("canonicalise temporary project")?;
        let root = Utf8PathBuf::from_path_buf(canonical)
            .map_err(|path| anyhow!("non UTF-8 temporary path: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Canonical project root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Joins `relative` onto the project root.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Creates `relative` as a directory, including parents.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn mkdir(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.path(relative);
        fs::create_dir_all(&path).with_context(|| format!("create directory {path}"))?;
        Ok(path)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create directory {parent}"))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Serialises `value` as pretty JSON into `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error when serialisation or writing fails.
    pub fn write_json(&self, relative: &str, value: &serde_json::Value) -> Result<Utf8PathBuf> {
        let text = serde_json::to_string_pretty(value).context("serialise JSON fixture")?;
        self.write(relative, &text)
    }

    /// Creates an empty file at `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn touch(&self, relative: &str) -> Result<Utf8PathBuf> {
        self.write(relative, "")
    }

    /// Creates an empty file for each entry of `relatives`.
    ///
    /// # Errors
    ///
    /// Returns the first write failure.
    pub fn touch_all<'a, I>(&self, relatives: I) -> Result<Vec<Utf8PathBuf>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        relatives.into_iter().map(|rel| self.touch(rel)).collect()
    }
}
