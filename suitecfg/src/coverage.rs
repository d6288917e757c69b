//! Coverage output planning and directory preparation.
//!
//! The runner's coverage engine is external. This module owns the part of the
//! contract that is about the filesystem: where reports go, which artifacts
//! each reporter writes, and making sure the directory exists before any
//! report is produced.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::model::{CoverageReporter, ReportTarget};
use crate::{SuiteConfig, SuiteError, SuiteResult};

/// Where coverage goes and what ends up there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoveragePlan {
    enabled: bool,
    directory: Utf8PathBuf,
    reporters: Vec<CoverageReporter>,
}

impl CoveragePlan {
    /// Build the plan described by `config`.
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self {
            enabled: config.collect_coverage(),
            directory: config.coverage_directory().to_path_buf(),
            reporters: config.coverage_reporters().to_vec(),
        }
    }

    /// Whether coverage collection is switched on.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Absolute coverage output directory.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Reporters in configuration order.
    #[must_use]
    pub fn reporters(&self) -> &[CoverageReporter] {
        &self.reporters
    }

    /// Absolute paths of every artifact the reporters write, in reporter
    /// order without duplicates. Console-only reporters contribute nothing.
    #[must_use]
    pub fn artifacts(&self) -> Vec<Utf8PathBuf> {
        let mut paths: Vec<Utf8PathBuf> = Vec::new();
        for reporter in &self.reporters {
            let primary = match reporter.target() {
                ReportTarget::Artifact(name) => Some(name),
                ReportTarget::Console | ReportTarget::Nothing => None,
            };
            for name in primary.into_iter().chain(reporter.companion_artifacts().iter().copied()) {
                let path = self.directory.join(name);
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
        paths
    }

    /// Create the coverage directory and any sub-directories the artifacts
    /// need. Running it again on a prepared directory changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Io`] naming the path when the directory cannot
    /// be created, including when the path exists as a file.
    pub fn prepare(&self) -> SuiteResult<()> {
        let dir = ensure_dir(&self.directory)?;
        for artifact in self.artifacts() {
            let Ok(relative) = artifact.strip_prefix(&self.directory) else {
                continue;
            };
            let Some(parent) = relative.parent().filter(|p| !p.as_str().is_empty()) else {
                continue;
            };
            dir.create_dir_all(parent)
                .map_err(|err| Arc::new(SuiteError::io(self.directory.join(parent), err)))?;
        }
        tracing::debug!(directory = %self.directory, "coverage directory ready");
        Ok(())
    }
}

fn ensure_dir(path: &Utf8Path) -> SuiteResult<Dir> {
    let io_error = |err| Arc::new(SuiteError::io(path, err));
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error)?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error)
        }
        Err(err) => Err(io_error(err)),
    }
}
