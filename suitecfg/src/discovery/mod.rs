//! Locating the configuration file for a project.
//!
//! Explicit paths win over anything found in the project root. Within the
//! project root exactly one configuration may exist: a dedicated
//! `jest.config.*` file or a `jest` section in the package manifest. Finding
//! more than one is an error rather than a silent choice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use camino::Utf8PathBuf;
use figment::Figment;

use crate::file::{PACKAGE_MANIFEST, canonicalise};
use crate::{SuiteError, SuiteResult, load_config_file};

mod builder;

pub use builder::ConfigDiscoveryBuilder;

/// Environment variable naming an explicit configuration file.
pub const DEFAULT_ENV_VAR: &str = "SUITECFG_CONFIG";

/// Dedicated configuration file names searched in the project root.
pub const DEFAULT_FILE_NAMES: [&str; 4] = [
    "jest.config.json",
    "jest.config.toml",
    "jest.config.yaml",
    "jest.config.yml",
];

/// A configuration layer together with the file it came from.
#[derive(Debug)]
pub struct DiscoveredConfig {
    /// Canonical path of the configuration file.
    pub path: Utf8PathBuf,
    /// Parsed configuration layer.
    pub layer: Figment,
}

/// Configuration discovery for a single project.
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    pub(super) project_root: PathBuf,
    pub(super) env_var: Option<String>,
    pub(super) file_names: Vec<String>,
    pub(super) include_manifest: bool,
    pub(super) explicit_paths: Vec<PathBuf>,
    pub(super) required_explicit_paths: Vec<PathBuf>,
}

impl ConfigDiscovery {
    /// Creates a new builder searching `project_root`.
    #[must_use]
    pub fn builder(project_root: impl Into<PathBuf>) -> ConfigDiscoveryBuilder {
        ConfigDiscoveryBuilder::new(project_root)
    }

    /// Directory searched for project configuration files.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn push_unique(paths: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>, candidate: PathBuf) -> bool {
        if candidate.as_os_str().is_empty() {
            return false;
        }
        if seen.insert(candidate.clone()) {
            paths.push(candidate);
            true
        } else {
            false
        }
    }

    fn env_path(&self) -> Option<PathBuf> {
        self.env_var
            .as_ref()
            .and_then(|name| std::env::var_os(name))
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Explicit candidates paired with whether each must exist.
    ///
    /// The environment variable's path counts as required: naming a file
    /// that does not exist is a mistake, not a request to fall back.
    fn explicit_candidates(&self) -> (Vec<PathBuf>, Vec<bool>) {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();
        let mut required = Vec::new();
        for path in &self.required_explicit_paths {
            if Self::push_unique(&mut paths, &mut seen, path.clone()) {
                required.push(true);
            }
        }
        for path in &self.explicit_paths {
            if Self::push_unique(&mut paths, &mut seen, path.clone()) {
                required.push(false);
            }
        }
        if let Some(path) = self.env_path()
            && Self::push_unique(&mut paths, &mut seen, path)
        {
            required.push(true);
        }
        (paths, required)
    }

    fn project_candidates(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .file_names
            .iter()
            .map(|name| self.project_root.join(name))
            .collect();
        if self.include_manifest {
            paths.push(self.project_root.join(PACKAGE_MANIFEST));
        }
        paths
    }

    /// Returns every candidate in search order.
    #[must_use]
    pub fn candidates(&self) -> Vec<PathBuf> {
        let (mut paths, _) = self.explicit_candidates();
        for path in self.project_candidates() {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// Loads the configuration for this project.
    ///
    /// Every required candidate must exist; the first explicit candidate
    /// that exists is used. Otherwise every project-root candidate is loaded and exactly
    /// one may hold a configuration.
    ///
    /// # Errors
    ///
    /// Returns reference errors for missing required paths, file errors for
    /// candidates that fail to parse, and a validation error on `config`
    /// when the project root holds several configurations.
    pub fn load_first(&self) -> SuiteResult<Option<DiscoveredConfig>> {
        let (explicit, required) = self.explicit_candidates();
        let mut missing = Vec::new();
        let mut found = None;
        for (path, is_required) in explicit.into_iter().zip(required) {
            if found.is_some() && !is_required {
                continue;
            }
            match load_config_file(&path)? {
                Some(layer) if found.is_none() => found = Some((path, layer)),
                Some(_) => tracing::debug!(path = %path.display(), "required configuration present"),
                None if is_required => missing.push(Self::missing_required_error(&path)),
                None => tracing::debug!(path = %path.display(), "explicit configuration absent"),
            }
        }
        if let Some(err) = SuiteError::try_aggregate(missing) {
            return Err(Arc::new(err));
        }
        if let Some((path, layer)) = found {
            return Self::discovered(&path, layer).map(Some);
        }

        let mut present = Vec::new();
        for path in self.project_candidates() {
            if let Some(layer) = load_config_file(&path)? {
                present.push((path, layer));
            }
        }
        if present.len() > 1 {
            let names = present
                .iter()
                .map(|(path, _)| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Arc::new(SuiteError::validation(
                "config",
                format!("multiple configurations found ({names}); keep exactly one"),
            )));
        }
        present
            .pop()
            .map(|(path, layer)| Self::discovered(&path, layer))
            .transpose()
    }

    fn discovered(path: &Path, layer: Figment) -> SuiteResult<DiscoveredConfig> {
        let canonical = canonicalise(path)?;
        tracing::debug!(path = %canonical, "discovered configuration file");
        Ok(DiscoveredConfig {
            path: canonical,
            layer,
        })
    }

    fn missing_required_error(path: &Path) -> SuiteError {
        SuiteError::reference(
            "config",
            Utf8PathBuf::from(path.to_string_lossy().into_owned()),
            "does not exist or holds no configuration",
        )
    }
}
