//! Builder for configuration discovery.
//!
//! The builder lets applications customise the environment variable, file
//! names and explicit paths before producing a [`ConfigDiscovery`] that
//! drives the search order.

use std::path::PathBuf;

use super::{ConfigDiscovery, DEFAULT_ENV_VAR, DEFAULT_FILE_NAMES};

/// Builder for [`ConfigDiscovery`].
///
/// # Examples
///
/// ```rust,no_run
/// use suitecfg::ConfigDiscovery;
///
/// # fn run() -> suitecfg::SuiteResult<()> {
/// let discovery = ConfigDiscovery::builder(".")
///     .add_explicit_path("./ci/jest.config.json")
///     .build();
///
/// if let Some(found) = discovery.load_first()? {
///     println!("using {}", found.path);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscoveryBuilder {
    project_root: PathBuf,
    env_var: Option<String>,
    file_names: Vec<String>,
    include_manifest: bool,
    explicit_paths: Vec<PathBuf>,
    required_explicit_paths: Vec<PathBuf>,
}

impl ConfigDiscoveryBuilder {
    /// Creates a builder searching `project_root`.
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            env_var: Some(DEFAULT_ENV_VAR.to_owned()),
            file_names: DEFAULT_FILE_NAMES.map(str::to_owned).to_vec(),
            include_manifest: true,
            explicit_paths: Vec::new(),
            required_explicit_paths: Vec::new(),
        }
    }

    /// Sets the environment variable consulted for an explicit configuration path.
    #[must_use]
    pub fn env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = Some(env_var.into());
        self
    }

    /// Stops consulting any environment variable.
    #[must_use]
    pub fn without_env_var(mut self) -> Self {
        self.env_var = None;
        self
    }

    /// Replaces the dedicated configuration file names searched in the project root.
    #[must_use]
    pub fn file_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Controls whether the package manifest is searched for an embedded configuration.
    #[must_use]
    pub const fn include_manifest(mut self, include: bool) -> Self {
        self.include_manifest = include;
        self
    }

    /// Adds an explicit path that is used when it exists and skipped otherwise.
    #[must_use]
    pub fn add_explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_paths.push(path.into());
        self
    }

    /// Adds an explicit path that must exist.
    #[must_use]
    pub fn add_required_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.required_explicit_paths.push(path.into());
        self
    }

    /// Builds the configured [`ConfigDiscovery`].
    #[must_use]
    pub fn build(self) -> ConfigDiscovery {
        ConfigDiscovery {
            project_root: self.project_root,
            env_var: self.env_var,
            file_names: self.file_names,
            include_manifest: self.include_manifest,
            explicit_paths: self.explicit_paths,
            required_explicit_paths: self.required_explicit_paths,
        }
    }
}
