//! The configuration loader.
//!
//! Loading runs once, synchronously, before any test work starts:
//!
//! 1. parse the file into a layer and check its keys;
//! 2. resolve the root directory and the preset layer;
//! 3. merge preset, file and overrides, then extract the raw record;
//! 4. resolve paths and validate every value and reference.
//!
//! Failures from every step that can still run are reported together.

use std::path::Path;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;

use crate::discovery::{ConfigDiscovery, DiscoveredConfig};
use crate::file::{canonicalise, config_dir};
use crate::keys::check_unknown_keys;
use crate::overrides::Overrides;
use crate::preset::resolve_preset;
use crate::raw::RawConfig;
use crate::result_ext::ExtractionResultExt;
use crate::validate::Checks;
use crate::{SuiteConfig, SuiteError, SuiteResult, load_config_file, rootdir};

fn fail(errors: Vec<Arc<SuiteError>>) -> Arc<SuiteError> {
    let err = SuiteError::try_aggregate(errors)
        .unwrap_or_else(|| SuiteError::validation("config", "configuration rejected"));
    if let SuiteError::Aggregate(report) = &err {
        tracing::debug!(
            keys = ?report.keys(),
            counts = ?report.counts(),
            "configuration rejected"
        );
    }
    Arc::new(err)
}

fn existing_dir(key: &str, path: &Utf8Path) -> SuiteResult<Utf8PathBuf> {
    if !path.is_dir() {
        return Err(Arc::new(SuiteError::reference(
            key,
            path,
            "is not an existing directory",
        )));
    }
    canonicalise(path.as_std_path())
}

fn resolve_root_dir(
    layer: &Figment,
    base_dir: &Utf8Path,
    overrides: &Overrides,
) -> SuiteResult<Utf8PathBuf> {
    if let Some(dir) = &overrides.root_dir {
        return existing_dir("rootDir", dir);
    }
    match layer.find_value("rootDir") {
        Ok(value) => {
            let Some(text) = value.as_str() else {
                return Err(Arc::new(SuiteError::validation(
                    "rootDir",
                    "must be a directory path string",
                )));
            };
            existing_dir("rootDir", &rootdir::normalise(&base_dir.join(text)))
        }
        Err(err) if err.missing() => Ok(base_dir.to_path_buf()),
        Err(err) => Err(Arc::new(SuiteError::from_extraction(err))),
    }
}

fn preset_name(layer: &Figment) -> Option<String> {
    layer
        .find_value("preset")
        .ok()
        .and_then(|value| value.into_string())
        .filter(|name| !name.trim().is_empty())
}

impl SuiteConfig {
    /// Load the configuration stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns a reference error when the file does not exist, a file error
    /// when it cannot be parsed, and validation or reference errors for its
    /// contents.
    pub fn load_from_path(path: impl AsRef<Path>) -> SuiteResult<Self> {
        Self::load_from_path_with(path, &Overrides::default())
    }

    /// Load the configuration stored at `path`, applying `overrides` on top.
    ///
    /// # Errors
    ///
    /// See [`SuiteConfig::load_from_path`].
    pub fn load_from_path_with(path: impl AsRef<Path>, overrides: &Overrides) -> SuiteResult<Self> {
        let file = path.as_ref();
        let Some(layer) = load_config_file(file)? else {
            return Err(Arc::new(SuiteError::reference(
                "config",
                Utf8PathBuf::from(file.to_string_lossy().into_owned()),
                "does not exist or holds no configuration",
            )));
        };
        let canonical = canonicalise(file)?;
        Self::from_discovered(
            DiscoveredConfig {
                path: canonical,
                layer,
            },
            overrides,
        )
    }

    /// Locate the configuration with `discovery` and load it.
    ///
    /// # Errors
    ///
    /// Returns a reference error naming the project root when no
    /// configuration exists, otherwise the errors of discovery and loading.
    pub fn discover(discovery: &ConfigDiscovery, overrides: &Overrides) -> SuiteResult<Self> {
        match discovery.load_first()? {
            Some(found) => Self::from_discovered(found, overrides),
            None => Err(Arc::new(SuiteError::reference(
                "config",
                Utf8PathBuf::from(discovery.project_root().to_string_lossy().into_owned()),
                "holds no configuration file",
            ))),
        }
    }

    /// Load a configuration that was discovered on disk.
    ///
    /// # Errors
    ///
    /// See [`SuiteConfig::load_from_path`].
    pub fn from_discovered(found: DiscoveredConfig, overrides: &Overrides) -> SuiteResult<Self> {
        let DiscoveredConfig { path, layer } = found;
        tracing::debug!(path = %path, "loading configuration file");
        let base_dir = config_dir(&path);
        Self::assemble(layer, Some(path), &base_dir, overrides)
    }

    /// Build a configuration from an in-memory layer.
    ///
    /// Relative paths resolve against `base_dir` unless the layer or the
    /// overrides set a root directory.
    ///
    /// # Errors
    ///
    /// Returns validation and reference errors for the layer's contents.
    pub fn from_figment(
        layer: Figment,
        base_dir: &Utf8Path,
        overrides: &Overrides,
    ) -> SuiteResult<Self> {
        Self::assemble(layer, None, base_dir, overrides)
    }

    fn assemble(
        layer: Figment,
        config_path: Option<Utf8PathBuf>,
        base_dir: &Utf8Path,
        overrides: &Overrides,
    ) -> SuiteResult<Self> {
        let source = config_path
            .as_ref()
            .map_or_else(|| String::from("configuration"), ToString::to_string);
        let mut errors: Vec<Arc<SuiteError>> = Vec::new();
        if let Err(err) = check_unknown_keys(&layer, &source) {
            errors.push(err);
        }
        let root_dir = match resolve_root_dir(&layer, base_dir, overrides) {
            Ok(dir) => dir,
            Err(err) => {
                errors.push(err);
                return Err(fail(errors));
            }
        };

        let mut base = Figment::new();
        if let Some(name) = preset_name(&layer) {
            match resolve_preset(&name, &root_dir) {
                Ok(preset) => base = base.merge(preset),
                Err(err) => errors.push(err),
            }
        }
        let merged = base.merge(layer).merge(overrides.provider());
        let raw: RawConfig = match merged.extract().into_suite_extraction() {
            Ok(raw) => raw,
            Err(err) => {
                errors.push(err);
                return Err(fail(errors));
            }
        };

        match Checks::new(&root_dir).finish(raw, config_path) {
            Ok(config) if errors.is_empty() => {
                tracing::debug!(
                    root_dir = %config.root_dir,
                    roots = config.roots.len(),
                    preset = config.preset.as_deref().unwrap_or("none"),
                    "configuration loaded"
                );
                Ok(config)
            }
            Ok(_) => Err(fail(errors)),
            Err(found) => {
                errors.extend(found.into_iter().map(Arc::new));
                Err(fail(errors))
            }
        }
    }
}
