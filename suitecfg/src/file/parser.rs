//! Format-specific parsing utilities for configuration files.

use crate::SuiteResult;

use figment::{
    Figment,
    providers::{Format, Json, Toml},
};

use std::path::Path;

use super::error::file_error;
#[cfg(feature = "yaml")]
use super::yaml::SaphyrYaml;

/// Parse configuration data according to the file extension.
///
/// JSON and TOML are always available; YAML requires the `yaml` feature.
/// Unknown extensions are rejected rather than guessed at.
///
/// # Errors
///
/// Returns a [`crate::SuiteError::File`] if the contents fail to parse or the
/// format is unsupported.
pub(super) fn parse_config_by_format(path: &Path, data: &str) -> SuiteResult<Figment> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let figment = match ext.as_deref() {
        Some("json") => {
            // Validate eagerly so parse failures carry this file's path and
            // position before Figment performs its own pass.
            serde_json::from_str::<serde_json::Value>(data).map_err(|e| file_error(path, e))?;
            Figment::from(Json::string(data))
        }
        Some("toml") => {
            toml::from_str::<toml::Value>(data).map_err(|e| file_error(path, e))?;
            Figment::from(Toml::string(data))
        }
        Some("yaml" | "yml") => {
            #[cfg(feature = "yaml")]
            {
                SaphyrYaml::validate(data).map_err(|e| file_error(path, e))?;
                Figment::from(SaphyrYaml::string(path.to_path_buf(), data.to_owned()))
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(file_error(
                    path,
                    std::io::Error::other(
                        "yaml feature disabled: enable the 'yaml' feature to support this file format",
                    ),
                ));
            }
        }
        other => {
            return Err(file_error(
                path,
                std::io::Error::other(format!(
                    "unsupported configuration format '{}': expected .json, .toml, .yaml or .yml",
                    other.unwrap_or("")
                )),
            ));
        }
    };

    Ok(figment)
}
