//! Runtime loading entrypoint for configuration files.

use crate::SuiteResult;

use figment::Figment;

use std::path::Path;

use super::error::file_error;
use super::parser::parse_config_by_format;
use super::path::canonicalise;

/// File name of the package manifest that may embed the configuration.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Key under which a package manifest embeds the configuration.
pub const PACKAGE_MANIFEST_KEY: &str = "jest";

/// Load configuration from a file, selecting the parser based on extension.
///
/// Returns `Ok(None)` if the file does not exist, or if it is a package
/// manifest without an embedded configuration object. For a manifest only
/// the embedded object is returned.
///
/// # Examples
///
/// ```rust,no_run
/// use suitecfg::load_config_file;
/// use std::path::Path;
///
/// # fn run() -> suitecfg::SuiteResult<()> {
/// if let Some(figment) = load_config_file(Path::new("jest.config.json"))? {
///     let preset: Option<String> = figment.extract_inner("preset").ok();
///     println!("preset: {preset:?}");
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns a [`crate::SuiteError::File`] if reading or parsing the file fails.
pub fn load_config_file(path: &Path) -> SuiteResult<Option<Figment>> {
    if !path.is_file() {
        return Ok(None);
    }
    let canonical = canonicalise(path)?;
    let data = std::fs::read_to_string(&canonical).map_err(|e| file_error(path, e))?;
    if canonical.file_name() == Some(PACKAGE_MANIFEST) {
        return load_manifest_section(canonical.as_std_path(), &data);
    }
    parse_config_by_format(canonical.as_std_path(), &data).map(Some)
}

fn load_manifest_section(path: &Path, data: &str) -> SuiteResult<Option<Figment>> {
    let manifest: serde_json::Value =
        serde_json::from_str(data).map_err(|e| file_error(path, e))?;
    match manifest.get(PACKAGE_MANIFEST_KEY) {
        None => Ok(None),
        Some(serde_json::Value::Object(_)) => {
            let figment = parse_config_by_format(path, data)?;
            Ok(Some(figment.focus(PACKAGE_MANIFEST_KEY)))
        }
        Some(_) => Err(super::invalid_data(
            path,
            format!("'{PACKAGE_MANIFEST_KEY}' entry must be an object"),
        )),
    }
}
