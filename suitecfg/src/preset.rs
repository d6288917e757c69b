//! Preset resolution.
//!
//! A preset is a configuration layer placed beneath the file. Built-in
//! presets cover the TypeScript bundles; anything else is looked up as a
//! `jest-preset.json` next to the project or in its installed packages.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Format, Json};

use crate::keys::{check_unknown_keys, layer_keys};
use crate::{SuiteError, SuiteResult, load_config_file};

/// File name a preset directory must contain.
pub const PRESET_FILE_NAME: &str = "jest-preset.json";

const TS_JEST: &str = r#"{
    "transform": { "^.+\\.tsx?$": "ts-jest" },
    "moduleFileExtensions": ["js", "mjs", "cjs", "jsx", "ts", "tsx", "json", "node"]
}"#;

const TS_JEST_JS_WITH_TS: &str = r#"{
    "transform": { "^.+\\.[tj]sx?$": "ts-jest" },
    "moduleFileExtensions": ["js", "mjs", "cjs", "jsx", "ts", "tsx", "json", "node"]
}"#;

const TS_JEST_JS_WITH_BABEL: &str = r#"{
    "transform": { "^.+\\.tsx?$": "ts-jest", "^.+\\.jsx?$": "babel-jest" },
    "moduleFileExtensions": ["js", "mjs", "cjs", "jsx", "ts", "tsx", "json", "node"]
}"#;

/// Names of the presets available without any file on disk.
pub const BUILTIN_PRESETS: [&str; 3] = [
    "ts-jest",
    "ts-jest/presets/js-with-ts",
    "ts-jest/presets/js-with-babel",
];

/// Keys a preset may not set because they describe the project itself.
const FORBIDDEN_PRESET_KEYS: [&str; 2] = ["preset", "rootDir"];

fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "ts-jest" => Some(TS_JEST),
        "ts-jest/presets/js-with-ts" => Some(TS_JEST_JS_WITH_TS),
        "ts-jest/presets/js-with-babel" => Some(TS_JEST_JS_WITH_BABEL),
        _ => None,
    }
}

/// Locations searched for a preset named `name`, in order.
#[must_use]
pub fn preset_candidates(name: &str, root_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    vec![
        root_dir.join(name).join(PRESET_FILE_NAME),
        root_dir.join("node_modules").join(name).join(PRESET_FILE_NAME),
    ]
}

/// Resolve `name` to a configuration layer.
///
/// # Errors
///
/// Returns a reference error on `preset` when no candidate exists, a file
/// error when the preset file is malformed, and validation errors for
/// unknown or forbidden keys inside the preset.
pub fn resolve_preset(name: &str, root_dir: &Utf8Path) -> SuiteResult<Figment> {
    if let Some(source) = builtin(name) {
        tracing::debug!(preset = name, "using built-in preset");
        return Ok(Figment::from(Json::string(source)));
    }
    let candidates = preset_candidates(name, root_dir);
    for candidate in &candidates {
        if let Some(layer) = load_config_file(candidate.as_std_path())? {
            tracing::debug!(preset = name, path = %candidate, "loaded preset file");
            validate_preset_layer(&layer, name)?;
            return Ok(layer);
        }
    }
    let searched = candidates
        .iter()
        .map(Utf8PathBuf::as_path)
        .map(Utf8Path::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(Arc::new(SuiteError::reference(
        "preset",
        root_dir.join(name),
        format!("is not a built-in preset and no {PRESET_FILE_NAME} was found (searched {searched})"),
    )))
}

fn validate_preset_layer(layer: &Figment, name: &str) -> SuiteResult<()> {
    let source = format!("preset '{name}'");
    let mut errors: Vec<Arc<SuiteError>> = Vec::new();
    if let Err(err) = check_unknown_keys(layer, &source) {
        errors.push(err);
    }
    for key in layer_keys(layer)? {
        if FORBIDDEN_PRESET_KEYS.contains(&key.as_str()) {
            errors.push(Arc::new(SuiteError::validation(
                key,
                format!("cannot be set by {source}"),
            )));
        }
    }
    SuiteError::try_aggregate(errors).map_or(Ok(()), |err| Err(Arc::new(err)))
}
