//! Recognised option names and the unknown-key check.
//!
//! Every top-level key must be one of [`KNOWN_KEYS`]; anything else is
//! rejected with a suggestion when a recognised key is close.

use std::sync::Arc;

use figment::{Figment, value::Dict};

use crate::result_ext::ExtractionResultExt;
use crate::{SuiteError, SuiteResult};

/// Top-level keys accepted in a configuration file.
pub const KNOWN_KEYS: [&str; 12] = [
    "rootDir",
    "preset",
    "testEnvironment",
    "roots",
    "testMatch",
    "testPathIgnorePatterns",
    "moduleFileExtensions",
    "collectCoverage",
    "coverageDirectory",
    "coverageReporters",
    "transform",
    "globals",
];

const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Suggest the recognised key closest to `unknown`.
#[must_use]
pub fn suggest_key(unknown: &str) -> Option<&'static str> {
    let lowered = unknown.to_ascii_lowercase();
    if let Some(exact) = KNOWN_KEYS
        .iter()
        .find(|known| known.to_ascii_lowercase() == lowered)
    {
        return Some(exact);
    }
    KNOWN_KEYS
        .iter()
        .map(|known| (strsim::levenshtein(unknown, known), *known))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known)
}

fn unknown_key_error(key: &str, source: &str) -> SuiteError {
    let message = suggest_key(key).map_or_else(
        || format!("unknown option in {source}"),
        |known| format!("unknown option in {source}; did you mean `{known}`?"),
    );
    SuiteError::validation(key, message)
}

/// Return the top-level keys of a configuration layer.
///
/// # Errors
///
/// Returns validation errors when the layer is not a mapping.
pub(crate) fn layer_keys(layer: &Figment) -> SuiteResult<Vec<String>> {
    let dict: Dict = layer.extract().into_suite_extraction()?;
    Ok(dict.into_keys().collect())
}

/// Check every top-level key of `layer` against [`KNOWN_KEYS`].
///
/// `source` names the layer in messages (for example the file path).
///
/// # Errors
///
/// Returns one validation error per unknown key, aggregated.
pub fn check_unknown_keys(layer: &Figment, source: &str) -> SuiteResult<()> {
    let errors: Vec<SuiteError> = layer_keys(layer)?
        .iter()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|key| unknown_key_error(key, source))
        .collect();
    SuiteError::try_aggregate(errors).map_or(Ok(()), |err| Err(Arc::new(err)))
}
