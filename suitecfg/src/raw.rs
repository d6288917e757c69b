//! Unvalidated configuration as extracted from the merged layers.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Transform value: a tool name, or a tool name with options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTransformer {
    Name(String),
    WithOptions(String, serde_json::Value),
}

impl RawTransformer {
    pub(crate) fn into_parts(self) -> (String, Option<serde_json::Value>) {
        match self {
            Self::Name(name) => (name, None),
            Self::WithOptions(name, options) => (name, Some(options)),
        }
    }
}

/// Every recognised key, still in its textual form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfig {
    pub(crate) preset: Option<String>,
    pub(crate) test_environment: Option<String>,
    pub(crate) roots: Option<Vec<String>>,
    pub(crate) test_match: Option<Vec<String>>,
    pub(crate) test_path_ignore_patterns: Option<Vec<String>>,
    pub(crate) module_file_extensions: Option<Vec<String>>,
    pub(crate) collect_coverage: Option<bool>,
    pub(crate) coverage_directory: Option<String>,
    pub(crate) coverage_reporters: Option<Vec<String>>,
    pub(crate) transform: Option<BTreeMap<String, RawTransformer>>,
    pub(crate) globals: Option<BTreeMap<String, serde_json::Value>>,
}
