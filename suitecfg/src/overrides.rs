//! Values supplied by the caller that take precedence over every file layer.

use camino::Utf8PathBuf;
use figment::providers::Serialized;
use serde::Serialize;

use crate::model::{CoverageReporter, TestEnvironment};

/// Caller-supplied overrides, typically parsed from command-line flags.
///
/// Unset fields are skipped when serialised so they never mask values from
/// the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    /// Root directory, resolved against the current directory.
    #[serde(skip)]
    pub root_dir: Option<Utf8PathBuf>,
    /// Runtime context for tests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_environment: Option<TestEnvironment>,
    /// Directories searched for test files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roots: Option<Vec<String>>,
    /// Test-file glob patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_match: Option<Vec<String>>,
    /// Whether to collect coverage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_coverage: Option<bool>,
    /// Coverage output directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_directory: Option<String>,
    /// Coverage report formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_reporters: Option<Vec<CoverageReporter>>,
}

impl Overrides {
    /// Whether no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Figment provider carrying the set overrides.
    pub(crate) fn provider(&self) -> Serialized<&Self> {
        Serialized::defaults(self)
    }
}
