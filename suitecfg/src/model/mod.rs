//! The resolved configuration record.
//!
//! A [`SuiteConfig`] is produced once by the loader and never mutated
//! afterwards; every path it holds is absolute and every pattern has had
//! `<rootDir>` substituted.

mod environment;
mod reporter;
mod transform;

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

pub use environment::{TestEnvironment, UnknownEnvironment};
pub use reporter::{CoverageReporter, ReportTarget, UnknownReporter};
pub use transform::{TransformRule, TransformTable};

/// Default test-file patterns.
pub const DEFAULT_TEST_MATCH: [&str; 2] = [
    "**/__tests__/**/*.[jt]s?(x)",
    "**/?(*.)+(spec|test).[jt]s?(x)",
];

/// Default ignore patterns applied to discovered test paths.
pub const DEFAULT_TEST_PATH_IGNORE_PATTERNS: [&str; 1] = ["/node_modules/"];

/// Default module file extensions, in resolution order.
pub const DEFAULT_MODULE_FILE_EXTENSIONS: [&str; 8] =
    ["js", "mjs", "cjs", "jsx", "ts", "tsx", "json", "node"];

/// Default coverage output directory, relative to the root directory.
pub const DEFAULT_COVERAGE_DIRECTORY: &str = "coverage";

/// Default coverage reporters.
pub const DEFAULT_COVERAGE_REPORTERS: [CoverageReporter; 4] = [
    CoverageReporter::Clover,
    CoverageReporter::Json,
    CoverageReporter::Lcov,
    CoverageReporter::Text,
];

/// Default transform applied when the configuration declares none.
pub const DEFAULT_TRANSFORM: (&str, &str) = (r"\.[jt]sx?$", "babel-jest");

/// Token replaced by the absolute root directory in paths and patterns.
pub const ROOT_DIR_TOKEN: &str = "<rootDir>";

/// Fully resolved test-runner configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteConfig {
    pub(crate) config_path: Option<Utf8PathBuf>,
    pub(crate) root_dir: Utf8PathBuf,
    pub(crate) preset: Option<String>,
    pub(crate) test_environment: TestEnvironment,
    pub(crate) roots: Vec<Utf8PathBuf>,
    pub(crate) test_match: Vec<String>,
    pub(crate) test_path_ignore_patterns: Vec<String>,
    pub(crate) module_file_extensions: Vec<String>,
    pub(crate) collect_coverage: bool,
    pub(crate) coverage_directory: Utf8PathBuf,
    pub(crate) coverage_reporters: Vec<CoverageReporter>,
    pub(crate) transform: TransformTable,
    pub(crate) globals: BTreeMap<String, serde_json::Value>,
}

impl SuiteConfig {
    /// File the configuration was loaded from, when it came from a file.
    #[must_use]
    pub fn config_path(&self) -> Option<&Utf8Path> {
        self.config_path.as_deref()
    }

    /// Directory every relative path resolves against.
    #[must_use]
    pub fn root_dir(&self) -> &Utf8Path {
        &self.root_dir
    }

    /// Name of the preset layered beneath the file, if any.
    #[must_use]
    pub fn preset(&self) -> Option<&str> {
        self.preset.as_deref()
    }

    /// Runtime context tests execute in.
    #[must_use]
    pub const fn test_environment(&self) -> TestEnvironment {
        self.test_environment
    }

    /// Directories searched for test files.
    #[must_use]
    pub fn roots(&self) -> &[Utf8PathBuf] {
        &self.roots
    }

    /// Glob patterns identifying test files.
    #[must_use]
    pub fn test_match(&self) -> &[String] {
        &self.test_match
    }

    /// Regular expressions excluding paths from discovery.
    #[must_use]
    pub fn test_path_ignore_patterns(&self) -> &[String] {
        &self.test_path_ignore_patterns
    }

    /// Module file extensions in resolution order.
    #[must_use]
    pub fn module_file_extensions(&self) -> &[String] {
        &self.module_file_extensions
    }

    /// Whether coverage is collected.
    #[must_use]
    pub const fn collect_coverage(&self) -> bool {
        self.collect_coverage
    }

    /// Output directory for coverage artifacts.
    #[must_use]
    pub fn coverage_directory(&self) -> &Utf8Path {
        &self.coverage_directory
    }

    /// Coverage report formats to emit.
    #[must_use]
    pub fn coverage_reporters(&self) -> &[CoverageReporter] {
        &self.coverage_reporters
    }

    /// Transform rules in priority order.
    #[must_use]
    pub const fn transform(&self) -> &TransformTable {
        &self.transform
    }

    /// Tool-specific option bags keyed by tool name.
    #[must_use]
    pub const fn globals(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.globals
    }
}
