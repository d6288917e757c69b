//! Loader and validator for Jest-style test runner configuration.
//!
//! A configuration file declares where tests live, which files count as
//! tests, how coverage is reported, which tools transform sources and any
//! tool-specific globals. This crate turns that file into an immutable
//! [`SuiteConfig`]:
//!
//! ```rust,no_run
//! use suitecfg::{ConfigDiscovery, CoveragePlan, Overrides, SuiteConfig, discover_test_files};
//!
//! # fn run() -> suitecfg::SuiteResult<()> {
//! let discovery = ConfigDiscovery::builder(".").build();
//! let config = SuiteConfig::discover(&discovery, &Overrides::default())?;
//!
//! let plan = CoveragePlan::from_config(&config);
//! if plan.enabled() {
//!     plan.prepare()?;
//! }
//! for test in discover_test_files(&config)? {
//!     println!("{test}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Loading fails fast. A file that does not parse, an option that is not
//! recognised, a value of the wrong shape, or a reference to a file that
//! does not exist all produce a [`SuiteError`] naming the key or path at
//! fault, and every such problem in one file is reported together.

use std::sync::Arc;

mod coverage;
mod discovery;
mod error;
mod file;
mod keys;
mod load;
mod model;
mod overrides;
mod pattern;
mod preset;
mod raw;
mod resolve;
pub mod result_ext;
pub mod rootdir;
mod suite;
mod validate;

pub use coverage::CoveragePlan;
pub use discovery::{
    ConfigDiscovery, ConfigDiscoveryBuilder, DEFAULT_ENV_VAR, DEFAULT_FILE_NAMES,
    DiscoveredConfig,
};
pub use error::{AggregatedErrors, ErrorCategory, SuiteError};
pub use file::{PACKAGE_MANIFEST, PACKAGE_MANIFEST_KEY, canonicalise, load_config_file};
#[cfg(feature = "yaml")]
pub use file::SaphyrYaml;
pub use keys::{KNOWN_KEYS, check_unknown_keys, suggest_key};
pub use model::{
    CoverageReporter, DEFAULT_COVERAGE_DIRECTORY, DEFAULT_COVERAGE_REPORTERS,
    DEFAULT_MODULE_FILE_EXTENSIONS, DEFAULT_TEST_MATCH, DEFAULT_TEST_PATH_IGNORE_PATTERNS,
    DEFAULT_TRANSFORM, ROOT_DIR_TOKEN, ReportTarget, SuiteConfig, TestEnvironment, TransformRule,
    TransformTable, UnknownEnvironment, UnknownReporter,
};
pub use overrides::Overrides;
pub use pattern::{PatternError, TestMatcher, expand_extglob};
pub use preset::{BUILTIN_PRESETS, PRESET_FILE_NAME, preset_candidates, resolve_preset};
pub use resolve::resolve_module;
pub use result_ext::{ExtractionResultExt, IntoFigmentError, ResultIntoFigment, SuiteResultExt};
pub use suite::{TestFiles, discover_test_files};
pub use validate::TSCONFIG_KEY;

/// Result type used throughout the crate. Errors are shared so aggregated
/// diagnostics can be cloned and inspected cheaply.
pub type SuiteResult<T> = Result<T, Arc<SuiteError>>;
