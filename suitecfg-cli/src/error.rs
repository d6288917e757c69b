//! Errors reported by the `suitecfg` binary.

use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use suitecfg::SuiteError;
use thiserror::Error;

/// Errors raised while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration could not be loaded.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<SuiteError>),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    /// The resolved record could not be rendered as JSON.
    #[error("failed to render configuration: {0}")]
    Render(#[from] serde_json::Error),
    /// A path on the command line or the working directory is not UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    /// No transform rule applies to the file.
    #[error("no transform matches {0}")]
    NoTransform(Utf8PathBuf),
    /// The module specifier did not resolve to a file.
    #[error("cannot resolve '{specifier}' from {from}")]
    Unresolved {
        /// Specifier as given.
        specifier: String,
        /// Directory resolution started from.
        from: Utf8PathBuf,
    },
}

/// Result alias for command execution.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
