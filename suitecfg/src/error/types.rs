//! Primary error enum for configuration loading flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while loading or applying a suite configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SuiteError {
    /// The configuration file could not be read or parsed.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path of the file that failed to load.
        path: std::path::PathBuf,
        /// Underlying read or parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A path named by the configuration does not exist.
    #[error("'{key}' refers to '{path}', which {message}")]
    Reference {
        /// Configuration key holding the reference.
        key: String,
        /// Path the key resolved to.
        path: Utf8PathBuf,
        /// What is wrong with the path.
        message: String,
    },

    /// A key is not recognised or holds an invalid value.
    #[error("Validation failed for '{key}': {message}")]
    Validation {
        /// Configuration key that failed validation.
        key: String,
        /// Human-readable explanation of the validation failure.
        message: String,
    },

    /// Error while gathering configuration from layered providers.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Filesystem failure outside the configuration file itself.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Path being read or created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Multiple errors were collected during a single load.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

/// Coarse classification of a [`SuiteError`].
///
/// Every failure aborts startup; the category only tells callers which
/// part of the configuration needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Malformed configuration syntax.
    Parse,
    /// A referenced file or directory does not exist.
    Reference,
    /// Unknown key or invalid value.
    Validation,
    /// Filesystem failure while applying the configuration.
    Io,
}

impl ErrorCategory {
    /// Every category, in reporting order.
    pub const ALL: [Self; 4] = [Self::Parse, Self::Reference, Self::Validation, Self::Io];

    /// Short lowercase label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "parse errors",
            Self::Reference => "missing references",
            Self::Validation => "invalid values",
            Self::Io => "filesystem errors",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SuiteError {
    /// Returns the category of this error.
    ///
    /// Aggregates report the category of their first member.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::File { .. } => ErrorCategory::Parse,
            Self::Reference { .. } => ErrorCategory::Reference,
            Self::Validation { .. } | Self::Gathering(_) => ErrorCategory::Validation,
            Self::Io { .. } => ErrorCategory::Io,
            Self::Aggregate(errors) => errors
                .iter()
                .next()
                .map_or(ErrorCategory::Validation, Self::category),
        }
    }

    /// Returns the configuration key this error is about, when there is one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Reference { key, .. } | Self::Validation { key, .. } => Some(key),
            _ => None,
        }
    }
}
