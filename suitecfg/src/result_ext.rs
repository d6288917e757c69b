//! Extensions for mapping errors to `SuiteResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(SuiteError::…(e)))`
//! patterns when converting external error types into the crate's
//! `SuiteResult<T>` alias (`Result<T, Arc<SuiteError>>`).
//!
//! # Examples
//!
//! ```
//! use suitecfg::{SuiteResult, SuiteResultExt};
//!
//! fn encode() -> SuiteResult<serde_json::Value> {
//!     serde_json::to_value(&42).into_suite()
//! }
//! ```

use std::sync::Arc;

use crate::{SuiteError, SuiteResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<SuiteError>`
/// into a `SuiteResult<T>`.
pub trait SuiteResultExt<T, E> {
    /// Convert `Result<T, E>` into `SuiteResult<T>` using `Into<SuiteError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<SuiteError>`.
    fn into_suite(self) -> SuiteResult<T>;
}

impl<T, E> SuiteResultExt<T, E> for Result<T, E>
where
    E: Into<SuiteError>,
{
    fn into_suite(self) -> SuiteResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension for figment extraction results whose failures should name the
/// offending configuration key.
pub trait ExtractionResultExt<T> {
    /// Convert `Result<T, figment::Error>` into `SuiteResult<T>` via
    /// [`SuiteError::from_extraction`].
    ///
    /// # Errors
    ///
    /// Returns the key-bearing validation errors when the input is `Err`.
    fn into_suite_extraction(self) -> SuiteResult<T>;
}

impl<T> ExtractionResultExt<T> for Result<T, figment::Error> {
    fn into_suite_extraction(self) -> SuiteResult<T> {
        self.map_err(|e| Arc::new(SuiteError::from_extraction(e)))
    }
}

/// Convert shared suite errors into `figment::Error` for use inside
/// `figment::Jail` closures in tests.
pub trait IntoFigmentError {
    /// Convert into a `figment::Error`, preserving message text.
    fn into_figment(self) -> figment::Error;
}

impl IntoFigmentError for Arc<SuiteError> {
    fn into_figment(self) -> figment::Error {
        match Arc::try_unwrap(self) {
            Ok(err) => err.into(),
            Err(shared) => figment::Error::from(shared.to_string()),
        }
    }
}

/// Extension mapping `SuiteResult<T>` into `Result<T, figment::Error>`.
pub trait ResultIntoFigment<T> {
    /// Convert the error side into a `figment::Error`.
    ///
    /// # Errors
    ///
    /// Returns the converted error when the input is `Err`.
    fn to_figment(self) -> Result<T, figment::Error>;
}

impl<T> ResultIntoFigment<T> for SuiteResult<T> {
    fn to_figment(self) -> Result<T, figment::Error> {
        self.map_err(IntoFigmentError::into_figment)
    }
}
