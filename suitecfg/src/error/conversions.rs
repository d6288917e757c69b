//! Conversions between external error types and `SuiteError`.

use figment::Error as FigmentError;

use super::SuiteError;

impl From<FigmentError> for SuiteError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(e.into())
    }
}

/// Convert JSON encoding or decoding failures into
/// [`SuiteError::Gathering`].
impl From<serde_json::Error> for SuiteError {
    fn from(e: serde_json::Error) -> Self {
        Self::Gathering(Box::new(FigmentError::from(format!(
            "JSON error: {} at line {}, column {}",
            e,
            e.line(),
            e.column()
        ))))
    }
}

impl From<SuiteError> for FigmentError {
    /// Allow using `?` inside `figment::Jail` closures.
    fn from(e: SuiteError) -> Self {
        match e {
            SuiteError::Gathering(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
