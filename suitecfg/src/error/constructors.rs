//! Constructors and aggregation helpers for `SuiteError`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use figment::Error as FigmentError;

use super::{AggregatedErrors, SuiteError};

impl SuiteError {
    /// Tries to build a [`SuiteError`] from an iterator of errors.
    ///
    /// Returns `None` when no errors are supplied, the inner error when a
    /// single uniquely owned error is supplied, and [`Self::Aggregate`]
    /// otherwise. Nested aggregates are flattened.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = Vec::new();
        for err in errors {
            let arc: Arc<Self> = err.into();
            match Arc::try_unwrap(arc) {
                Ok(Self::Aggregate(inner)) => arcs.extend(*inner),
                Ok(other) => arcs.push(Arc::new(other)),
                Err(shared) => arcs.push(shared),
            }
        }
        if arcs.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(arcs))));
        }
        let last = arcs.pop()?;
        Some(match Arc::try_unwrap(last) {
            Ok(err) => err,
            Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
        })
    }

    /// Build a [`SuiteError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`SuiteError::try_aggregate`] when the
    /// list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Construct a validation error for `key`.
    #[must_use]
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Construct a reference error for `key` pointing at `path`.
    #[must_use]
    pub fn reference(
        key: impl Into<String>,
        path: impl Into<Utf8PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::Reference {
            key: key.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Construct an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use suitecfg::SuiteError;
    /// let fe = figment::Error::from("boom");
    /// let e = SuiteError::gathering(fe);
    /// assert!(matches!(e, SuiteError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Convert an extraction failure into errors naming the offending key.
    ///
    /// Figment reports every failed field in one error chain; each link with
    /// a key path becomes a [`Self::Validation`] for the dotted camelCase
    /// key. Links without a path fall back to [`Self::Gathering`].
    #[must_use]
    pub fn from_extraction(source: FigmentError) -> Self {
        let errors: Vec<Self> = source
            .into_iter()
            .map(|link| {
                if link.path.is_empty() {
                    Self::gathering(link)
                } else {
                    Self::validation(link.path.join("."), link.kind.to_string())
                }
            })
            .collect();
        Self::try_aggregate(errors)
            .unwrap_or_else(|| Self::gathering(FigmentError::from("configuration extraction failed")))
    }
}
