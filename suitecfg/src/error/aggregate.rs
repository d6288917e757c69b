//! Every failure found by one load attempt.
//!
//! A configuration usually fails in more than one place at once, so the
//! loader hands back the whole list. Reports group it by [`ErrorCategory`]
//! so syntax problems, dangling paths and bad values read as separate
//! sections.

use std::collections::BTreeSet;
use std::{error::Error, fmt, sync::Arc};

use super::{ErrorCategory, SuiteError};

/// Failures collected while loading one configuration.
///
/// # Examples
///
/// ```
/// use suitecfg::{ErrorCategory, SuiteError};
/// let err = SuiteError::aggregate(vec![
///     SuiteError::validation("testMatch", "bad glob"),
///     SuiteError::reference("roots", "/project/absent", "is not an existing directory"),
/// ]);
/// if let SuiteError::Aggregate(report) = err {
///     assert_eq!(report.keys().into_iter().collect::<Vec<_>>(), ["roots", "testMatch"]);
///     assert_eq!(report.in_category(ErrorCategory::Reference).count(), 1);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors {
    errors: Vec<Arc<SuiteError>>,
}

impl AggregatedErrors {
    /// Wrap the failures of one load, in the order they were found.
    #[must_use]
    pub const fn new(errors: Vec<Arc<SuiteError>>) -> Self {
        Self { errors }
    }

    /// Iterate over the failures in the order they were found.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &SuiteError> {
        self.errors.iter().map(Arc::as_ref)
    }

    /// Number of failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no failure was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failures of one category.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn in_category(&self, category: ErrorCategory) -> impl Iterator<Item = &SuiteError> {
        self.iter().filter(move |err| err.category() == category)
    }

    /// Failures reported against `key`.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a SuiteError> {
        self.iter().filter(move |err| err.key() == Some(key))
    }

    /// Distinct configuration keys with at least one failure, sorted.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<&str> {
        self.iter().filter_map(SuiteError::key).collect()
    }

    /// Categories present, in declaration order, with their failure counts.
    #[must_use]
    pub fn counts(&self) -> Vec<(ErrorCategory, usize)> {
        ErrorCategory::ALL
            .into_iter()
            .map(|category| (category, self.in_category(category).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (category, count) in self.counts() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{category} ({count}):")?;
            for err in self.in_category(category) {
                write!(f, "\n  - {err}")?;
            }
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a SuiteError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<SuiteError>>,
        fn(&'a Arc<SuiteError>) -> &'a SuiteError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<SuiteError>;
    type IntoIter = std::vec::IntoIter<Arc<SuiteError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
