//! Error types produced while loading and using a suite configuration.

mod aggregate;
mod constructors;
mod conversions;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{ErrorCategory, SuiteError};
