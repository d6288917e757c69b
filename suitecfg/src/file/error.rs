//! Error constructors shared by file loading helpers.

use crate::SuiteError;

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

/// Construct a [`SuiteError::File`] for a configuration path.
pub(crate) fn file_error(
    path: &Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<SuiteError> {
    Arc::new(SuiteError::File {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

pub(crate) fn invalid_data(path: &Path, msg: impl Into<String>) -> Arc<SuiteError> {
    file_error(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidData, msg.into()),
    )
}
