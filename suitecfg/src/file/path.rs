//! Filesystem path helpers for configuration files.

use crate::SuiteResult;

use camino::{Utf8Path, Utf8PathBuf};
use std::path::Path;

use super::error::{file_error, invalid_data};

/// Canonicalise `p` using platform-specific rules.
///
/// Returns an absolute, normalised UTF-8 path with symlinks resolved. On
/// Windows the `dunce` crate is used to avoid introducing UNC prefixes in
/// diagnostic messages.
///
/// # Errors
///
/// Returns a [`crate::SuiteError::File`] if canonicalisation fails or the
/// result is not valid UTF-8.
pub fn canonicalise(p: &Path) -> SuiteResult<Utf8PathBuf> {
    #[cfg(windows)]
    let canonical = dunce::canonicalize(p).map_err(|e| file_error(p, e))?;
    #[cfg(not(windows))]
    let canonical = std::fs::canonicalize(p).map_err(|e| file_error(p, e))?;
    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|raw| invalid_data(&raw, "path is not valid UTF-8"))
}

/// Directory holding the configuration file at `path`.
///
/// `path` is expected to be canonical; the filesystem root is returned for
/// the degenerate case of a file without a parent.
#[must_use]
pub fn config_dir(path: &Utf8Path) -> Utf8PathBuf {
    path.parent()
        .map_or_else(|| Utf8PathBuf::from("/"), Utf8Path::to_path_buf)
}
