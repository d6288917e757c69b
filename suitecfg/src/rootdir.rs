//! `<rootDir>` substitution and path resolution against the root directory.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use crate::model::ROOT_DIR_TOKEN;

/// Replace `<rootDir>` in `value` with `root`.
#[must_use]
pub fn substitute(value: &str, root: &Utf8Path) -> String {
    value.replace(ROOT_DIR_TOKEN, root.as_str())
}

/// Replace `<rootDir>` in a glob, using forward slashes for the root.
#[must_use]
pub fn substitute_in_glob(pattern: &str, root: &Utf8Path) -> String {
    pattern.replace(ROOT_DIR_TOKEN, &root.as_str().replace('\\', "/"))
}

/// Replace `<rootDir>` in a regular expression with the escaped root.
#[must_use]
pub fn substitute_in_regex(pattern: &str, root: &Utf8Path) -> String {
    let forward = root.as_str().replace('\\', "/");
    pattern.replace(ROOT_DIR_TOKEN, &regex::escape(&forward))
}

/// Resolve `value` to an absolute path under `root` unless already absolute.
#[must_use]
pub fn resolve(value: &str, root: &Utf8Path) -> Utf8PathBuf {
    let substituted = Utf8PathBuf::from(substitute(value, root));
    let joined = if substituted.is_absolute() {
        substituted
    } else {
        root.join(substituted)
    };
    normalise(&joined)
}

/// Remove `.` components and fold `..` into their parent without touching
/// the filesystem.
#[must_use]
pub fn normalise(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_str());
                }
            }
            other => out.push(other.as_str()),
        }
    }
    out
}
