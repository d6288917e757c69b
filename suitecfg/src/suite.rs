//! Test-file discovery over the configured roots.
//!
//! Every root is walked recursively and each regular file is kept when its
//! absolute path matches one of the `testMatch` globs and none of the
//! `testPathIgnorePatterns` regular expressions. Roots may overlap; the
//! result is a sorted set so a file is reported once.

use std::collections::BTreeSet;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use regex::RegexSet;
use walkdir::WalkDir;

use crate::pattern::TestMatcher;
use crate::{SuiteConfig, SuiteError, SuiteResult};

/// Paths selected as test files, sorted and free of duplicates.
pub type TestFiles = BTreeSet<Utf8PathBuf>;

struct Selector {
    matcher: TestMatcher,
    ignore: RegexSet,
}

impl Selector {
    fn from_config(config: &SuiteConfig) -> SuiteResult<Self> {
        let matcher = TestMatcher::new(config.test_match()).map_err(|(pattern, err)| {
            Arc::new(SuiteError::validation(
                "testMatch",
                format!("invalid pattern '{pattern}': {err}"),
            ))
        })?;
        let ignore = RegexSet::new(config.test_path_ignore_patterns()).map_err(|err| {
            Arc::new(SuiteError::validation(
                "testPathIgnorePatterns",
                err.to_string(),
            ))
        })?;
        Ok(Self { matcher, ignore })
    }

    fn selects(&self, path: &Utf8Path) -> bool {
        if !self.matcher.is_match(path) {
            return false;
        }
        let subject = path.as_str().replace('\\', "/");
        !self.ignore.is_match(&subject)
    }
}

fn walk_root(root: &Utf8Path, selector: &Selector, found: &mut TestFiles) -> SuiteResult<()> {
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(Arc::new(SuiteError::io(root, std::io::Error::from(err))));
            }
            Err(err) => {
                tracing::warn!(
                    root = %root,
                    path = ?err.path(),
                    error = %err,
                    "skipping unreadable entry"
                );
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
            tracing::warn!(root = %root, "skipping non UTF-8 path");
            continue;
        };
        if selector.selects(&path) {
            found.insert(path);
        }
    }
    Ok(())
}

/// Discover the test files selected by `config`.
///
/// # Examples
///
/// ```rust,no_run
/// use suitecfg::{SuiteConfig, discover_test_files};
///
/// # fn run() -> suitecfg::SuiteResult<()> {
/// let config = SuiteConfig::load_from_path("jest.config.json")?;
/// for file in discover_test_files(&config)? {
///     println!("{file}");
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`SuiteError::Io`] when a root cannot be read, and a validation
/// error if a pattern no longer compiles.
pub fn discover_test_files(config: &SuiteConfig) -> SuiteResult<TestFiles> {
    let selector = Selector::from_config(config)?;
    let mut found = TestFiles::new();
    for root in config.roots() {
        walk_root(root, &selector, &mut found)?;
    }
    tracing::debug!(
        roots = config.roots().len(),
        files = found.len(),
        "discovered test files"
    );
    Ok(found)
}
