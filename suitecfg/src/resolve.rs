//! Extensionless module resolution using `moduleFileExtensions`.
//!
//! A specifier such as `./util` resolves to the first existing file among
//! `./util.<ext>` and then `./util/index.<ext>`, trying extensions in the
//! configured order. A specifier that already carries a listed extension and
//! exists resolves to itself.

use camino::{Utf8Path, Utf8PathBuf};

use crate::SuiteConfig;
use crate::rootdir;

fn has_listed_extension(path: &Utf8Path, extensions: &[String]) -> bool {
    path.extension()
        .is_some_and(|ext| extensions.iter().any(|listed| listed == ext))
}

fn with_extension_appended(path: &Utf8Path, ext: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{path}.{ext}"))
}

/// Resolve `specifier` relative to `from_dir`.
///
/// Absolute specifiers and those containing `<rootDir>` ignore `from_dir`.
/// Returns `None` when no candidate exists.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use suitecfg::{SuiteConfig, resolve_module};
///
/// # fn run() -> suitecfg::SuiteResult<()> {
/// let config = SuiteConfig::load_from_path("jest.config.json")?;
/// let resolved = resolve_module(&config, Utf8Path::new("/project/src"), "./util");
/// println!("{resolved:?}");
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn resolve_module(
    config: &SuiteConfig,
    from_dir: &Utf8Path,
    specifier: &str,
) -> Option<Utf8PathBuf> {
    let substituted = rootdir::substitute(specifier, config.root_dir());
    let base = rootdir::normalise(&from_dir.join(substituted));
    let extensions = config.module_file_extensions();

    if has_listed_extension(&base, extensions) && base.is_file() {
        return Some(base);
    }
    let resolved = extensions
        .iter()
        .map(|ext| with_extension_appended(&base, ext))
        .chain(
            extensions
                .iter()
                .map(|ext| base.join(format!("index.{ext}"))),
        )
        .find(|candidate| candidate.is_file());
    tracing::debug!(specifier, resolved = ?resolved, "resolved module");
    resolved
}
