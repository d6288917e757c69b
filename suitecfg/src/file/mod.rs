//! Helpers for reading configuration files into Figment layers.

mod error;
mod loader;
mod parser;
mod path;
#[cfg(feature = "yaml")]
mod yaml;

pub(crate) use error::{file_error, invalid_data};
pub use loader::{PACKAGE_MANIFEST, PACKAGE_MANIFEST_KEY, load_config_file};
pub use path::{canonicalise, config_dir};
#[cfg(feature = "yaml")]
pub use yaml::SaphyrYaml;

#[cfg(test)]
mod tests;
