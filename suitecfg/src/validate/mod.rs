//! Value and reference checks that turn a raw record into a `SuiteConfig`.
//!
//! Every check records its failures and carries on with a fallback so one
//! load reports every problem at once.

use std::collections::{BTreeMap, HashSet};

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use crate::SuiteError;
use crate::model::{
    CoverageReporter, DEFAULT_COVERAGE_DIRECTORY, DEFAULT_COVERAGE_REPORTERS,
    DEFAULT_MODULE_FILE_EXTENSIONS, DEFAULT_TEST_MATCH, DEFAULT_TEST_PATH_IGNORE_PATTERNS,
    DEFAULT_TRANSFORM, ROOT_DIR_TOKEN, SuiteConfig, TestEnvironment, TransformRule,
    TransformTable,
};
use crate::pattern::TestMatcher;
use crate::raw::{RawConfig, RawTransformer};
use crate::rootdir;

/// Option bag key that names a compiler-configuration file.
pub const TSCONFIG_KEY: &str = "tsconfig";

/// Collects failures while converting a raw record.
pub(crate) struct Checks<'a> {
    root: &'a Utf8Path,
    errors: Vec<SuiteError>,
}

impl<'a> Checks<'a> {
    pub(crate) const fn new(root: &'a Utf8Path) -> Self {
        Self {
            root,
            errors: Vec::new(),
        }
    }

    fn invalid(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.push(SuiteError::validation(key, message));
    }

    fn missing(&mut self, key: impl Into<String>, path: Utf8PathBuf, message: &str) {
        self.errors.push(SuiteError::reference(key, path, message));
    }

    /// Convert `raw` into a record, returning every failure found.
    pub(crate) fn finish(
        mut self,
        raw: RawConfig,
        config_path: Option<Utf8PathBuf>,
    ) -> Result<SuiteConfig, Vec<SuiteError>> {
        let config = SuiteConfig {
            config_path,
            root_dir: self.root.to_path_buf(),
            preset: self.preset(raw.preset),
            test_environment: self.test_environment(raw.test_environment),
            roots: self.roots(raw.roots),
            test_match: self.test_match(raw.test_match),
            test_path_ignore_patterns: self.ignore_patterns(raw.test_path_ignore_patterns),
            module_file_extensions: self.module_file_extensions(raw.module_file_extensions),
            collect_coverage: raw.collect_coverage.unwrap_or(false),
            coverage_directory: self.coverage_directory(raw.coverage_directory),
            coverage_reporters: self.coverage_reporters(raw.coverage_reporters),
            transform: self.transform(raw.transform),
            globals: self.globals(raw.globals),
        };
        if self.errors.is_empty() {
            Ok(config)
        } else {
            Err(self.errors)
        }
    }

    fn preset(&mut self, preset: Option<String>) -> Option<String> {
        if preset.as_deref().is_some_and(|name| name.trim().is_empty()) {
            self.invalid("preset", "must not be empty");
            return None;
        }
        preset
    }

    fn test_environment(&mut self, value: Option<String>) -> TestEnvironment {
        let Some(name) = value else {
            return TestEnvironment::default();
        };
        name.parse().unwrap_or_else(|err: crate::model::UnknownEnvironment| {
            self.invalid("testEnvironment", err.to_string());
            TestEnvironment::default()
        })
    }

    fn roots(&mut self, value: Option<Vec<String>>) -> Vec<Utf8PathBuf> {
        let entries = value.unwrap_or_else(|| vec![ROOT_DIR_TOKEN.to_owned()]);
        if entries.is_empty() {
            self.invalid("roots", "must list at least one directory");
        }
        let mut roots: Vec<Utf8PathBuf> = Vec::with_capacity(entries.len());
        for entry in entries {
            let path = rootdir::resolve(&entry, self.root);
            if !path.is_dir() {
                self.missing("roots", path, "is not an existing directory");
            } else if !roots.contains(&path) {
                roots.push(path);
            }
        }
        roots
    }

    fn test_match(&mut self, value: Option<Vec<String>>) -> Vec<String> {
        let patterns = value.unwrap_or_else(|| DEFAULT_TEST_MATCH.map(str::to_owned).to_vec());
        let mut resolved = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let substituted = rootdir::substitute_in_glob(&pattern, self.root);
            match TestMatcher::validate(&substituted) {
                Ok(()) => resolved.push(substituted),
                Err(err) => self.invalid("testMatch", format!("invalid pattern '{pattern}': {err}")),
            }
        }
        resolved
    }

    fn ignore_patterns(&mut self, value: Option<Vec<String>>) -> Vec<String> {
        let patterns = value
            .unwrap_or_else(|| DEFAULT_TEST_PATH_IGNORE_PATTERNS.map(str::to_owned).to_vec());
        let mut resolved = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let substituted = rootdir::substitute_in_regex(&pattern, self.root);
            match Regex::new(&substituted) {
                Ok(_) => resolved.push(substituted),
                Err(err) => self.invalid(
                    "testPathIgnorePatterns",
                    format!("invalid regular expression '{pattern}': {err}"),
                ),
            }
        }
        resolved
    }

    fn module_file_extensions(&mut self, value: Option<Vec<String>>) -> Vec<String> {
        const KEY: &str = "moduleFileExtensions";
        let Some(extensions) = value else {
            return DEFAULT_MODULE_FILE_EXTENSIONS.map(str::to_owned).to_vec();
        };
        if !extensions.iter().any(|ext| ext == "js") {
            self.invalid(KEY, "must include 'js'");
        }
        let mut seen = HashSet::new();
        for ext in &extensions {
            if ext.is_empty() {
                self.invalid(KEY, "entries must not be empty");
            } else if ext.starts_with('.') {
                self.invalid(KEY, format!("'{ext}' must be listed without a leading dot"));
            } else if !seen.insert(ext.as_str()) {
                self.invalid(KEY, format!("'{ext}' is listed more than once"));
            }
        }
        extensions
    }

    fn coverage_directory(&mut self, value: Option<String>) -> Utf8PathBuf {
        let dir = value.unwrap_or_else(|| DEFAULT_COVERAGE_DIRECTORY.to_owned());
        if dir.trim().is_empty() {
            self.invalid("coverageDirectory", "must not be empty");
            return rootdir::resolve(DEFAULT_COVERAGE_DIRECTORY, self.root);
        }
        rootdir::resolve(&dir, self.root)
    }

    fn coverage_reporters(&mut self, value: Option<Vec<String>>) -> Vec<CoverageReporter> {
        let Some(names) = value else {
            return DEFAULT_COVERAGE_REPORTERS.to_vec();
        };
        let mut reporters = Vec::with_capacity(names.len());
        for name in names {
            match name.parse::<CoverageReporter>() {
                Ok(reporter) if reporters.contains(&reporter) => {
                    self.invalid("coverageReporters", format!("'{name}' is listed more than once"));
                }
                Ok(reporter) => reporters.push(reporter),
                Err(err) => self.invalid("coverageReporters", err.to_string()),
            }
        }
        reporters
    }

    fn transform(&mut self, value: Option<BTreeMap<String, RawTransformer>>) -> TransformTable {
        let Some(entries) = value else {
            let (pattern, transformer) = DEFAULT_TRANSFORM;
            return Regex::new(pattern).map_or_else(
                |_| TransformTable::default(),
                |regex| TransformTable::new(vec![TransformRule::new(regex, transformer, None)]),
            );
        };
        let mut rules = Vec::with_capacity(entries.len());
        for (pattern, raw) in entries {
            let key = format!("transform.{pattern}");
            let (transformer, mut options) = raw.into_parts();
            if transformer.trim().is_empty() {
                self.invalid(key, "transformer name must not be empty");
                continue;
            }
            if let Some(bag) = options.as_mut() {
                self.tsconfig_reference(&key, bag);
            }
            match Regex::new(&pattern) {
                Ok(regex) => rules.push(TransformRule::new(regex, transformer, options)),
                Err(err) => self.invalid(key, format!("invalid regular expression: {err}")),
            }
        }
        TransformTable::new(rules)
    }

    fn globals(
        &mut self,
        value: Option<BTreeMap<String, serde_json::Value>>,
    ) -> BTreeMap<String, serde_json::Value> {
        let mut globals = value.unwrap_or_default();
        for (tool, bag) in &mut globals {
            self.tsconfig_reference(&format!("globals.{tool}"), bag);
        }
        globals
    }

    /// Resolve a string `tsconfig` entry of an option bag in place.
    ///
    /// Failures are reported under `<owner>.tsconfig`.
    fn tsconfig_reference(&mut self, owner: &str, bag: &mut serde_json::Value) {
        let Some(serde_json::Value::String(reference)) = bag.get_mut(TSCONFIG_KEY) else {
            return;
        };
        let path = rootdir::resolve(reference, self.root);
        if path.is_file() {
            *reference = path.into_string();
        } else {
            self.missing(format!("{owner}.{TSCONFIG_KEY}"), path, "does not exist");
        }
    }
}

#[cfg(test)]
mod tests;
