//! Table mapping file patterns to the transformer that compiles them.

use regex::Regex;
use serde::Serialize;

/// One entry of the transform table.
#[derive(Debug, Clone, Serialize)]
pub struct TransformRule {
    pattern: String,
    #[serde(skip)]
    regex: Regex,
    transformer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<serde_json::Value>,
}

impl TransformRule {
    /// Build a rule from an already compiled pattern.
    #[must_use]
    pub fn new(regex: Regex, transformer: impl Into<String>, options: Option<serde_json::Value>) -> Self {
        Self {
            pattern: regex.as_str().to_owned(),
            regex,
            transformer: transformer.into(),
            options,
        }
    }

    /// Source text of the path pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Identifier of the transform tool.
    #[must_use]
    pub fn transformer(&self) -> &str {
        &self.transformer
    }

    /// Options handed to the transform tool, if any.
    #[must_use]
    pub const fn options(&self) -> Option<&serde_json::Value> {
        self.options.as_ref()
    }

    /// Whether this rule applies to `path`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for TransformRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.transformer == other.transformer
            && self.options == other.options
    }
}

/// Ordered transform rules; the first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransformTable {
    rules: Vec<TransformRule>,
}

impl TransformTable {
    /// Build a table from rules in priority order.
    #[must_use]
    pub const fn new(rules: Vec<TransformRule>) -> Self {
        Self { rules }
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[TransformRule] {
        &self.rules
    }

    /// Whether the table holds no rules.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule that handles `path`, if any.
    ///
    /// Paths are matched with forward slashes so patterns behave the same on
    /// every platform.
    #[must_use]
    pub fn transformer_for(&self, path: &camino::Utf8Path) -> Option<&TransformRule> {
        let subject = path.as_str().replace('\\', "/");
        self.rules.iter().find(|rule| rule.matches(&subject))
    }
}
