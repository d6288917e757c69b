//! Test-match glob patterns.
//!
//! Patterns follow micromatch syntax. `globset` handles `*`, `?`, `**`,
//! classes and `{a,b}` alternation; extglob groups are expanded into plain
//! alternatives first:
//!
//! | group | expands to |
//! |---|---|
//! | `?(a\|b)` | nothing, `a`, `b` |
//! | `*(a\|b)` | nothing, `a`, `b` |
//! | `+(a\|b)` | `a`, `b` |
//! | `@(a\|b)` | `a`, `b` |
//!
//! Repetition is approximated by a single occurrence. Negated groups
//! (`!(…)`) are rejected, as is any pattern expanding to more than
//! [`MAX_EXPANSIONS`] globs.

use std::collections::HashSet;

use camino::Utf8Path;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;

/// Error raised for a pattern that cannot be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    /// An extglob group is missing its closing parenthesis.
    #[error("unclosed extglob group starting at byte {0}")]
    Unclosed(usize),
    /// A negated extglob group was used.
    #[error("negated extglob groups `!(...)` are not supported")]
    Negation,
    /// The extglob groups expand to more plain globs than allowed.
    #[error("extglob groups expand to more than {MAX_EXPANSIONS} globs")]
    TooManyExpansions,
    /// The expanded glob failed to compile.
    #[error(transparent)]
    Glob(#[from] globset::Error),
}

/// Upper bound on the plain globs one pattern may expand to.
pub const MAX_EXPANSIONS: usize = 1024;

const EXTGLOB_OPERATORS: [char; 5] = ['?', '*', '+', '@', '!'];

/// An extglob group found in a pattern.
struct Group<'a> {
    prefix: &'a str,
    operator: char,
    body: &'a str,
    suffix: &'a str,
}

fn find_group(pattern: &str) -> Result<Option<Group<'_>>, PatternError> {
    let mut chars = pattern.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
            continue;
        }
        if !EXTGLOB_OPERATORS.contains(&ch) || chars.peek().map(|(_, next)| *next) != Some('(') {
            continue;
        }
        let open = idx + ch.len_utf8();
        let close = matching_paren(pattern, open).ok_or(PatternError::Unclosed(idx))?;
        let (Some(prefix), Some(body), Some(suffix)) = (
            pattern.get(..idx),
            pattern.get(open + 1..close),
            pattern.get(close + 1..),
        ) else {
            return Err(PatternError::Unclosed(idx));
        };
        return Ok(Some(Group {
            prefix,
            operator: ch,
            body,
            suffix,
        }));
    }
    Ok(None)
}

/// Byte index of the parenthesis closing the one at `open`.
fn matching_paren(pattern: &str, open: usize) -> Option<usize> {
    let mut depth = 0_usize;
    let mut escaped = false;
    for (idx, ch) in pattern.char_indices().skip_while(|(i, _)| *i < open) {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split an extglob body on `|` outside nested groups.
fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    let mut escaped = false;
    for (idx, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                parts.extend(body.get(start..idx));
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.extend(body.get(start..));
    parts
}

/// Expand every extglob group in `pattern` into plain globs.
///
/// # Errors
///
/// Returns [`PatternError`] for unclosed or negated groups and for
/// patterns expanding past [`MAX_EXPANSIONS`].
pub fn expand_extglob(pattern: &str) -> Result<Vec<String>, PatternError> {
    let Some(group) = find_group(pattern)? else {
        return Ok(vec![pattern.to_owned()]);
    };
    let mut choices = Vec::new();
    match group.operator {
        '!' => return Err(PatternError::Negation),
        '?' | '*' => choices.push(String::new()),
        _ => {}
    }
    for alternative in split_alternatives(group.body) {
        choices.extend(expand_extglob(alternative)?);
        if choices.len() > MAX_EXPANSIONS {
            return Err(PatternError::TooManyExpansions);
        }
    }
    let tails = expand_extglob(group.suffix)?;
    let mut seen = HashSet::new();
    let mut expanded = Vec::new();
    for choice in &choices {
        for tail in &tails {
            let candidate = format!("{}{choice}{tail}", group.prefix);
            if seen.insert(candidate.clone()) {
                if expanded.len() == MAX_EXPANSIONS {
                    return Err(PatternError::TooManyExpansions);
                }
                expanded.push(candidate);
            }
        }
    }
    Ok(expanded)
}

/// Compiled set of test-match patterns.
#[derive(Debug, Clone)]
pub struct TestMatcher {
    set: GlobSet,
}

impl TestMatcher {
    /// Compile `patterns` into one matcher.
    ///
    /// `*` and `?` never cross a `/`; use `**` to span directories.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails, with its error.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, (String, PatternError)> {
        let mut builder = GlobSetBuilder::new();
        for entry in patterns {
            let pattern = entry.as_ref();
            Self::add(&mut builder, pattern).map_err(|err| (pattern.to_owned(), err))?;
        }
        let set = builder
            .build()
            .map_err(|err| (patterns_summary(patterns), PatternError::Glob(err)))?;
        Ok(Self { set })
    }

    /// Check a single pattern compiles.
    ///
    /// # Errors
    ///
    /// Returns the compile failure.
    pub fn validate(pattern: &str) -> Result<(), PatternError> {
        Self::add(&mut GlobSetBuilder::new(), pattern)
    }

    fn add(builder: &mut GlobSetBuilder, pattern: &str) -> Result<(), PatternError> {
        for expanded in expand_extglob(pattern)? {
            let glob = GlobBuilder::new(&expanded)
                .literal_separator(true)
                .backslash_escape(true)
                .build()?;
            builder.add(glob);
        }
        Ok(())
    }

    /// Whether `path` matches any pattern.
    #[must_use]
    pub fn is_match(&self, path: &Utf8Path) -> bool {
        self.set.is_match(path.as_str().replace('\\', "/"))
    }
}

fn patterns_summary<S: AsRef<str>>(patterns: &[S]) -> String {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn plain_patterns_pass_through() {
        assert_eq!(expand_extglob("**/*.spec.ts").expect("expand"), ["**/*.spec.ts"]);
    }

    #[test]
    fn optional_group_expands_to_absent_and_present() {
        assert_eq!(
            expand_extglob("*.[jt]s?(x)").expect("expand"),
            ["*.[jt]s", "*.[jt]sx"]
        );
    }

    #[test]
    fn nested_default_pattern_expands_fully() {
        let expanded = expand_extglob("**/?(*.)+(spec|test).[jt]s?(x)").expect("expand");
        assert_eq!(expanded.len(), 8);
        assert!(expanded.contains(&"**/*.spec.[jt]s".to_owned()));
        assert!(expanded.contains(&"**/test.[jt]sx".to_owned()));
    }

    #[test]
    fn negation_is_rejected() {
        assert!(matches!(
            expand_extglob("!(*.d).ts"),
            Err(PatternError::Negation)
        ));
    }

    #[test]
    fn unclosed_group_is_rejected() {
        assert!(matches!(
            expand_extglob("+(spec|test.ts"),
            Err(PatternError::Unclosed(0))
        ));
    }

    #[test]
    fn duplicate_expansions_are_collapsed() {
        assert_eq!(expand_extglob("?(a|a)b").expect("expand"), ["b", "ab"]);
    }

    #[test]
    fn ten_optional_groups_stay_within_the_cap() {
        let pattern = format!("**/{}x.ts", "?(a)".repeat(10));
        assert_eq!(expand_extglob(&pattern).expect("expand").len(), 11);
        let distinct: String = (0..10).map(|i| format!("?(a{i})")).collect();
        assert_eq!(
            expand_extglob(&format!("**/{distinct}x.ts")).expect("expand").len(),
            MAX_EXPANSIONS
        );
    }

    #[test]
    fn expansion_past_the_cap_is_rejected() {
        let groups: String = (0..14).map(|i| format!("?(a{i})")).collect();
        let pattern = format!("**/{groups}x.ts");
        assert!(matches!(
            expand_extglob(&pattern),
            Err(PatternError::TooManyExpansions)
        ));
        assert!(matches!(
            TestMatcher::validate(&pattern),
            Err(PatternError::TooManyExpansions)
        ));
    }

    #[rstest]
    #[case("/project/src/__tests__/sum.js", true)]
    #[case("/project/src/__tests__/deep/sum.tsx", true)]
    #[case("/project/src/sum.test.ts", true)]
    #[case("/project/src/sum.spec.jsx", true)]
    #[case("/project/src/test.js", true)]
    #[case("/project/src/sum.ts", false)]
    #[case("/project/src/sum.test.py", false)]
    fn default_patterns_match_like_the_runner(#[case] path: &str, #[case] expected: bool) {
        let matcher = TestMatcher::new(&crate::model::DEFAULT_TEST_MATCH).expect("compile");
        assert_eq!(matcher.is_match(Utf8Path::new(path)), expected, "{path}");
    }

    #[test]
    fn star_does_not_cross_directories() {
        let matcher = TestMatcher::new(&["/project/*.spec.ts"]).expect("compile");
        assert!(matcher.is_match(Utf8Path::new("/project/a.spec.ts")));
        assert!(!matcher.is_match(Utf8Path::new("/project/nested/a.spec.ts")));
    }

    #[test]
    fn invalid_glob_names_the_pattern() {
        let (pattern, _) = TestMatcher::new(&["**/[.ts"]).expect_err("invalid class");
        assert_eq!(pattern, "**/[.ts");
    }
}
