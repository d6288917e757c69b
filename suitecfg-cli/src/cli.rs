//! Command-line interface definitions for `suitecfg`.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use suitecfg::{CoverageReporter, Overrides, TestEnvironment};

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(name = "suitecfg")]
#[command(about = "Load, validate and inspect test runner configuration")]
#[command(version)]
pub struct CommandLine {
    /// Options shared by every command.
    #[command(flatten)]
    pub globals: GlobalArgs,
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options that locate the configuration and override its values.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file to load instead of searching the project.
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Project directory searched for a configuration file.
    #[arg(long, global = true, value_name = "dir", default_value = ".")]
    pub project: Utf8PathBuf,
    /// Root directory, overriding `rootDir`.
    #[arg(long, global = true, value_name = "dir")]
    pub root_dir: Option<Utf8PathBuf>,
    /// Test environment, overriding `testEnvironment`.
    #[arg(long = "env", global = true, value_name = "node|jsdom")]
    pub test_environment: Option<TestEnvironment>,
    /// Collect coverage regardless of `collectCoverage`.
    #[arg(long = "coverage", global = true)]
    pub should_collect_coverage: bool,
    /// Coverage output directory, overriding `coverageDirectory`.
    #[arg(long, global = true, value_name = "dir")]
    pub coverage_directory: Option<String>,
    /// Coverage reporters, overriding `coverageReporters`.
    #[arg(long, global = true, value_name = "name", num_args = 1.., value_delimiter = ',')]
    pub coverage_reporters: Vec<CoverageReporter>,
    /// Test roots, overriding `roots`.
    #[arg(long, global = true, value_name = "dir", num_args = 1..)]
    pub roots: Vec<String>,
    /// Test-file globs, overriding `testMatch`.
    #[arg(long, global = true, value_name = "glob", num_args = 1..)]
    pub test_match: Vec<String>,
}

fn non_empty<T>(values: &[T]) -> Option<Vec<T>>
where
    T: Clone,
{
    (!values.is_empty()).then(|| values.to_vec())
}

impl GlobalArgs {
    /// Overrides expressed by these options; unset options stay unset.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            root_dir: self.root_dir.clone(),
            test_environment: self.test_environment,
            roots: non_empty(&self.roots),
            test_match: non_empty(&self.test_match),
            collect_coverage: self.should_collect_coverage.then_some(true),
            coverage_directory: self.coverage_directory.clone(),
            coverage_reporters: non_empty(&self.coverage_reporters),
        }
    }
}

/// Commands understood by `suitecfg`.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the resolved configuration as JSON.
    Show,
    /// List discovered test files, one per line.
    List,
    /// Create the coverage directory and list the artifacts reporters write.
    Prepare,
    /// Print the transformer that applies to a file.
    Transform {
        /// File to look up.
        file: Utf8PathBuf,
    },
    /// Resolve a module specifier using `moduleFileExtensions`.
    Resolve {
        /// Specifier such as `./util`.
        specifier: String,
        /// Directory to resolve from; defaults to the working directory.
        #[arg(long, value_name = "dir")]
        from: Option<Utf8PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::try_parse_from(args).expect("arguments parse")
    }

    #[rstest]
    fn unset_options_produce_no_overrides() {
        let cli = parse(&["suitecfg", "show"]);
        assert_eq!(cli.globals.overrides(), Overrides::default());
        assert_eq!(cli.globals.project, Utf8PathBuf::from("."));
    }

    #[rstest]
    fn options_map_onto_overrides() {
        let cli = parse(&[
            "suitecfg",
            "list",
            "--env",
            "jsdom",
            "--coverage",
            "--coverage-reporters",
            "lcov,text",
            "--roots",
            "src",
            "tests",
            "--test-match",
            "**/*.spec.ts",
        ]);
        let overrides = cli.globals.overrides();
        assert_eq!(overrides.test_environment, Some(TestEnvironment::Jsdom));
        assert_eq!(overrides.collect_coverage, Some(true));
        assert_eq!(
            overrides.coverage_reporters,
            Some(vec![CoverageReporter::Lcov, CoverageReporter::Text])
        );
        assert_eq!(overrides.roots, Some(vec!["src".to_owned(), "tests".to_owned()]));
        assert_eq!(overrides.test_match, Some(vec!["**/*.spec.ts".to_owned()]));
    }

    #[rstest]
    #[case(&["suitecfg", "show", "--env", "browser"])]
    #[case(&["suitecfg", "show", "--coverage-reporters", "pdf"])]
    fn unknown_values_are_rejected(#[case] args: &[&str]) {
        assert!(CommandLine::try_parse_from(args).is_err());
    }

    #[rstest]
    fn resolve_takes_a_start_directory() {
        let cli = parse(&["suitecfg", "resolve", "./util", "--from", "src"]);
        let Commands::Resolve { specifier, from } = cli.command else {
            panic!("expected resolve command");
        };
        assert_eq!(specifier, "./util");
        assert_eq!(from, Some(Utf8PathBuf::from("src")));
    }
}
