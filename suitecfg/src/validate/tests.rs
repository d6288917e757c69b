//! Unit tests for value and reference checks.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::project::TempProject;

use super::*;
use crate::ErrorCategory;

#[fixture]
fn project() -> TempProject {
    TempProject::new().expect("create temporary project")
}

fn check(project: &TempProject, raw: RawConfig) -> Result<SuiteConfig, Vec<SuiteError>> {
    Checks::new(project.root()).finish(raw, None)
}

fn single_error(project: &TempProject, raw: RawConfig) -> Result<SuiteError> {
    let mut errors = check(project, raw).err().ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(errors.len() == 1, "expected one error, got {errors:?}");
    errors.pop().ok_or_else(|| anyhow!("missing error"))
}

#[rstest]
fn empty_record_takes_defaults(project: TempProject) -> Result<()> {
    let config = check(&project, RawConfig::default()).map_err(|errs| anyhow!("{errs:?}"))?;
    assert_eq!(config.roots(), [project.root().to_path_buf()]);
    assert_eq!(config.test_match(), DEFAULT_TEST_MATCH);
    assert_eq!(config.test_path_ignore_patterns(), ["/node_modules/"]);
    assert_eq!(config.module_file_extensions(), DEFAULT_MODULE_FILE_EXTENSIONS);
    assert_eq!(config.coverage_directory(), project.path("coverage"));
    assert_eq!(config.coverage_reporters(), DEFAULT_COVERAGE_REPORTERS);
    assert_eq!(config.test_environment(), TestEnvironment::Node);
    assert!(!config.collect_coverage());
    let transformer = config
        .transform()
        .transformer_for(&project.path("src/app.tsx"))
        .map(TransformRule::transformer);
    assert_eq!(transformer, Some("babel-jest"));
    Ok(())
}

#[rstest]
fn roots_resolve_against_root_dir(project: TempProject) -> Result<()> {
    project.mkdir("tests/e2e")?;
    let raw = RawConfig {
        roots: Some(vec!["<rootDir>/tests/e2e".into(), "tests/e2e".into()]),
        ..RawConfig::default()
    };
    let config = check(&project, raw).map_err(|errs| anyhow!("{errs:?}"))?;
    assert_eq!(config.roots(), [project.path("tests/e2e")]);
    Ok(())
}

#[rstest]
fn missing_root_is_a_reference_error(project: TempProject) -> Result<()> {
    let raw = RawConfig {
        roots: Some(vec!["absent".into()]),
        ..RawConfig::default()
    };
    let err = single_error(&project, raw)?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert_eq!(err.key(), Some("roots"));
    assert!(err.to_string().contains("absent"));
    Ok(())
}

#[rstest]
fn empty_roots_are_rejected(project: TempProject) -> Result<()> {
    let raw = RawConfig {
        roots: Some(Vec::new()),
        ..RawConfig::default()
    };
    let err = single_error(&project, raw)?;
    assert_eq!(err.key(), Some("roots"));
    assert_eq!(err.category(), ErrorCategory::Validation);
    Ok(())
}

#[rstest]
#[case::environment(RawConfig { test_environment: Some("browser".into()), ..RawConfig::default() }, "testEnvironment")]
#[case::pattern(RawConfig { test_match: Some(vec!["**/*.{ts".into()]), ..RawConfig::default() }, "testMatch")]
#[case::negation(RawConfig { test_match: Some(vec!["**/!(x).ts".into()]), ..RawConfig::default() }, "testMatch")]
#[case::expansion(RawConfig { test_match: Some(vec!["**/?(a0)?(a1)?(a2)?(a3)?(a4)?(a5)?(a6)?(a7)?(a8)?(a9)?(b0)?(b1)?(b2)?(b3)x.ts".into()]), ..RawConfig::default() }, "testMatch")]
#[case::ignore(RawConfig { test_path_ignore_patterns: Some(vec!["(".into()]), ..RawConfig::default() }, "testPathIgnorePatterns")]
#[case::extensions_without_js(RawConfig { module_file_extensions: Some(vec!["ts".into()]), ..RawConfig::default() }, "moduleFileExtensions")]
#[case::dotted_extension(RawConfig { module_file_extensions: Some(vec!["js".into(), ".ts".into()]), ..RawConfig::default() }, "moduleFileExtensions")]
#[case::duplicate_extension(RawConfig { module_file_extensions: Some(vec!["js".into(), "js".into()]), ..RawConfig::default() }, "moduleFileExtensions")]
#[case::reporter(RawConfig { coverage_reporters: Some(vec!["pdf".into()]), ..RawConfig::default() }, "coverageReporters")]
#[case::duplicate_reporter(RawConfig { coverage_reporters: Some(vec!["lcov".into(), "lcov".into()]), ..RawConfig::default() }, "coverageReporters")]
#[case::coverage_directory(RawConfig { coverage_directory: Some("  ".into()), ..RawConfig::default() }, "coverageDirectory")]
#[case::preset(RawConfig { preset: Some(String::new()), ..RawConfig::default() }, "preset")]
fn invalid_values_name_their_key(
    project: TempProject,
    #[case] raw: RawConfig,
    #[case] key: &str,
) -> Result<()> {
    let err = single_error(&project, raw)?;
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(err.key(), Some(key));
    Ok(())
}

#[rstest]
fn transform_rules_are_checked_per_pattern(project: TempProject) -> Result<()> {
    let mut table = BTreeMap::new();
    table.insert("^.+\\.tsx?$".to_owned(), RawTransformer::Name("ts-jest".into()));
    table.insert("[".to_owned(), RawTransformer::Name("babel-jest".into()));
    table.insert("\\.css$".to_owned(), RawTransformer::Name(String::new()));
    let raw = RawConfig {
        transform: Some(table),
        ..RawConfig::default()
    };
    let errors = check(&project, raw).err().ok_or_else(|| anyhow!("expected failure"))?;
    let keys: Vec<_> = errors.iter().filter_map(SuiteError::key).collect();
    assert_eq!(keys, ["transform.[", "transform.\\.css$"]);
    Ok(())
}

#[rstest]
fn transform_options_are_kept(project: TempProject) -> Result<()> {
    let mut table = BTreeMap::new();
    table.insert(
        "^.+\\.tsx?$".to_owned(),
        RawTransformer::WithOptions("ts-jest".into(), json!({ "isolatedModules": true })),
    );
    let raw = RawConfig {
        transform: Some(table),
        ..RawConfig::default()
    };
    let config = check(&project, raw).map_err(|errs| anyhow!("{errs:?}"))?;
    let rule = config
        .transform()
        .transformer_for(&project.path("src/index.ts"))
        .ok_or_else(|| anyhow!("no transform for .ts"))?;
    assert_eq!(rule.transformer(), "ts-jest");
    assert_eq!(rule.options(), Some(&json!({ "isolatedModules": true })));
    assert!(config.transform().transformer_for(&project.path("src/index.js")).is_none());
    Ok(())
}

#[rstest]
fn tsconfig_reference_is_resolved(project: TempProject) -> Result<()> {
    let tsconfig = project.write("tsconfig.test.json", "{}")?;
    let mut globals = BTreeMap::new();
    globals.insert(
        "ts-jest".to_owned(),
        json!({ "tsconfig": "<rootDir>/tsconfig.test.json", "diagnostics": false }),
    );
    let raw = RawConfig {
        globals: Some(globals),
        ..RawConfig::default()
    };
    let config = check(&project, raw).map_err(|errs| anyhow!("{errs:?}"))?;
    let bag = config
        .globals()
        .get("ts-jest")
        .ok_or_else(|| anyhow!("globals lost ts-jest"))?;
    assert_eq!(bag.get("tsconfig"), Some(&json!(tsconfig.as_str())));
    assert_eq!(bag.get("diagnostics"), Some(&json!(false)));
    Ok(())
}

#[rstest]
fn missing_tsconfig_names_the_path(project: TempProject) -> Result<()> {
    let mut globals = BTreeMap::new();
    globals.insert("ts-jest".to_owned(), json!({ "tsconfig": "tsconfig.missing.json" }));
    let raw = RawConfig {
        globals: Some(globals),
        ..RawConfig::default()
    };
    let err = single_error(&project, raw)?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert_eq!(err.key(), Some("globals.ts-jest.tsconfig"));
    let expected = project.path("tsconfig.missing.json");
    assert!(matches!(&err, SuiteError::Reference { path, .. } if *path == expected));
    Ok(())
}

#[rstest]
fn transform_options_tsconfig_is_resolved(project: TempProject) -> Result<()> {
    let tsconfig = project.write("tsconfig.test.json", "{}")?;
    let mut transform = BTreeMap::new();
    transform.insert(
        "^.+\\.tsx?$".to_owned(),
        RawTransformer::WithOptions("ts-jest".into(), json!({ "tsconfig": "tsconfig.test.json" })),
    );
    let raw = RawConfig {
        transform: Some(transform),
        ..RawConfig::default()
    };
    let config = check(&project, raw).map_err(|errs| anyhow!("{errs:?}"))?;
    let rule = config
        .transform()
        .transformer_for(&project.path("src/sum.test.ts"))
        .ok_or_else(|| anyhow!("no rule for .ts"))?;
    let stored = rule.options().and_then(|bag| bag.get("tsconfig"));
    assert_eq!(stored, Some(&json!(tsconfig.as_str())));
    Ok(())
}

#[rstest]
fn missing_transform_tsconfig_names_the_rule(project: TempProject) -> Result<()> {
    let mut transform = BTreeMap::new();
    transform.insert(
        "^.+\\.tsx?$".to_owned(),
        RawTransformer::WithOptions("ts-jest".into(), json!({ "tsconfig": "tsconfig.missing.json" })),
    );
    let raw = RawConfig {
        transform: Some(transform),
        ..RawConfig::default()
    };
    let err = single_error(&project, raw)?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert_eq!(err.key(), Some("transform.^.+\\.tsx?$.tsconfig"));
    let expected = project.path("tsconfig.missing.json");
    assert!(matches!(&err, SuiteError::Reference { path, .. } if *path == expected));
    Ok(())
}

#[rstest]
fn failures_are_collected_together(project: TempProject) -> Result<()> {
    let raw = RawConfig {
        test_environment: Some("browser".into()),
        roots: Some(vec!["absent".into()]),
        coverage_reporters: Some(vec!["pdf".into()]),
        ..RawConfig::default()
    };
    let errors = check(&project, raw).err().ok_or_else(|| anyhow!("expected failure"))?;
    let keys: Vec<_> = errors.iter().filter_map(SuiteError::key).collect();
    assert_eq!(keys, ["testEnvironment", "roots", "coverageReporters"]);
    Ok(())
}
