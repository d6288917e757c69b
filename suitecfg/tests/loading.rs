//! End-to-end tests for loading configuration files.

use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde_json::json;
use suitecfg::{
    ConfigDiscovery, CoverageReporter, ErrorCategory, Overrides, SuiteConfig, SuiteError,
    TestEnvironment,
};
use test_helpers::project::TempProject;

#[fixture]
fn project() -> TempProject {
    TempProject::new().expect("create temporary project")
}

fn load(path: &Utf8PathBuf) -> Result<SuiteConfig> {
    SuiteConfig::load_from_path(path).map_err(|err| anyhow!("{err}"))
}

fn load_err(path: &Utf8PathBuf) -> Result<std::sync::Arc<SuiteError>> {
    SuiteConfig::load_from_path(path)
        .err()
        .context("expected the load to fail")
}

#[rstest]
fn full_record_is_resolved(project: TempProject) -> Result<()> {
    project.mkdir("tests/e2e")?;
    project.write("tsconfig.test.json", "{}")?;
    let path = project.write_json(
        "jest.config.json",
        &json!({
            "preset": "ts-jest",
            "testEnvironment": "node",
            "roots": ["<rootDir>/tests/e2e"],
            "testMatch": ["**/*.spec.ts"],
            "moduleFileExtensions": ["ts", "js", "json"],
            "collectCoverage": true,
            "coverageDirectory": "<rootDir>/coverage/e2e",
            "coverageReporters": ["json", "lcov", "text"],
            "globals": { "ts-jest": { "tsconfig": "<rootDir>/tsconfig.test.json" } }
        }),
    )?;
    let config = load(&path)?;
    assert_eq!(config.config_path(), Some(path.as_path()));
    assert_eq!(config.root_dir(), project.root());
    assert_eq!(config.preset(), Some("ts-jest"));
    assert_eq!(config.test_environment(), TestEnvironment::Node);
    assert_eq!(config.roots(), [project.path("tests/e2e")]);
    assert_eq!(config.test_match(), ["**/*.spec.ts"]);
    assert_eq!(config.module_file_extensions(), ["ts", "js", "json"]);
    assert!(config.collect_coverage());
    assert_eq!(config.coverage_directory(), project.path("coverage/e2e"));
    assert_eq!(
        config.coverage_reporters(),
        [CoverageReporter::Json, CoverageReporter::Lcov, CoverageReporter::Text]
    );
    let rule = config
        .transform()
        .transformer_for(&project.path("tests/e2e/foo.spec.ts"))
        .context("preset transform")?;
    assert_eq!(rule.transformer(), "ts-jest");
    let tsconfig = config
        .globals()
        .get("ts-jest")
        .and_then(|bag| bag.get("tsconfig"))
        .and_then(serde_json::Value::as_str);
    assert_eq!(tsconfig, Some(project.path("tsconfig.test.json").as_str()));
    Ok(())
}

#[rstest]
fn loading_twice_yields_equal_records(project: TempProject) -> Result<()> {
    project.mkdir("src")?;
    let path = project.write_json(
        "jest.config.json",
        &json!({ "roots": ["src"], "preset": "ts-jest/presets/js-with-babel" }),
    )?;
    let first = load(&path)?;
    let second = load(&path)?;
    ensure!(first == second, "records differ:\n{first:?}\n{second:?}");
    Ok(())
}

#[rstest]
fn unknown_key_is_a_validation_error(project: TempProject) -> Result<()> {
    let path = project.write_json("jest.config.json", &json!({ "verbose": true }))?;
    let err = load_err(&path)?;
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(err.key(), Some("verbose"));
    Ok(())
}

#[rstest]
fn missing_tsconfig_is_a_reference_error(project: TempProject) -> Result<()> {
    let path = project.write_json(
        "jest.config.json",
        &json!({ "globals": { "ts-jest": { "tsconfig": "tsconfig.missing.json" } } }),
    )?;
    let err = load_err(&path)?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    let missing = project.path("tsconfig.missing.json");
    assert!(err.to_string().contains(missing.as_str()), "{err}");
    Ok(())
}

#[rstest]
fn missing_transform_tsconfig_is_a_reference_error(project: TempProject) -> Result<()> {
    let path = project.write_json(
        "jest.config.json",
        &json!({
            "transform": { "^.+\\.tsx?$": ["ts-jest", { "tsconfig": "tsconfig.missing.json" }] }
        }),
    )?;
    let err = load_err(&path)?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert_eq!(err.key(), Some("transform.^.+\\.tsx?$.tsconfig"));
    let missing = project.path("tsconfig.missing.json");
    assert!(err.to_string().contains(missing.as_str()), "{err}");
    Ok(())
}

#[rstest]
#[case::json("jest.config.json", "{ \"roots\": ")]
#[case::toml("jest.config.toml", "roots = [")]
fn malformed_file_is_a_parse_error(
    project: TempProject,
    #[case] name: &str,
    #[case] contents: &str,
) -> Result<()> {
    let path = project.write(name, contents)?;
    let err = load_err(&path)?;
    assert_eq!(err.category(), ErrorCategory::Parse);
    Ok(())
}

#[rstest]
fn missing_file_is_a_reference_error(project: TempProject) -> Result<()> {
    let err = load_err(&project.path("jest.config.json"))?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert_eq!(err.key(), Some("config"));
    Ok(())
}

#[rstest]
fn wrong_value_type_names_the_key(project: TempProject) -> Result<()> {
    let path = project.write_json("jest.config.json", &json!({ "collectCoverage": "yes" }))?;
    let err = load_err(&path)?;
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(err.key(), Some("collectCoverage"));
    Ok(())
}

#[rstest]
fn every_problem_is_reported_together(project: TempProject) -> Result<()> {
    let path = project.write_json(
        "jest.config.json",
        &json!({
            "testEnvironemnt": "jsdom",
            "roots": ["absent"],
            "coverageReporters": ["pdf"],
        }),
    )?;
    let err = load_err(&path)?;
    let SuiteError::Aggregate(errors) = err.as_ref() else {
        return Err(anyhow!("expected aggregate, got {err:?}"));
    };
    let keys: Vec<_> = errors.iter().filter_map(SuiteError::key).collect();
    assert_eq!(keys, ["testEnvironemnt", "roots", "coverageReporters"]);
    assert!(err.to_string().contains("did you mean `testEnvironment`?"), "{err}");
    Ok(())
}

#[rstest]
fn toml_file_loads(project: TempProject) -> Result<()> {
    project.mkdir("web")?;
    let path = project.write(
        "jest.config.toml",
        concat!(
            "roots = [\"web\"]\n",
            "testEnvironment = \"jsdom\"\n",
            "[transform]\n",
            "'\\.vue$' = \"vue-jest\"\n",
        ),
    )?;
    let config = load(&path)?;
    assert_eq!(config.test_environment(), TestEnvironment::Jsdom);
    let rule = config
        .transform()
        .transformer_for(&project.path("web/App.vue"))
        .context("vue transform")?;
    assert_eq!(rule.transformer(), "vue-jest");
    Ok(())
}

#[rstest]
fn root_dir_is_relative_to_the_file(project: TempProject) -> Result<()> {
    project.mkdir("app/src")?;
    let path = project.write_json(
        "config/jest.config.json",
        &json!({ "rootDir": "../app", "roots": ["<rootDir>/src"] }),
    )?;
    let config = load(&path)?;
    assert_eq!(config.root_dir(), project.path("app"));
    assert_eq!(config.roots(), [project.path("app/src")]);
    assert_eq!(config.coverage_directory(), project.path("app/coverage"));
    Ok(())
}

#[rstest]
fn missing_root_dir_is_a_reference_error(project: TempProject) -> Result<()> {
    let path = project.write_json("jest.config.json", &json!({ "rootDir": "nowhere" }))?;
    let err = load_err(&path)?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert_eq!(err.key(), Some("rootDir"));
    Ok(())
}

#[rstest]
fn file_preset_sits_beneath_the_file(project: TempProject) -> Result<()> {
    project.write_json(
        "node_modules/company-preset/jest-preset.json",
        &json!({
            "testEnvironment": "jsdom",
            "collectCoverage": true,
            "transform": { "\\.css$": "css-stub" },
        }),
    )?;
    let path = project.write_json(
        "jest.config.json",
        &json!({
            "preset": "company-preset",
            "collectCoverage": false,
            "transform": { "\\.[jt]s$": "babel-jest" },
        }),
    )?;
    let config = load(&path)?;
    assert_eq!(config.test_environment(), TestEnvironment::Jsdom);
    assert!(!config.collect_coverage());
    let patterns: Vec<_> = config
        .transform()
        .rules()
        .iter()
        .map(|rule| rule.pattern())
        .collect();
    assert_eq!(patterns, ["\\.[jt]s$", "\\.css$"]);
    Ok(())
}

#[rstest]
fn unresolved_preset_is_a_reference_error(project: TempProject) -> Result<()> {
    let path = project.write_json("jest.config.json", &json!({ "preset": "no-such-preset" }))?;
    let err = load_err(&path)?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert_eq!(err.key(), Some("preset"));
    Ok(())
}

#[rstest]
fn overrides_take_precedence(project: TempProject) -> Result<()> {
    project.mkdir("unit")?;
    let path = project.write_json(
        "jest.config.json",
        &json!({ "testEnvironment": "jsdom", "collectCoverage": false, "testMatch": ["**/*.test.js"] }),
    )?;
    let overrides = Overrides {
        test_environment: Some(TestEnvironment::Node),
        collect_coverage: Some(true),
        roots: Some(vec!["unit".into()]),
        coverage_reporters: Some(vec![CoverageReporter::Lcovonly]),
        ..Overrides::default()
    };
    let config =
        SuiteConfig::load_from_path_with(&path, &overrides).map_err(|err| anyhow!("{err}"))?;
    assert_eq!(config.test_environment(), TestEnvironment::Node);
    assert!(config.collect_coverage());
    assert_eq!(config.roots(), [project.path("unit")]);
    assert_eq!(config.test_match(), ["**/*.test.js"]);
    assert_eq!(config.coverage_reporters(), [CoverageReporter::Lcovonly]);
    Ok(())
}

#[rstest]
fn discovery_reads_the_package_manifest(project: TempProject) -> Result<()> {
    project.write_json(
        "package.json",
        &json!({ "name": "web", "jest": { "testEnvironment": "jsdom" } }),
    )?;
    let discovery = ConfigDiscovery::builder(project.root().as_std_path())
        .without_env_var()
        .build();
    let config = SuiteConfig::discover(&discovery, &Overrides::default())
        .map_err(|err| anyhow!("{err}"))?;
    assert_eq!(config.test_environment(), TestEnvironment::Jsdom);
    assert_eq!(config.root_dir(), project.root());
    Ok(())
}

#[rstest]
fn discovery_without_configuration_fails(project: TempProject) -> Result<()> {
    let discovery = ConfigDiscovery::builder(project.root().as_std_path())
        .without_env_var()
        .build();
    let err = SuiteConfig::discover(&discovery, &Overrides::default())
        .err()
        .context("expected missing configuration")?;
    assert_eq!(err.category(), ErrorCategory::Reference);
    Ok(())
}
