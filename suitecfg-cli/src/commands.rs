//! Command execution.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use suitecfg::{
    ConfigDiscovery, CoveragePlan, SuiteConfig, discover_test_files, resolve_module, rootdir,
};

use crate::cli::{CommandLine, Commands, GlobalArgs};
use crate::error::{CliError, Result};

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::from_path_buf(cwd).map_err(CliError::NonUtf8Path)
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf> {
    if path.is_absolute() {
        return Ok(rootdir::normalise(path));
    }
    Ok(rootdir::normalise(&current_dir()?.join(path)))
}

/// Load the configuration selected by `globals`.
///
/// `--config` names the file directly; otherwise the project directory is
/// searched.
///
/// # Errors
///
/// Returns [`CliError::Configuration`] when loading fails.
pub fn load(globals: &GlobalArgs) -> Result<SuiteConfig> {
    let overrides = globals.overrides();
    let config = match &globals.config {
        Some(path) => SuiteConfig::load_from_path_with(path, &overrides)?,
        None => {
            let discovery = ConfigDiscovery::builder(globals.project.as_std_path()).build();
            SuiteConfig::discover(&discovery, &overrides)?
        }
    };
    Ok(config)
}

fn show(config: &SuiteConfig, out: &mut impl Write) -> Result<()> {
    let rendered = serde_json::to_string_pretty(config)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn list(config: &SuiteConfig, out: &mut impl Write) -> Result<()> {
    for file in discover_test_files(config)? {
        writeln!(out, "{file}")?;
    }
    Ok(())
}

fn prepare(config: &SuiteConfig, out: &mut impl Write) -> Result<()> {
    let plan = CoveragePlan::from_config(config);
    if !plan.enabled() {
        writeln!(out, "coverage collection is disabled")?;
        return Ok(());
    }
    plan.prepare()?;
    writeln!(out, "{}", plan.directory())?;
    for artifact in plan.artifacts() {
        writeln!(out, "  {artifact}")?;
    }
    Ok(())
}

fn transform(config: &SuiteConfig, file: &Utf8Path, out: &mut impl Write) -> Result<()> {
    let path = absolute(file)?;
    let rule = config
        .transform()
        .transformer_for(&path)
        .ok_or_else(|| CliError::NoTransform(path.clone()))?;
    match rule.options() {
        Some(options) => writeln!(out, "{} {options}", rule.transformer())?,
        None => writeln!(out, "{}", rule.transformer())?,
    }
    Ok(())
}

fn resolve(
    config: &SuiteConfig,
    specifier: &str,
    from: Option<&Utf8Path>,
    out: &mut impl Write,
) -> Result<()> {
    let from_dir = match from {
        Some(dir) => absolute(dir)?,
        None => current_dir()?,
    };
    let resolved =
        resolve_module(config, &from_dir, specifier).ok_or_else(|| CliError::Unresolved {
            specifier: specifier.to_owned(),
            from: from_dir.clone(),
        })?;
    writeln!(out, "{resolved}")?;
    Ok(())
}

/// Run the parsed command line, writing results to `out`.
///
/// # Errors
///
/// Returns the first failure: loading, discovery, filesystem or output.
pub fn run(cli: &CommandLine, out: &mut impl Write) -> Result<()> {
    let config = load(&cli.globals)?;
    tracing::debug!(command = ?cli.command, "configuration loaded");
    match &cli.command {
        Commands::Show => show(&config, out),
        Commands::List => list(&config, out),
        Commands::Prepare => prepare(&config, out),
        Commands::Transform { file } => transform(&config, file, out),
        Commands::Resolve { specifier, from } => {
            resolve(&config, specifier, from.as_deref(), out)
        }
    }
}
