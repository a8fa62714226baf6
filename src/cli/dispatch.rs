//! Runs the whole flow for a parsed command line.

use super::args::Cli;
use crate::aggregate::ResultAggregator;
use crate::compile_db::{self, FileFilter};
use crate::config::{RunConfig, TidyToml};
use crate::exit::TidyExit;
use crate::fixes::FixExportDir;
use crate::interrupt;
use crate::invocation::{tools, ProcessInvoker};
use crate::session;
use crate::types::RunSummary;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Executes a run described by `cli`.
///
/// # Errors
/// Returns error if configuration, database lookup, a tool check or the
/// session setup fails.
pub fn execute(cli: Cli) -> Result<TidyExit> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = resolve_config(cli, &cwd)?;

    let build_path = resolve_build_path(&config, &cwd)?;
    tools::check_tidy_binary(&config, &build_path)?;

    let filter = FileFilter::from_regex(config.file_regex()?);
    let files = filter.apply(compile_db::load_files(&build_path)?);
    info!(
        "{} files selected from {}",
        files.len(),
        build_path.display()
    );

    let export_dir = if config.needs_export_dir() {
        tools::check_apply_binary(&config)?;
        Some(FixExportDir::create()?)
    } else {
        None
    };
    interrupt::install(export_dir.as_ref().map(|d| d.path().to_path_buf()))?;

    let aggregator = ResultAggregator::stdio(config.deduplicate);
    let summary = session::run(
        &config,
        &build_path,
        &files,
        export_dir,
        &ProcessInvoker,
        aggregator,
    )?;

    print_summary(&summary);
    Ok(summary.exit())
}

/// Defaults, then `tidyfan.toml` from `cwd`, then the flags.
///
/// # Errors
/// Returns error if the config file is malformed or the result is invalid.
pub fn resolve_config(cli: Cli, cwd: &Path) -> Result<RunConfig> {
    let mut config = RunConfig::new();
    config.apply_toml(TidyToml::load_from(cwd)?);
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn resolve_build_path(config: &RunConfig, cwd: &Path) -> Result<PathBuf> {
    match &config.build_path {
        Some(path) => Ok(path.clone()),
        None => Ok(compile_db::find_compilation_database(cwd)?),
    }
}

fn print_summary(summary: &RunSummary) {
    let failed = summary.failed_files.len();
    if summary.has_failures() {
        let mut line = format!(
            "{} {} files analysed, {} failed",
            "✗".red().bold(),
            summary.files_processed,
            failed.to_string().red()
        );
        if summary.files_unfinished > 0 {
            line.push_str(&format!(", {} unfinished", summary.files_unfinished));
        }
        if summary.fix_step_failed {
            line.push_str(", fix step failed");
        }
        eprintln!("{line}");
        for path in &summary.failed_files {
            eprintln!("  {} {}", "-".red(), path.display());
        }
    } else {
        eprintln!(
            "{} {} files analysed, no failures",
            "✓".green().bold(),
            summary.files_processed
        );
    }
}
