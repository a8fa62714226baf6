//! Availability checks and the fix-apply step.

use crate::config::RunConfig;
use crate::error::{Result, TidyError};
use std::path::Path;
use std::process::{Command, Stdio};

/// Checks that clang-tidy runs against the build directory by listing the
/// enabled checks. Quiet mode discards the listing.
///
/// # Errors
/// Returns `ToolUnavailable` if the tool cannot be spawned or fails.
pub fn check_tidy_binary(config: &RunConfig, build_path: &Path) -> Result<()> {
    let mut cmd = Command::new(&config.clang_tidy_binary);
    cmd.arg("-list-checks")
        .arg(format!("-p={}", build_path.display()));
    if let Some(checks) = config.checks.as_deref().filter(|c| !c.is_empty()) {
        cmd.arg(format!("-checks={checks}"));
    }
    cmd.arg("-");
    if config.quiet {
        cmd.stdout(Stdio::null());
    }
    run_check(&mut cmd, "clang-tidy")
}

/// Checks that clang-apply-replacements runs.
///
/// # Errors
/// Returns `ToolUnavailable` if the tool cannot be spawned or fails.
pub fn check_apply_binary(config: &RunConfig) -> Result<()> {
    let mut cmd = Command::new(&config.clang_apply_replacements_binary);
    cmd.arg("--version");
    run_check(&mut cmd, "clang-apply-replacements")
}

/// Builds the applier command line for the fixes exported into `dir`.
#[must_use]
pub fn apply_command_line(config: &RunConfig, dir: &Path) -> Vec<String> {
    let mut args = vec![config.clang_apply_replacements_binary.clone()];
    if config.format {
        args.push("-format".to_string());
        args.push(format!("-style={}", config.style));
    }
    args.push(dir.to_string_lossy().into_owned());
    args
}

/// Runs clang-apply-replacements over `dir`.
///
/// # Errors
/// Returns `ApplyFailed` if the applier cannot be spawned or exits non-zero.
pub fn apply_fixes(config: &RunConfig, dir: &Path) -> Result<()> {
    let args = apply_command_line(config, dir);
    let status = Command::new(&args[0])
        .args(&args[1..])
        .status()
        .map_err(|e| TidyError::ApplyFailed(format!("{}: {e}", args[0])))?;
    if status.success() {
        Ok(())
    } else {
        Err(TidyError::ApplyFailed(format!(
            "{} exited with {}",
            args[0],
            status.code().unwrap_or(-1)
        )))
    }
}

fn run_check(cmd: &mut Command, tool: &str) -> Result<()> {
    let status = cmd.status().map_err(|e| TidyError::ToolUnavailable {
        tool: tool.to_string(),
        reason: e.to_string(),
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(TidyError::ToolUnavailable {
            tool: tool.to_string(),
            reason: format!("exited with {}", status.code().unwrap_or(-1)),
        })
    }
}
