//! Deterministic construction of clang-tidy command lines.

use crate::config::RunConfig;
use crate::error::Result;
use crate::fixes::reserve_fix_file;
use std::path::{Path, PathBuf};

/// One fully built command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidyInvocation {
    args: Vec<String>,
}

impl TidyInvocation {
    /// Wraps an argument vector whose first element is the program.
    #[must_use]
    pub fn from_args(args: Vec<String>) -> Self {
        Self { args }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        self.args.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments joined by single spaces, as echoed before each result block.
    #[must_use]
    pub fn display(&self) -> String {
        self.args.join(" ")
    }
}

/// Builds the per-file command line from the run configuration.
#[derive(Debug, Clone)]
pub struct InvocationBuilder {
    binary: String,
    checks: Option<String>,
    header_filter: Option<String>,
    export_dir: Option<PathBuf>,
    extra_arg: Vec<String>,
    extra_arg_before: Vec<String>,
    build_path: PathBuf,
    quiet: bool,
    config: Option<String>,
}

impl InvocationBuilder {
    /// `export_dir` is where per-file fix exports go; `None` disables export.
    #[must_use]
    pub fn new(config: &RunConfig, build_path: &Path, export_dir: Option<&Path>) -> Self {
        Self {
            binary: config.clang_tidy_binary.clone(),
            checks: config.checks.clone(),
            header_filter: config.header_filter.clone(),
            export_dir: export_dir.map(Path::to_path_buf),
            extra_arg: config.extra_arg.clone(),
            extra_arg_before: config.extra_arg_before.clone(),
            build_path: build_path.to_path_buf(),
            quiet: config.quiet,
            config: config.config.clone(),
        }
    }

    /// Builds the command line for `file`. With export on, this reserves a
    /// fresh fix file in the export directory.
    ///
    /// # Errors
    /// Returns error if the fix file cannot be created.
    pub fn build(&self, file: &Path) -> Result<TidyInvocation> {
        let mut args = vec![self.binary.clone()];
        if let Some(filter) = &self.header_filter {
            args.push(format!("-header-filter={filter}"));
        }
        if let Some(checks) = self.checks.as_deref().filter(|c| !c.is_empty()) {
            args.push(format!("-checks={checks}"));
        }
        if let Some(dir) = &self.export_dir {
            let fix_file = reserve_fix_file(dir)?;
            args.push("-export-fixes".to_string());
            args.push(fix_file.to_string_lossy().into_owned());
        }
        args.extend(self.extra_arg.iter().map(|a| format!("-extra-arg={a}")));
        args.extend(
            self.extra_arg_before
                .iter()
                .map(|a| format!("-extra-arg-before={a}")),
        );
        args.push(format!("-p={}", self.build_path.display()));
        if self.quiet {
            args.push("-quiet".to_string());
        }
        if let Some(config) = self.config.as_deref().filter(|c| !c.is_empty()) {
            args.push(format!("-config={config}"));
        }
        args.push(file.to_string_lossy().into_owned());
        Ok(TidyInvocation::from_args(args))
    }
}
