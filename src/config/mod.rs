// src/config/mod.rs
pub mod types;

pub use self::types::{RunConfig, TidyToml};

use crate::error::{Result, TidyError};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Name of the optional per-project config file.
pub const CONFIG_FILE: &str = "tidyfan.toml";

impl TidyToml {
    /// Loads `tidyfan.toml` from `dir`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| TidyError::io(e, &path))?;
        Self::parse(&content).map_err(|source| TidyError::ConfigParse { path, source })
    }

    /// Parses the TOML text of a config file.
    ///
    /// # Errors
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl RunConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers a config file over the current values. Flags set later on the
    /// command line still win because they are applied afterwards.
    pub fn apply_toml(&mut self, file: TidyToml) {
        if let Some(bin) = file.clang_tidy_binary {
            self.clang_tidy_binary = bin;
        }
        if let Some(bin) = file.clang_apply_replacements_binary {
            self.clang_apply_replacements_binary = bin;
        }
        if file.checks.is_some() {
            self.checks = file.checks;
        }
        if file.config.is_some() {
            self.config = file.config;
        }
        if file.header_filter.is_some() {
            self.header_filter = file.header_filter;
        }
        if let Some(jobs) = file.jobs {
            self.jobs = jobs;
        }
        if let Some(style) = file.style {
            self.style = style;
        }
        self.quiet |= file.quiet;
        self.deduplicate |= file.deduplicate;
        self.extra_arg.extend(file.extra_arg);
        self.extra_arg_before.extend(file.extra_arg_before);
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error if a tool binary name is empty or the file patterns do
    /// not form a valid regex.
    pub fn validate(&self) -> Result<()> {
        if self.clang_tidy_binary.trim().is_empty() {
            return Err(TidyError::InvalidConfig(
                "clang-tidy binary must not be empty".to_string(),
            ));
        }
        if self.needs_export_dir() && self.clang_apply_replacements_binary.trim().is_empty() {
            return Err(TidyError::InvalidConfig(
                "clang-apply-replacements binary must not be empty".to_string(),
            ));
        }
        self.file_regex()?;
        Ok(())
    }

    /// Number of worker threads to start.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get().max(1)
        } else {
            self.jobs
        }
    }

    /// Whether clang-tidy has to export fixes into a scratch directory.
    #[must_use]
    pub fn needs_export_dir(&self) -> bool {
        self.fix || self.export_fixes.is_some()
    }

    /// The positional patterns joined into one alternation.
    ///
    /// # Errors
    /// Returns error if the combined pattern is not a valid regex.
    pub fn file_regex(&self) -> Result<Regex> {
        let pattern = if self.files.is_empty() {
            types::default_file_pattern()
        } else {
            self.files.join("|")
        };
        Ok(Regex::new(&pattern)?)
    }
}
