use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of `tidyfan.toml`. Every key is optional; absent keys fall back
/// to the built-in defaults or the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TidyToml {
    pub clang_tidy_binary: Option<String>,
    pub clang_apply_replacements_binary: Option<String>,
    pub checks: Option<String>,
    pub config: Option<String>,
    pub header_filter: Option<String>,
    pub jobs: Option<usize>,
    pub quiet: bool,
    pub deduplicate: bool,
    pub style: Option<String>,
    pub extra_arg: Vec<String>,
    pub extra_arg_before: Vec<String>,
}

/// Everything a run needs, after merging defaults, `tidyfan.toml` and flags.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub clang_tidy_binary: String,
    pub clang_apply_replacements_binary: String,
    /// Checks filter; clang-tidy's own default when `None`.
    pub checks: Option<String>,
    /// Inline YAML/JSON configuration passed as `-config=`.
    pub config: Option<String>,
    pub header_filter: Option<String>,
    /// Merged fix document destination.
    pub export_fixes: Option<PathBuf>,
    /// Worker count; `0` means one per available CPU.
    pub jobs: usize,
    /// Path regexes, OR-ed together.
    pub files: Vec<String>,
    pub fix: bool,
    pub format: bool,
    pub style: String,
    /// Directory holding `compile_commands.json`; searched for when `None`.
    pub build_path: Option<PathBuf>,
    pub extra_arg: Vec<String>,
    pub extra_arg_before: Vec<String>,
    pub quiet: bool,
    pub deduplicate: bool,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            clang_tidy_binary: default_tidy_binary(),
            clang_apply_replacements_binary: default_apply_binary(),
            checks: None,
            config: None,
            header_filter: None,
            export_fixes: None,
            jobs: 0,
            files: vec![default_file_pattern()],
            fix: false,
            format: false,
            style: default_style(),
            build_path: None,
            extra_arg: Vec::new(),
            extra_arg_before: Vec::new(),
            quiet: false,
            deduplicate: false,
            verbose: false,
        }
    }
}

pub(crate) fn default_tidy_binary() -> String {
    "clang-tidy".to_string()
}

pub(crate) fn default_apply_binary() -> String {
    "clang-apply-replacements".to_string()
}

pub(crate) fn default_style() -> String {
    "file".to_string()
}

pub(crate) fn default_file_pattern() -> String {
    ".*".to_string()
}
