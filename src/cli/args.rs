use crate::config::RunConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "tidyfan",
    version,
    about = "Runs clang-tidy over every file in a compilation database, in parallel"
)]
pub struct Cli {
    /// clang-tidy binary to run
    #[arg(long, value_name = "PATH")]
    pub clang_tidy_binary: Option<String>,
    /// clang-apply-replacements binary used by --fix
    #[arg(long, value_name = "PATH")]
    pub clang_apply_replacements_binary: Option<String>,
    /// Checks filter; clang-tidy's default when omitted
    #[arg(long, value_name = "FILTER", allow_hyphen_values = true)]
    pub checks: Option<String>,
    /// Inline clang-tidy configuration
    #[arg(long, value_name = "CFG")]
    pub config: Option<String>,
    /// Regex of headers to report diagnostics from
    #[arg(long, value_name = "RE")]
    pub header_filter: Option<String>,
    /// Merge every exported fix into this YAML file
    #[arg(long, value_name = "FILE")]
    pub export_fixes: Option<PathBuf>,
    /// Number of parallel clang-tidy processes (default: CPU count)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
    /// Apply fixes with clang-apply-replacements after the run
    #[arg(long)]
    pub fix: bool,
    /// Reformat code after applying fixes
    #[arg(long)]
    pub format: bool,
    /// Formatting style used with --format
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,
    /// Directory containing compile_commands.json
    #[arg(short = 'p', long, value_name = "DIR")]
    pub build_path: Option<PathBuf>,
    /// Extra compiler argument appended to each invocation
    #[arg(long, value_name = "ARG", allow_hyphen_values = true)]
    pub extra_arg: Vec<String>,
    /// Extra compiler argument prepended to each invocation
    #[arg(long, value_name = "ARG", allow_hyphen_values = true)]
    pub extra_arg_before: Vec<String>,
    /// Run clang-tidy in quiet mode
    #[arg(long)]
    pub quiet: bool,
    /// Print each distinct diagnostic only once
    #[arg(long)]
    pub deduplicate: bool,
    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
    /// Regexes selecting files from the database (default: all)
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,
}

impl Cli {
    /// Layers the flags over `config`. Flags win over file values; switches
    /// can only turn options on.
    pub fn apply_to(self, config: &mut RunConfig) {
        if let Some(bin) = self.clang_tidy_binary {
            config.clang_tidy_binary = bin;
        }
        if let Some(bin) = self.clang_apply_replacements_binary {
            config.clang_apply_replacements_binary = bin;
        }
        if self.checks.is_some() {
            config.checks = self.checks;
        }
        if self.config.is_some() {
            config.config = self.config;
        }
        if self.header_filter.is_some() {
            config.header_filter = self.header_filter;
        }
        if self.export_fixes.is_some() {
            config.export_fixes = self.export_fixes;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(style) = self.style {
            config.style = style;
        }
        if self.build_path.is_some() {
            config.build_path = self.build_path;
        }
        if !self.files.is_empty() {
            config.files = self.files;
        }
        config.fix |= self.fix;
        config.format |= self.format;
        config.quiet |= self.quiet;
        config.deduplicate |= self.deduplicate;
        config.verbose |= self.verbose;
        config.extra_arg.extend(self.extra_arg);
        config.extra_arg_before.extend(self.extra_arg_before);
    }
}
