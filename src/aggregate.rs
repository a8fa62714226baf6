// src/aggregate.rs
//! The single serialization point of a run.
//!
//! Workers call into the aggregator after their invocation finishes. One
//! lock covers parsing, dedup bookkeeping, output and the failure list, so
//! each file's block reaches the terminal in one piece.

use crate::diagnostics::DiagnosticParser;
use crate::types::{CommandResult, RunSummary};
use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Stderr lines containing this are clang-tidy's per-file summary count.
pub const STDERR_NOISE: &str = "warnings generated";

/// Returns true for stderr lines that are never relayed.
#[must_use]
pub fn is_stderr_noise(line: &str) -> bool {
    line.contains(STDERR_NOISE)
}

/// Renders one output block: the command line, then the body, trimmed and
/// newline-terminated.
#[must_use]
pub fn render_block(command: &str, body: &str) -> String {
    let mut block = format!("{command}\n{body}");
    block.truncate(block.trim_end().len());
    block.push('\n');
    block
}

struct AggregatorState {
    parser: Option<DiagnosticParser>,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    failed: Vec<PathBuf>,
    files_processed: usize,
    unique_diagnostics: usize,
}

impl AggregatorState {
    fn push_failed(&mut self, path: &Path) {
        if !self.failed.iter().any(|p| p == path) {
            self.failed.push(path.to_path_buf());
        }
    }

    fn body_for(&mut self, result: &CommandResult) -> String {
        match self.parser.as_mut() {
            Some(parser) => {
                parser.parse_str(result.stdout());
                let diags = parser.take_diagnostics();
                parser.reset();
                self.unique_diagnostics += diags.len();
                diags
                    .iter()
                    .map(|d| d.canonical_text())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            None => result.stdout().trim().to_string(),
        }
    }

    fn write_out(&mut self, text: &str) {
        let written = self.out.write_all(text.as_bytes());
        if let Err(e) = written.and_then(|()| self.out.flush()) {
            warn!("failed to write results: {e}");
        }
    }

    fn write_err(&mut self, text: &str) {
        let written = self.err.write_all(text.as_bytes());
        if let Err(e) = written.and_then(|()| self.err.flush()) {
            warn!("failed to relay stderr: {e}");
        }
    }
}

/// Collects per-file results from all workers.
pub struct ResultAggregator {
    state: Mutex<AggregatorState>,
}

impl ResultAggregator {
    /// With `deduplicate`, stdout is parsed and only unseen diagnostics are
    /// written; otherwise the raw output is passed through.
    pub fn new<O, E>(deduplicate: bool, out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            state: Mutex::new(AggregatorState {
                parser: deduplicate.then(DiagnosticParser::new),
                out: Box::new(out),
                err: Box::new(err),
                failed: Vec::new(),
                files_processed: 0,
                unique_diagnostics: 0,
            }),
        }
    }

    /// Aggregator writing to the process's stdout and stderr.
    #[must_use]
    pub fn stdio(deduplicate: bool) -> Self {
        Self::new(deduplicate, io::stdout(), io::stderr())
    }

    /// Records a finished invocation for `path`: writes its block, relays
    /// filtered stderr and notes a non-zero exit as a failure.
    pub fn record(&self, path: &Path, result: &CommandResult) {
        let mut state = self.lock();
        state.files_processed += 1;
        if !result.passed() {
            warn!(
                "{} failed with exit code {}",
                path.display(),
                result.exit_code()
            );
            state.push_failed(path);
        }

        let body = state.body_for(result);
        state.write_out(&render_block(result.command(), &body));

        let relayed: String = result
            .stderr_lines_without(is_stderr_noise)
            .map(|line| format!("{line}\n"))
            .collect();
        if !relayed.is_empty() {
            state.write_err(&relayed);
        }
    }

    /// Records a file whose invocation could not even be prepared.
    pub fn record_error(&self, path: &Path, error: &dyn Display) {
        let mut state = self.lock();
        state.files_processed += 1;
        warn!("{}: {error}", path.display());
        state.push_failed(path);
        state.write_err(&format!("{}: {error}\n", path.display()));
    }

    /// Writes a progress notice (e.g. "Writing fixes to ...") to the output.
    pub fn notice(&self, message: &str) {
        self.lock().write_out(&format!("{message}\n"));
    }

    /// Writes an error report to the error stream.
    pub fn report_error(&self, message: &str) {
        self.lock().write_err(&format!("{message}\n"));
    }

    /// Failed files so far, in the order they were recorded.
    #[must_use]
    pub fn failed_files(&self) -> Vec<PathBuf> {
        self.lock().failed.clone()
    }

    /// Consumes the aggregator and returns the run's totals.
    #[must_use]
    pub fn finish(self) -> RunSummary {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        RunSummary {
            files_processed: state.files_processed,
            failed_files: state.failed,
            unique_diagnostics: state.unique_diagnostics,
            fingerprints_seen: state.parser.as_ref().map_or(0, |p| p.store().len()),
            fix_step_failed: false,
            files_unfinished: 0,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AggregatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
