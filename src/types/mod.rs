use serde::Serialize;
use std::path::PathBuf;

use crate::exit::TidyExit;

mod command;
pub use command::CommandResult;

/// Aggregated results of a full run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Files whose invocation finished (successfully or not).
    pub files_processed: usize,
    /// Files whose invocation failed, in the order they finished.
    pub failed_files: Vec<PathBuf>,
    /// Diagnostics written after deduplication. Zero when deduplication is off.
    pub unique_diagnostics: usize,
    /// Fingerprints held by the dedup store at the end of the run.
    pub fingerprints_seen: usize,
    /// Set when merging or applying fixes failed.
    pub fix_step_failed: bool,
    /// Files that never got a result because their worker died.
    pub files_unfinished: usize,
}

impl RunSummary {
    /// Returns true if any file or fix step failed, or a file was left
    /// without a result.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed_files.is_empty() || self.fix_step_failed || self.files_unfinished > 0
    }

    #[must_use]
    pub fn exit(&self) -> TidyExit {
        if self.has_failures() {
            TidyExit::Failure
        } else {
            TidyExit::Success
        }
    }

    /// Marks the run failed because a post-pool fix step failed.
    pub fn mark_fix_failure(&mut self) {
        self.fix_step_failed = true;
    }
}
