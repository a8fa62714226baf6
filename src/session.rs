// src/session.rs
//! One complete run: the pool, then the optional fix steps.

use crate::aggregate::ResultAggregator;
use crate::config::RunConfig;
use crate::error::Result;
use crate::fixes::{merge_replacement_files, FixExportDir};
use crate::invocation::{tools, InvocationBuilder, Invoker};
use crate::pool::WorkerPool;
use crate::types::RunSummary;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Analyses every file, then merges and/or applies fixes as configured.
/// Fix-step failures are reported through `aggregator` and flagged in the
/// summary rather than returned.
///
/// `export_dir` must be present when fixes are exported or applied.
///
/// # Errors
/// Returns error if the worker pool cannot be started or the export
/// directory cannot be removed.
pub fn run<I>(
    config: &RunConfig,
    build_path: &Path,
    files: &[PathBuf],
    export_dir: Option<FixExportDir>,
    invoker: &I,
    aggregator: ResultAggregator,
) -> Result<RunSummary>
where
    I: Invoker + ?Sized,
{
    let builder = InvocationBuilder::new(
        config,
        build_path,
        export_dir.as_ref().map(FixExportDir::path),
    );
    let pool = WorkerPool::new(config.worker_count());
    let report = pool.run(files, &builder, invoker, &aggregator)?;
    debug!(
        queued = report.queued,
        processed = report.processed,
        panicked = report.panicked,
        "pool drained"
    );

    let fix_ok = match &export_dir {
        Some(dir) => run_fix_steps(config, dir.path(), &aggregator),
        None => true,
    };

    let mut summary = aggregator.finish();
    summary.files_unfinished = files.len().saturating_sub(summary.files_processed);
    if summary.files_unfinished > 0 {
        warn!("{} files were not analysed", summary.files_unfinished);
    }
    if !fix_ok {
        summary.mark_fix_failure();
    }

    if let Some(dir) = export_dir {
        dir.close()?;
    }
    Ok(summary)
}

fn run_fix_steps(config: &RunConfig, dir: &Path, aggregator: &ResultAggregator) -> bool {
    let mut ok = true;

    if let Some(mergefile) = &config.export_fixes {
        aggregator.notice(&format!("Writing fixes to {} ...", mergefile.display()));
        match merge_replacement_files(dir, mergefile) {
            Ok(outcome) => debug!(
                documents = outcome.documents,
                replacements = outcome.replacements,
                "fixes merged"
            ),
            Err(e) => {
                warn!("merging fixes failed: {e}");
                aggregator.report_error(&format!("Error exporting fixes: {e}"));
                ok = false;
            }
        }
    }

    if config.fix {
        aggregator.notice("Applying fixes ...");
        if let Err(e) = tools::apply_fixes(config, dir) {
            warn!("{e}");
            aggregator.report_error(&format!("Error applying fixes: {e}"));
            ok = false;
        }
    }

    ok
}
