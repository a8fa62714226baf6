//! Fixed-size worker pool over a bounded file queue.

mod queue;
mod worker;

pub use queue::{task_queue, TaskConsumer, TaskQueue, WorkItem};

use crate::aggregate::ResultAggregator;
use crate::error::{Result, TidyError};
use crate::invocation::{InvocationBuilder, Invoker};
use std::path::PathBuf;
use std::thread;
use tracing::{info, warn};

/// Counts reported once the pool has drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub queued: usize,
    pub processed: usize,
    /// Workers that died mid-run. Whatever they held was never recorded.
    pub panicked: usize,
}

/// N workers sharing one queue whose capacity equals the worker count.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs every file through `invoker` and hands the results to
    /// `aggregator`. Returns only after all workers have exited.
    ///
    /// A worker that panics stops taking items; the rest drain the queue. If
    /// every worker is gone, the remaining files are left unqueued.
    ///
    /// # Errors
    /// Returns error if a worker thread cannot be spawned.
    pub fn run<I>(
        &self,
        files: &[PathBuf],
        builder: &InvocationBuilder,
        invoker: &I,
        aggregator: &ResultAggregator,
    ) -> Result<PoolReport>
    where
        I: Invoker + ?Sized,
    {
        info!(
            "analysing {} files with {} workers",
            files.len(),
            self.workers
        );

        thread::scope(|scope| {
            // Dropping `queue` on any early return lets the workers finish,
            // so the scope can always join them.
            let (queue, consumer) = task_queue(self.workers);

            let mut handles = Vec::with_capacity(self.workers);
            for id in 0..self.workers {
                let consumer = consumer.clone();
                let handle = thread::Builder::new()
                    .name(format!("tidy-worker-{id}"))
                    .spawn_scoped(scope, move || {
                        worker::work(id, consumer, builder, invoker, aggregator)
                    })
                    .map_err(|e| TidyError::io(e, "<worker thread>"))?;
                handles.push(handle);
            }
            drop(consumer);

            let mut report = PoolReport::default();
            for file in files {
                if queue.push(WorkItem::new(file.clone())).is_err() {
                    let skipped = files.len() - report.queued;
                    warn!("no workers left, {skipped} files not queued");
                    break;
                }
                report.queued += 1;
            }
            queue.close();

            for handle in handles {
                match handle.join() {
                    Ok(count) => report.processed += count,
                    Err(_) => {
                        warn!("a worker thread panicked");
                        report.panicked += 1;
                    }
                }
            }
            Ok(report)
        })
    }
}
