//! Bounded queue of files waiting for a worker.

use crate::error::{Result, TidyError};
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};

/// One file to analyse. Consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem(PathBuf);

impl WorkItem {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

/// Producer side of the queue.
#[derive(Debug)]
pub struct TaskQueue {
    sender: Sender<WorkItem>,
}

/// Consumer side of the queue; clone one per worker.
#[derive(Debug, Clone)]
pub struct TaskConsumer {
    receiver: Receiver<WorkItem>,
}

/// Creates a queue holding at most `capacity` pending items (minimum 1).
#[must_use]
pub fn task_queue(capacity: usize) -> (TaskQueue, TaskConsumer) {
    let (sender, receiver) = crossbeam_channel::bounded(capacity.max(1));
    (TaskQueue { sender }, TaskConsumer { receiver })
}

impl TaskQueue {
    /// Enqueues `item`, blocking while the queue is full.
    ///
    /// # Errors
    /// Returns `QueueClosed` if every consumer is gone.
    pub fn push(&self, item: WorkItem) -> Result<()> {
        self.sender.send(item).map_err(|_| TidyError::QueueClosed)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sender.capacity().unwrap_or(usize::MAX)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sender.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }

    /// Signals that no more items follow. Consumers drain what is left and
    /// then stop.
    pub fn close(self) {
        drop(self.sender);
    }
}

impl TaskConsumer {
    /// Blocks for the next item; `None` once the queue is closed and empty.
    #[must_use]
    pub fn next_item(&self) -> Option<WorkItem> {
        self.receiver.recv().ok()
    }

    /// Iterates until the queue is closed and drained.
    pub fn iter(&self) -> impl Iterator<Item = WorkItem> + '_ {
        self.receiver.iter()
    }
}
