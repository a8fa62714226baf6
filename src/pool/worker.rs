//! The loop each worker thread runs.

use super::queue::TaskConsumer;
use crate::aggregate::ResultAggregator;
use crate::invocation::{InvocationBuilder, Invoker};
use tracing::debug;

/// Processes items until the queue is closed and drained. Returns how many
/// items this worker handled.
///
/// The invocation itself runs outside any lock; only the hand-off to the
/// aggregator is serialized.
pub(crate) fn work<I>(
    id: usize,
    consumer: TaskConsumer,
    builder: &InvocationBuilder,
    invoker: &I,
    aggregator: &ResultAggregator,
) -> usize
where
    I: Invoker + ?Sized,
{
    let mut handled = 0;
    for item in consumer.iter() {
        debug!(worker = id, file = %item.path().display(), "analysing");
        match builder.build(item.path()) {
            Ok(invocation) => {
                let result = invoker.invoke(&invocation);
                aggregator.record(item.path(), &result);
            }
            Err(e) => aggregator.record_error(item.path(), &e),
        }
        handled += 1;
    }
    handled
}
