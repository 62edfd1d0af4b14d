//! BatchQueue implementation
//!
//! A FIFO buffer drained by at most one background task per queue. The task
//! removes up to `batch_size` items at a time, hands them to the processor,
//! records the outcome and pauses between batches.

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::processor::BatchProcessor;
use crate::queue::types::{BatchFailure, QueueConfig, QueueStats, QueueStatus};
use futures::FutureExt;
use std::any::Any;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Mutable queue state, always accessed under a single lock
struct QueueState<T> {
    buffer: VecDeque<T>,
    /// True while a drain task is running; guards against a second one
    draining: bool,
    stats: QueueStats<T>,
}

struct Shared<T> {
    state: Mutex<QueueState<T>>,
    processor: Arc<dyn BatchProcessor<T>>,
    config: QueueConfig,
    /// Runtime the drain task is spawned on
    runtime: Handle,
    /// Mirrors `!draining` for `wait_until_idle`
    idle: watch::Sender<bool>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        // The lock is never held across user code, so a poisoned state is still consistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory batching queue with a background drain loop
///
/// `BatchQueue` is a cheap handle; clones share the same buffer, stats and
/// drain task.
///
/// # Example
///
/// ```rust,no_run
/// use moviebatch::queue::{BatchQueue, FnProcessor, QueueConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = BatchQueue::new(
///     FnProcessor::new(|batch: Vec<u32>| async move {
///         println!("inserting {} rows", batch.len());
///         Ok::<(), String>(())
///     }),
///     QueueConfig::default(),
/// )?;
///
/// queue.enqueue(1..=25);
/// queue.wait_until_idle().await;
/// assert_eq!(queue.status().stats.total_processed, 25);
/// # Ok(())
/// # }
/// ```
pub struct BatchQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for BatchQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> BatchQueue<T>
where
    T: Clone + Send + 'static,
{
    /// Create a queue bound to the current Tokio runtime
    pub fn new<P>(processor: P, config: QueueConfig) -> QueueResult<Self>
    where
        P: BatchProcessor<T> + 'static,
    {
        Self::with_shared_processor(Arc::new(processor), config)
    }

    /// Create a queue around a processor that is also used elsewhere
    pub fn with_shared_processor(
        processor: Arc<dyn BatchProcessor<T>>,
        config: QueueConfig,
    ) -> QueueResult<Self> {
        if config.batch_size == 0 {
            return Err(QueueError::InvalidBatchSize);
        }
        let runtime = Handle::try_current().map_err(|e| QueueError::NoRuntime {
            message: e.to_string(),
        })?;
        let (idle, _) = watch::channel(true);

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState {
                    buffer: VecDeque::new(),
                    draining: false,
                    stats: QueueStats::default(),
                }),
                processor,
                config,
                runtime,
                idle,
            }),
        })
    }

    pub fn config(&self) -> QueueConfig {
        self.shared.config
    }

    /// Append items to the tail of the queue and start draining
    ///
    /// Never waits for processing. Returns the number of items appended.
    pub fn enqueue<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let added = items.len();

        let start_drain = {
            let mut state = self.shared.lock();
            state.buffer.extend(items);
            state.stats.total_submitted += added;

            let start = !state.draining && !state.buffer.is_empty();
            if start {
                state.draining = true;
                self.shared.idle.send_replace(false);
            }
            start
        };

        log::trace!("Enqueued {} items", added);

        if start_drain {
            log::debug!("Starting batch drain loop");
            self.shared.runtime.spawn(drain_loop(Arc::clone(&self.shared)));
        }

        added
    }

    /// Append a single item; see [`enqueue`](Self::enqueue)
    pub fn enqueue_one(&self, item: T) -> usize {
        self.enqueue(std::iter::once(item))
    }

    /// Snapshot of buffer length, drain state and a copy of the stats
    pub fn status(&self) -> QueueStatus<T> {
        let state = self.shared.lock();
        QueueStatus {
            queue_length: state.buffer.len(),
            processing: state.draining,
            stats: state.stats.clone(),
        }
    }

    /// Drop all buffered items and reset the stats
    ///
    /// A batch already handed to the processor is not affected; its outcome
    /// is applied to the freshly reset stats when it settles. Returns the
    /// number of buffered items discarded.
    pub fn clear(&self) -> usize {
        let discarded = {
            let mut state = self.shared.lock();
            let discarded = state.buffer.len();
            state.buffer.clear();
            state.stats = QueueStats::default();
            discarded
        };
        log::debug!("Cleared batch queue, discarded {} buffered items", discarded);
        discarded
    }

    /// Number of items waiting in the buffer
    pub fn len(&self) -> usize {
        self.shared.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a drain loop is currently running
    pub fn is_processing(&self) -> bool {
        self.shared.lock().draining
    }

    /// Resolve once no drain loop is running
    ///
    /// Returns immediately for an idle queue. There is no timeout: a
    /// processor that never settles keeps this pending.
    pub async fn wait_until_idle(&self) {
        let mut idle = self.shared.idle.subscribe();
        // The sender is owned by `self.shared`, so the channel cannot close here
        let _ = idle.wait_for(|idle| *idle).await;
    }
}

async fn drain_loop<T>(shared: Arc<Shared<T>>)
where
    T: Send + 'static,
{
    let QueueConfig {
        batch_size,
        inter_batch_delay,
    } = shared.config;

    loop {
        let batch: Vec<T> = {
            let mut state = shared.lock();
            if state.buffer.is_empty() {
                state.draining = false;
                shared.idle.send_replace(true);
                break;
            }
            let take = batch_size.min(state.buffer.len());
            state.buffer.drain(..take).collect()
        };
        let size = batch.len();

        let outcome = AssertUnwindSafe(shared.processor.process(&batch))
            .catch_unwind()
            .await;
        let error = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(payload) => Some(format!("processor panicked: {}", panic_message(&*payload))),
        };

        let more = {
            let mut state = shared.lock();
            match &error {
                None => state.stats.total_processed += size,
                Some(message) => {
                    state.stats.total_failed += size;
                    state.stats.errors.push(BatchFailure {
                        batch,
                        error: message.clone(),
                    });
                }
            }
            !state.buffer.is_empty()
        };

        match error {
            None => log::debug!("Processed batch of {} items", size),
            Some(message) => log::error!(
                "Queue processing error: batch of {} items failed: {}",
                size,
                message
            ),
        }

        if more {
            if inter_batch_delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(inter_batch_delay).await;
            }
        }
    }

    log::debug!("Batch drain loop finished");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
