//! Type definitions for the queue system
//!
//! Configuration, cumulative statistics and the status snapshot handed out
//! by [`BatchQueue::status`](crate::queue::BatchQueue::status).

use serde::Serialize;
use std::time::Duration;

/// Default maximum number of items handed to the processor per call
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default pause between successive batches
pub const DEFAULT_INTER_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Construction parameters for a batch queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum number of items per processor invocation (must be positive)
    pub batch_size: usize,
    /// Pause inserted between batches while the buffer is non-empty
    pub inter_batch_delay: Duration,
}

impl QueueConfig {
    pub fn new(batch_size: usize, inter_batch_delay: Duration) -> Self {
        Self {
            batch_size,
            inter_batch_delay,
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            inter_batch_delay: DEFAULT_INTER_BATCH_DELAY,
        }
    }
}

/// A batch the processor rejected, kept verbatim with its error message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure<T> {
    pub batch: Vec<T>,
    pub error: String,
}

/// Cumulative counters since construction or the last `clear()`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats<T> {
    /// Items accepted by `enqueue`
    pub total_submitted: usize,
    /// Items in batches the processor accepted
    pub total_processed: usize,
    /// Items in batches the processor rejected
    pub total_failed: usize,
    /// One record per failed batch, in failure order
    pub errors: Vec<BatchFailure<T>>,
}

impl<T> QueueStats<T> {
    /// Items that reached the processor and settled, successfully or not
    pub fn total_settled(&self) -> usize {
        self.total_processed + self.total_failed
    }
}

// Derived Default would require T: Default
impl<T> Default for QueueStats<T> {
    fn default() -> Self {
        Self {
            total_submitted: 0,
            total_processed: 0,
            total_failed: 0,
            errors: Vec::new(),
        }
    }
}

/// Point-in-time view of a queue
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus<T> {
    /// Items still waiting in the buffer (excludes a batch being processed)
    pub queue_length: usize,
    /// Whether a drain loop is running
    pub processing: bool,
    pub stats: QueueStats<T>,
}

impl<T> QueueStatus<T> {
    /// True when nothing is buffered and no drain loop is running
    pub fn is_idle(&self) -> bool {
        self.queue_length == 0 && !self.processing
    }
}
