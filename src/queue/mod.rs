//! In-process Batch Queue
//!
//! A generic FIFO that groups submitted items into fixed-size batches and
//! hands each batch to a caller-supplied asynchronous processor in the
//! background, pausing between batches to throttle the downstream resource.
//!
//! # Overview
//!
//! - **Fire-and-forget submission**: `enqueue` appends and returns at once
//! - **Single drain loop**: at most one background task drains a queue
//! - **FIFO batches**: items leave in submission order, `batch_size` at a time
//! - **No retries**: a rejected batch is recorded in the stats and dropped
//! - **Snapshots**: `status()` reports buffer length, drain state and stats
//!
//! Nothing is persisted; a queue's contents die with the process.
//!
//! # Architecture
//!
//! ```text
//!  enqueue ──▶ ┌───┬───┬───┬───┬───┬───┬───┐
//!  enqueue ──▶ │ 1 │ 2 │ 3 │ 4 │ 5 │ 6 │ 7 │  buffer (VecDeque)
//!              └─┬─┴───┴───┴───┴───┴───┴───┘
//!                │ drain(..batch_size)
//!                ▼
//!         ┌─────────────┐   Ok   ┌──────────────────────┐
//!         │  processor  │ ─────▶ │ total_processed += n │
//!         │   (async)   │  Err   ├──────────────────────┤
//!         └─────────────┘ ─────▶ │ total_failed += n    │
//!                                │ errors.push(batch)   │
//!                                └──────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use moviebatch::queue::{BatchQueue, FnProcessor, QueueConfig};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = BatchQueue::new(
//!     FnProcessor::new(|batch: Vec<String>| async move {
//!         if batch.iter().any(|item| item == "x") {
//!             return Err("rejected".to_string());
//!         }
//!         Ok(())
//!     }),
//!     QueueConfig::new(3, Duration::from_millis(10)),
//! )?;
//!
//! queue.enqueue(["a", "x", "c", "d"].map(String::from));
//! queue.wait_until_idle().await;
//!
//! let status = queue.status();
//! assert_eq!(status.stats.total_failed, 3);
//! assert_eq!(status.stats.total_processed, 1);
//! # Ok(())
//! # }
//! ```

mod batch_queue;
mod error;
mod processor;
mod types;

pub mod api;

pub use batch_queue::BatchQueue;
pub use error::{QueueError, QueueResult};
pub use processor::{BatchProcessor, FnProcessor, ProcessorError};
pub use types::{
    BatchFailure, QueueConfig, QueueStats, QueueStatus, DEFAULT_BATCH_SIZE,
    DEFAULT_INTER_BATCH_DELAY,
};

#[cfg(test)]
mod tests;
