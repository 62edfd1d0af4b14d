//! Public API for the queue system
//!
//! External modules should import from here rather than directly from
//! internal modules. See the module documentation for usage examples.

// Core queue components
pub use crate::queue::batch_queue::BatchQueue;
pub use crate::queue::processor::{BatchProcessor, FnProcessor, ProcessorError};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Configuration, statistics and snapshots
pub use crate::queue::types::{BatchFailure, QueueConfig, QueueStats, QueueStatus};
