//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,

    #[error("Batch queue must be created inside a Tokio runtime: {message}")]
    NoRuntime { message: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
