//! Batch processor seam
//!
//! The queue knows nothing about its items; all work happens in a
//! caller-supplied [`BatchProcessor`]. A processor is invoked once per batch
//! and either accepts or rejects the batch as a whole.

use async_trait::async_trait;
use std::future::Future;

/// Error type returned by processors
pub type ProcessorError = Box<dyn std::error::Error + Send + Sync>;

/// Asynchronous handler for one batch of queued items
///
/// # Example Implementation
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use moviebatch::queue::{BatchProcessor, ProcessorError};
///
/// struct PrintBatch;
///
/// #[async_trait]
/// impl BatchProcessor<String> for PrintBatch {
///     async fn process(&self, batch: &[String]) -> Result<(), ProcessorError> {
///         println!("{}", batch.join(","));
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait BatchProcessor<T>: Send + Sync {
    /// Process a batch. Returning `Err` marks every item of the batch failed.
    async fn process(&self, batch: &[T]) -> Result<(), ProcessorError>;
}

/// Adapter turning an async closure into a [`BatchProcessor`]
///
/// The closure receives an owned copy of the batch.
pub struct FnProcessor<F> {
    f: F,
}

impl<F> FnProcessor<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<T, F, Fut, E> BatchProcessor<T> for FnProcessor<F>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(Vec<T>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Into<ProcessorError>,
{
    async fn process(&self, batch: &[T]) -> Result<(), ProcessorError> {
        (self.f)(batch.to_vec()).await.map_err(Into::into)
    }
}
