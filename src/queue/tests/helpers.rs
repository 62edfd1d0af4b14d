//! Shared test processors

use crate::queue::api::{BatchProcessor, BatchQueue, ProcessorError, QueueConfig};
use async_trait::async_trait;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Upper bound for any test waiting on a drain loop
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Processor that records every batch it sees and tracks overlapping calls
#[derive(Default)]
pub struct RecordingProcessor {
    batches: Mutex<Vec<Vec<String>>>,
    /// Batches containing this item are rejected
    fail_on: Option<String>,
    /// Simulated processing time per batch
    work: Duration,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl RecordingProcessor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_on(item: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_on: Some(item.to_string()),
            ..Self::default()
        })
    }

    pub fn slow(work: Duration) -> Arc<Self> {
        Arc::new(Self {
            work,
            ..Self::default()
        })
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches().iter().map(Vec::len).collect()
    }

    /// Every item seen by the processor, in processing order
    pub fn flattened(&self) -> Vec<String> {
        self.batches().into_iter().flatten().collect()
    }

    pub fn max_concurrent_calls(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BatchProcessor<String> for RecordingProcessor {
    async fn process(&self, batch: &[String]) -> Result<(), ProcessorError> {
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        self.batches.lock().unwrap().push(batch.to_vec());

        if !self.work.is_zero() {
            tokio::time::sleep(self.work).await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);

        match &self.fail_on {
            Some(poison) if batch.contains(poison) => {
                Err(format!("batch contains '{}'", poison).into())
            }
            _ => Ok(()),
        }
    }
}

/// Build a queue around a shared recording processor
pub fn queue_with(
    processor: &Arc<RecordingProcessor>,
    batch_size: usize,
    delay: Duration,
) -> BatchQueue<String> {
    BatchQueue::with_shared_processor(processor.clone(), QueueConfig::new(batch_size, delay))
        .unwrap()
}

pub fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item-{:03}", i)).collect()
}

/// Await a future, failing the test instead of hanging
pub async fn settle<F: Future>(future: F) -> F::Output {
    tokio::time::timeout(SETTLE_TIMEOUT, future)
        .await
        .expect("drain loop did not settle in time")
}
