//! Batch processor that writes queued movies to a store

use crate::catalog::movie::NewMovie;
use crate::catalog::store::MovieStore;
use crate::queue::{BatchProcessor, ProcessorError};
use async_trait::async_trait;
use std::sync::Arc;

/// Inserts each queued batch with a single `insert_many` call
pub struct MovieBatchInserter {
    store: Arc<dyn MovieStore>,
}

impl MovieBatchInserter {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchProcessor<NewMovie> for MovieBatchInserter {
    async fn process(&self, batch: &[NewMovie]) -> Result<(), ProcessorError> {
        let inserted = self.store.insert_many(batch).await?;
        log::info!("Inserted {} movies", inserted.len());
        Ok(())
    }
}
