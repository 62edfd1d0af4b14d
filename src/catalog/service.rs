//! Bulk movie import
//!
//! Validates a submission up front, stamps the submitter, hands the movies to
//! the batch queue and answers immediately with a status snapshot. Insertion
//! happens in the background; callers poll [`BulkImportService::status`].

use crate::catalog::error::{BulkImportError, InvalidMovie};
use crate::catalog::inserter::MovieBatchInserter;
use crate::catalog::movie::NewMovie;
use crate::catalog::store::MovieStore;
use crate::queue::{BatchQueue, QueueConfig, QueueStatus};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Movies written per `insert_many` call
pub const MOVIE_BATCH_SIZE: usize = 10;

/// Pause between movie batches
pub const MOVIE_BATCH_DELAY: Duration = Duration::from_millis(50);

/// Largest accepted submission
pub const DEFAULT_MAX_BULK_ITEMS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSettings {
    pub queue: QueueConfig,
    pub max_items: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            queue: QueueConfig::new(MOVIE_BATCH_SIZE, MOVIE_BATCH_DELAY),
            max_items: DEFAULT_MAX_BULK_ITEMS,
        }
    }
}

/// Answer to an accepted submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAccepted {
    /// Number of movies queued by this submission
    pub accepted: usize,
    /// Queue snapshot taken right after enqueueing
    pub status: QueueStatus<NewMovie>,
}

impl BulkAccepted {
    pub fn message(&self) -> String {
        format!(
            "{} movies queued for insertion ({} waiting)",
            self.accepted, self.status.queue_length
        )
    }
}

/// Owns the import queue and the store it drains into
pub struct BulkImportService {
    queue: BatchQueue<NewMovie>,
    store: Arc<dyn MovieStore>,
    max_items: usize,
}

impl BulkImportService {
    /// Must be called from within a Tokio runtime
    pub fn new(store: Arc<dyn MovieStore>, settings: ImportSettings) -> Result<Self, BulkImportError> {
        let queue = BatchQueue::new(MovieBatchInserter::new(store.clone()), settings.queue)?;
        Ok(Self {
            queue,
            store,
            max_items: settings.max_items,
        })
    }

    /// Validate and queue a submission on behalf of `added_by`
    ///
    /// Nothing is queued unless every movie is valid.
    pub fn bulk_create(
        &self,
        movies: Vec<NewMovie>,
        added_by: &str,
    ) -> Result<BulkAccepted, BulkImportError> {
        if movies.is_empty() {
            return Err(BulkImportError::Empty);
        }
        if movies.len() > self.max_items {
            return Err(BulkImportError::TooMany {
                count: movies.len(),
                max: self.max_items,
            });
        }
        let added_by = added_by.trim();
        if added_by.is_empty() {
            return Err(BulkImportError::MissingSubmitter);
        }

        let invalid: Vec<InvalidMovie> = movies
            .iter()
            .enumerate()
            .filter_map(|(index, movie)| {
                movie.validate().err().map(|e| InvalidMovie {
                    index,
                    title: movie.title.trim().to_string(),
                    messages: e.messages,
                })
            })
            .collect();
        if !invalid.is_empty() {
            return Err(BulkImportError::Invalid {
                total: movies.len(),
                invalid,
            });
        }

        let accepted = self.queue.enqueue(movies.into_iter().map(|movie| {
            let mut movie = movie.normalized();
            movie.added_by = Some(added_by.to_string());
            movie
        }));
        log::info!("Queued {} movies submitted by {}", accepted, added_by);

        Ok(BulkAccepted {
            accepted,
            status: self.queue.status(),
        })
    }

    pub fn status(&self) -> QueueStatus<NewMovie> {
        self.queue.status()
    }

    pub fn queue(&self) -> &BatchQueue<NewMovie> {
        &self.queue
    }

    pub fn store(&self) -> &Arc<dyn MovieStore> {
        &self.store
    }
}
