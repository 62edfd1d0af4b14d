//! Movie persistence seam
//!
//! The queue only ever needs a batch insert. [`MemoryMovieStore`] keeps
//! movies in process memory and follows unordered bulk-insert semantics:
//! every valid document is written even when others in the same call are
//! rejected, and the call still reports failure if any document was.

use crate::catalog::error::StoreError;
use crate::catalog::movie::{Movie, NewMovie};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Insert a batch of movies, returning the stored records
    async fn insert_many(&self, movies: &[NewMovie]) -> Result<Vec<Movie>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    /// All stored movies in insertion order
    async fn list(&self) -> Result<Vec<Movie>, StoreError>;
}

/// In-process movie store
///
/// An optional capacity caps the number of stored movies; documents beyond
/// it are rejected like any other invalid document.
#[derive(Debug)]
pub struct MemoryMovieStore {
    movies: RwLock<Vec<Movie>>,
    next_id: AtomicU64,
    online: AtomicBool,
    capacity: Option<usize>,
}

impl Default for MemoryMovieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self {
            movies: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            online: AtomicBool::new(true),
            capacity: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    /// Simulate losing or regaining the backing database
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Release);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::Unavailable {
                message: "store is offline".to_string(),
            })
        }
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn insert_many(&self, movies: &[NewMovie]) -> Result<Vec<Movie>, StoreError> {
        self.ensure_online()?;

        let now = Utc::now();
        let mut inserted = Vec::with_capacity(movies.len());
        let mut first_error = None;
        let mut failed = 0;

        let mut stored = self.movies.write().unwrap_or_else(PoisonError::into_inner);
        for (index, movie) in movies.iter().enumerate() {
            let result = match self.capacity {
                Some(capacity) if stored.len() >= capacity => {
                    Err(format!("catalog is full ({} movies)", capacity))
                }
                _ => movie.to_movie(0, now).map_err(|e| e.to_string()),
            };
            match result {
                Ok(mut movie) => {
                    movie.id = self.next_id.fetch_add(1, Ordering::SeqCst);
                    stored.push(movie.clone());
                    inserted.push(movie);
                }
                Err(e) => {
                    failed += 1;
                    first_error.get_or_insert_with(|| format!("document {}: {}", index, e));
                }
            }
        }
        drop(stored);

        log::debug!(
            "Inserted {} of {} movies ({} rejected)",
            inserted.len(),
            movies.len(),
            failed
        );

        match first_error {
            None => Ok(inserted),
            Some(first_error) => Err(StoreError::BulkWrite {
                inserted: inserted.len(),
                failed,
                first_error,
            }),
        }
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.ensure_online()?;
        Ok(self
            .movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len())
    }

    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
