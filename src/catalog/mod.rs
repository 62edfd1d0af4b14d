//! Movie catalog bulk import
//!
//! The collaborators around the batch queue: the movie record and its
//! schema rules, the store the queue writes into, the processor bridging the
//! two, and the service that validates and queues submissions.

mod error;
mod inserter;
mod movie;
mod service;
mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{BulkImportError, InvalidMovie, MovieValidationError, StoreError};
pub use inserter::MovieBatchInserter;
pub use movie::{
    parse_movie_list, Movie, NewMovie, MAX_DESCRIPTION_CHARS, MAX_DURATION_MINUTES,
    MAX_RATING, MAX_TITLE_CHARS, MIN_DURATION_MINUTES, MIN_RATING,
};
pub use service::{
    BulkAccepted, BulkImportService, ImportSettings, DEFAULT_MAX_BULK_ITEMS, MOVIE_BATCH_DELAY,
    MOVIE_BATCH_SIZE,
};
pub use store::{MemoryMovieStore, MovieStore};
