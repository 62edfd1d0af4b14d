//! One-shot import run: read a movie file, queue it, wait for the queue

use crate::app::cli::config::Settings;
use crate::app::error::AppError;
use crate::catalog::{parse_movie_list, BulkImportService, MemoryMovieStore, MovieStore, NewMovie};
use crate::core::shutdown::{ShutdownCoordinator, INTERRUPTED_EXIT_CODE};
use crate::queue::QueueStatus;
use serde::Serialize;
use std::sync::Arc;

/// Exit code when at least one batch was rejected by the store
pub const PARTIAL_FAILURE_EXIT_CODE: i32 = 2;

/// Result of an import run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Movies accepted into the queue
    pub accepted: usize,
    /// Movies present in the store when the run ended, if it could be counted
    pub stored: Option<usize>,
    /// Movies still waiting when the run was interrupted
    pub discarded: usize,
    pub interrupted: bool,
    pub status: QueueStatus<NewMovie>,
}

impl ImportOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            INTERRUPTED_EXIT_CODE
        } else if self.status.stats.total_failed > 0 {
            PARTIAL_FAILURE_EXIT_CODE
        } else {
            0
        }
    }
}

pub async fn load_movies(settings: &Settings) -> Result<Vec<NewMovie>, AppError> {
    let path = &settings.file;
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::ReadInput {
            path: path.clone(),
            source,
        })?;
    parse_movie_list(&contents).map_err(|source| AppError::ParseInput {
        path: path.clone(),
        source,
    })
}

/// Import into a fresh in-memory store sized by the settings
pub async fn run_import(
    settings: &Settings,
    shutdown: &ShutdownCoordinator,
) -> Result<ImportOutcome, AppError> {
    let store = match settings.store_capacity {
        Some(capacity) => MemoryMovieStore::with_capacity(capacity),
        None => MemoryMovieStore::new(),
    };
    run_import_into(settings, Arc::new(store), shutdown).await
}

/// Import into `store`, stopping early once shutdown is requested
///
/// An interrupted run discards whatever is still queued; a batch already
/// being written completes in the background. Store failures never fail the
/// run: they are part of the queue stats.
pub async fn run_import_into(
    settings: &Settings,
    store: Arc<dyn MovieStore>,
    shutdown: &ShutdownCoordinator,
) -> Result<ImportOutcome, AppError> {
    let movies = load_movies(settings).await?;
    log::debug!(
        "Read {} movies from {}",
        movies.len(),
        settings.file.display()
    );

    let service = BulkImportService::new(store.clone(), settings.import)?;
    let accepted = service.bulk_create(movies, &settings.added_by)?;
    log::info!("{}", accepted.message());

    let mut shutdown_rx = shutdown.subscribe();
    if !shutdown.is_shutdown_requested() {
        tokio::select! {
            _ = service.queue().wait_until_idle() => {}
            _ = shutdown_rx.recv() => {}
        }
    }
    let interrupted = shutdown.is_shutdown_requested();

    let status = service.status();
    let discarded = if interrupted {
        let discarded = service.queue().clear();
        log::warn!("Import interrupted; {} queued movies discarded", discarded);
        discarded
    } else {
        0
    };

    let stored = match store.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            log::warn!("Could not count stored movies: {}", e);
            None
        }
    };

    Ok(ImportOutcome {
        accepted: accepted.accepted,
        stored,
        discarded,
        interrupted,
        status,
    })
}
