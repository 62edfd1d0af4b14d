//! Catalog Error Types

use crate::core::error_handling::ContextualError;
use crate::queue::QueueError;

/// Every schema rule a movie record violates
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .messages.join("; "))]
pub struct MovieValidationError {
    pub messages: Vec<String>,
}

/// A rejected movie within a bulk submission
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidMovie {
    /// Zero-based position in the submission
    pub index: usize,
    pub title: String,
    pub messages: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unordered bulk insert finished with some documents rejected
    #[error("Bulk write failed for {failed} of {} documents: {first_error}", .inserted + .failed)]
    BulkWrite {
        inserted: usize,
        failed: usize,
        first_error: String,
    },

    #[error("Movie store unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum BulkImportError {
    #[error("No movies were submitted")]
    Empty,

    #[error("Too many movies in one submission ({count}, maximum {max})")]
    TooMany { count: usize, max: usize },

    #[error("A submitting user is required")]
    MissingSubmitter,

    #[error("{} of {total} movies failed validation", .invalid.len())]
    Invalid {
        total: usize,
        invalid: Vec<InvalidMovie>,
    },

    #[error("Import queue error: {0}")]
    Queue(#[from] QueueError),
}

impl BulkImportError {
    /// One line per rejected movie, for display
    pub fn details(&self) -> Vec<String> {
        match self {
            BulkImportError::Invalid { invalid, .. } => invalid
                .iter()
                .map(|movie| {
                    format!(
                        "movie #{} ({:?}): {}",
                        movie.index + 1,
                        movie.title,
                        movie.messages.join("; ")
                    )
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl ContextualError for BulkImportError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, BulkImportError::Queue(_))
    }

    fn user_message(&self) -> Option<String> {
        if !self.is_user_actionable() {
            return None;
        }
        let mut message = self.to_string();
        for line in self.details() {
            message.push_str("\n  ");
            message.push_str(&line);
        }
        Some(message)
    }
}
