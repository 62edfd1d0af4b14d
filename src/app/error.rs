//! Application Error Types

use crate::app::cli::config::ConfigError;
use crate::catalog::BulkImportError;
use crate::core::error_handling::ContextualError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Error reading movie file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Movie file {} is not a valid movie list: {source}", .path.display())]
    ParseInput {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Import(#[from] BulkImportError),

    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Config(e) => e.is_user_actionable(),
            AppError::Import(e) => e.is_user_actionable(),
            AppError::ReadInput { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            AppError::ParseInput { .. } | AppError::Logging { .. } => true,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Import(e) => e.user_message(),
            _ if self.is_user_actionable() => Some(self.to_string()),
            _ => None,
        }
    }
}
