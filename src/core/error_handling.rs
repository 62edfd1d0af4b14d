//! Generic error reporting utilities
//!
//! Lets the application report fatal errors uniformly while still showing
//! specific messages for errors the user can act on.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// True if the message tells the user what to fix (bad input, bad config)
    fn is_user_actionable(&self) -> bool;

    /// The message to show when the error is user-actionable
    fn user_message(&self) -> Option<String>;
}

/// Log a fatal error with a detail level matching its kind
///
/// User-actionable errors show their own message; system errors show the
/// operation context, with the full error at debug level.
///
/// # Examples
/// ```rust,no_run
/// # use moviebatch::core::error_handling::log_error_with_context;
/// # use moviebatch::catalog::BulkImportError;
/// let err = BulkImportError::Empty;
/// log_error_with_context(&err, "Bulk movie import");
/// // Logs: "FATAL: No movies were submitted"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {} failed", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
