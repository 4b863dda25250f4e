//! Domain-level error taxonomy.
//!
//! Every fallible action in the workspace resolves to one of these variants
//! at its boundary. Errors are per-action: they are surfaced to the caller
//! and never mutate workflow state, so the user can retry or go back.

/// Domain error shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed local input (bad repository URL, unknown platform toggle,
    /// invalid workflow transition). No network call was attempted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The current identity lacks the capability for this action.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// An external read API returned a non-success status, or the request
    /// never completed.
    #[error("Upstream error: {message}")]
    Upstream {
        /// HTTP status code reported by the upstream API; `None` for
        /// transport-level failures.
        status: Option<u16>,
        /// Response body or status text for diagnostics.
        message: String,
    },

    /// The backend write call failed. The triggering action is retryable.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Convenience alias used throughout the workspace.
pub type CoreResult<T> = Result<T, CoreError>;
