use thiserror::Error;

/// Top-level error type for the cookbook session and its chat backends.
#[derive(Debug, Error)]
pub enum CookbookError {
    #[error("a recipe request is already in flight")]
    RequestInFlight,

    #[error("no pending recipe query to send")]
    EmptyQuery,

    #[error("no recipe request in flight")]
    NotRequesting,

    #[error("chat backend error ({backend}): {message}")]
    Backend { backend: String, message: String },

    #[error("response stream error: {0}")]
    Stream(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
