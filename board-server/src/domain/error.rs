use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("invalid user id")]
    UnknownUser,

    #[error("invalid parent post id: {0}")]
    UnknownParent(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
