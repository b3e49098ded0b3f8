use crate::error::BackendError;

/// Result type returned by every backend collaborator
pub type BackendResult<T> = Result<T, BackendError>;
