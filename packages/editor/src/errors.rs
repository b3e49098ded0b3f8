//! Error types for the editor

use pagecraft_common::BackendError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Invalid edit script: {0}")]
    Script(#[from] serde_json::Error),
}
