use thiserror::Error;

/// Errors from remote object store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// The target bucket does not exist or is not reachable.
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    /// Invalid continuation token passed to a list call.
    #[error("invalid continuation token: {0:?}")]
    InvalidContinuation(String),

    /// Any other failure from the storage backend.
    #[error("store backend error: {0}")]
    Backend(String),

    /// I/O error from the underlying transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
