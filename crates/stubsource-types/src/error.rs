use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid stub id {value:?}: {reason}")]
    InvalidId { value: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type TypeResult<T> = Result<T, TypeError>;
