use stubsource_types::{StubId, TypeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] stubsource_store::StoreError),

    #[error("failed to decode object {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: TypeError,
    },

    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("live collection rejected stub {id}: {detail}")]
    Registry { id: StubId, detail: String },

    #[error("mappings already loaded from store")]
    AlreadyLoaded,

    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type SyncResult<T> = Result<T, SyncError>;
