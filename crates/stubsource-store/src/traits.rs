use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreResult;

/// One entry returned by a list call. Only the key matters to callers;
/// size and timestamps are backend details they must not depend on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectEntry {
    pub key: String,
}

impl ObjectEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// One page of a paginated list call.
///
/// `next_continuation` is `Some` when more pages follow; callers must keep
/// calling until it is `None` and must never assume a single page.
#[derive(Clone, Debug, Default)]
pub struct ListPage {
    pub entries: Vec<ObjectEntry>,
    pub next_continuation: Option<String>,
}

/// Bucket-and-key object store, S3-shaped.
///
/// All implementations must satisfy:
/// - `put_object` is an idempotent overwrite: the same key and body may be
///   written any number of times.
/// - `delete_object` of a missing key is not an error.
/// - `get_object` of a missing key is `StoreError::NotFound`.
/// - All I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait RemoteObjectStore: Send + Sync {
    /// List keys under `prefix`, one page at a time.
    ///
    /// Pass `None` for the first page and the previous page's
    /// `next_continuation` for each following one.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> StoreResult<ListPage>;

    /// Fetch the full content of one object.
    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes>;

    /// Write (or overwrite) one object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> StoreResult<()>;

    /// Delete one object. Deleting a missing key succeeds.
    async fn delete_object(&self, bucket: &str, key: &str) -> StoreResult<()>;
}
