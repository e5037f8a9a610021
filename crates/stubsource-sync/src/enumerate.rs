//! Startup enumeration: every `.json` object under the prefix, with content.

use std::sync::Arc;

use bytes::Bytes;
use stubsource_store::RemoteObjectStore;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::SyncResult;
use crate::keys::{folder_for, JSON_EXTENSION};

/// Cap on concurrent `get_object` calls during the fetch phase. Unbounded
/// fan-out would trip store rate limits on large buckets.
const MAX_CONCURRENT_FETCHES: usize = 16;

/// One object pulled from the store: its key, derived folder and raw body.
#[derive(Clone, Debug)]
pub struct FetchedObject {
    pub key: String,
    pub folder: String,
    pub body: Bytes,
}

/// Enumerate and fetch every `.json` object under `base_path`.
///
/// Listing follows continuation tokens until the store reports no more pages;
/// the key set is frozen once listing completes, then bodies are fetched with
/// bounded concurrency. The result is sorted by key so downstream processing
/// is deterministic. Any list or get failure fails the whole call — this runs
/// ahead of serving traffic and a partial load would be worse than none.
pub async fn fetch_all(
    store: &Arc<dyn RemoteObjectStore>,
    bucket: &str,
    base_path: &str,
) -> SyncResult<Vec<FetchedObject>> {
    let mut keys = Vec::new();
    let mut continuation: Option<String> = None;
    loop {
        let page = store
            .list_objects(bucket, base_path, continuation.as_deref())
            .await?;
        keys.extend(page.entries.into_iter().map(|e| e.key));
        match page.next_continuation {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }
    keys.retain(|k| k.ends_with(JSON_EXTENSION));
    tracing::info!(bucket, count = keys.len(), "objects to load from store");

    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));
    let mut tasks: JoinSet<SyncResult<FetchedObject>> = JoinSet::new();
    for key in keys {
        let store = Arc::clone(store);
        let semaphore = Arc::clone(&semaphore);
        let bucket = bucket.to_string();
        let folder = folder_for(&bucket, base_path, &key);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore never closed");
            let body = store.get_object(&bucket, &key).await?;
            Ok(FetchedObject { key, folder, body })
        });
    }

    let mut objects = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        objects.push(joined??);
    }
    objects.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use stubsource_store::InMemoryObjectStore;

    fn store_with(objects: &[(&str, &str)]) -> Arc<InMemoryObjectStore> {
        let store = InMemoryObjectStore::with_page_size(2);
        for (key, body) in objects {
            store.seed("mock-store", key, body.to_string());
        }
        Arc::new(store)
    }

    fn as_dyn(store: &Arc<InMemoryObjectStore>) -> Arc<dyn RemoteObjectStore> {
        Arc::clone(store) as Arc<dyn RemoteObjectStore>
    }

    #[tokio::test]
    async fn fetches_across_multiple_pages() {
        let store = store_with(&[
            ("env/a.json", "1"),
            ("env/b.json", "2"),
            ("env/c.json", "3"),
            ("env/d.json", "4"),
            ("env/e.json", "5"),
        ]);
        let objects = fetch_all(&as_dyn(&store), "mock-store", "env/")
            .await
            .unwrap();
        let keys: Vec<&str> = objects.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "env/a.json",
                "env/b.json",
                "env/c.json",
                "env/d.json",
                "env/e.json"
            ]
        );
        assert_eq!(&objects[4].body[..], b"5");
    }

    #[tokio::test]
    async fn non_json_keys_are_skipped() {
        let store = store_with(&[
            ("env/a.json", "1"),
            ("env/readme.txt", "ignore"),
            ("env/data.yaml", "ignore"),
        ]);
        let objects = fetch_all(&as_dyn(&store), "mock-store", "env/")
            .await
            .unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].key, "env/a.json");
    }

    #[tokio::test]
    async fn folder_is_attached_per_object() {
        let store = store_with(&[("env/team-a/a.json", "1"), ("env/b.json", "2")]);
        let objects = fetch_all(&as_dyn(&store), "mock-store", "env/")
            .await
            .unwrap();
        assert_eq!(objects[0].folder, "team-a");
        assert_eq!(objects[1].folder, "");
    }

    #[tokio::test]
    async fn empty_prefix_loads_whole_bucket() {
        let store = store_with(&[("a.json", "1"), ("deep/b.json", "2")]);
        let objects = fetch_all(&as_dyn(&store), "mock-store", "").await.unwrap();
        assert_eq!(objects.len(), 2);
    }

    #[tokio::test]
    async fn list_failure_is_fatal() {
        let store = store_with(&[("env/a.json", "1")]);
        store.fail_reads(true);
        let err = fetch_all(&as_dyn(&store), "mock-store", "env/")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Store(_)));
    }

    #[tokio::test]
    async fn large_bucket_is_fully_fetched() {
        // More keys than the concurrency cap and many pages.
        let store = InMemoryObjectStore::with_page_size(7);
        for i in 0..100 {
            store.seed("mock-store", &format!("env/{i:03}.json"), "{}");
        }
        let store = Arc::new(store);
        let objects = fetch_all(&as_dyn(&store), "mock-store", "env/")
            .await
            .unwrap();
        assert_eq!(objects.len(), 100);
        // Sorted, no duplicates, no omissions.
        for (i, obj) in objects.iter().enumerate() {
            assert_eq!(obj.key, format!("env/{i:03}.json"));
        }
    }
}
