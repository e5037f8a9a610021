use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ListPage, ObjectEntry, RemoteObjectStore};

const DEFAULT_PAGE_SIZE: usize = 1000;

/// In-memory, `BTreeMap`-based object store.
///
/// Intended for tests and embedding. Keys within a bucket are held sorted, so
/// listings are deterministic. The list page size is configurable so tests can
/// force multi-page pagination, and `fail_writes` / `fail_reads` switch the
/// store into a failing mode for failure-policy tests.
pub struct InMemoryObjectStore {
    buckets: RwLock<BTreeMap<String, BTreeMap<String, Bytes>>>,
    page_size: usize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    puts: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryObjectStore {
    /// Create a new empty store with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a store whose list calls return at most `page_size` entries.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            buckets: RwLock::new(BTreeMap::new()),
            page_size: page_size.max(1),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            puts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Number of successful `put_object` calls so far. Seeding does not count.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of successful `delete_object` calls so far.
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Make every subsequent put/delete fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent list/get fail with a backend error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Seed an object synchronously (test setup helper).
    pub fn seed(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        let mut buckets = self.buckets.write().expect("lock poisoned");
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body.into());
    }

    /// Check whether an object exists (synchronous, for tests).
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        let buckets = self.buckets.read().expect("lock poisoned");
        buckets.get(bucket).is_some_and(|b| b.contains_key(key))
    }

    /// Get object data directly (synchronous, for tests).
    pub fn get_data(&self, bucket: &str, key: &str) -> Option<Bytes> {
        let buckets = self.buckets.read().expect("lock poisoned");
        buckets.get(bucket).and_then(|b| b.get(key)).cloned()
    }

    /// All keys in a bucket, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.read().expect("lock poisoned");
        buckets
            .get(bucket)
            .map(|b| b.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of objects in a bucket.
    pub fn len(&self, bucket: &str) -> usize {
        let buckets = self.buckets.read().expect("lock poisoned");
        buckets.get(bucket).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, bucket: &str) -> bool {
        self.len(bucket) == 0
    }

    /// Remove all buckets and objects.
    pub fn clear(&self) {
        self.buckets.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteObjectStore for InMemoryObjectStore {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> StoreResult<ListPage> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".into()));
        }
        // Continuation tokens are offsets into the sorted, filtered key list.
        let offset = match continuation {
            None => 0,
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| StoreError::InvalidContinuation(token.to_string()))?,
        };

        let buckets = self.buckets.read().expect("lock poisoned");
        let matching: Vec<&String> = buckets
            .get(bucket)
            .map(|b| b.keys().filter(|k| k.starts_with(prefix)).collect())
            .unwrap_or_default();

        let page: Vec<ObjectEntry> = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|k| ObjectEntry::new(k.as_str()))
            .collect();

        let consumed = offset + page.len();
        let next_continuation = if consumed < matching.len() {
            Some(consumed.to_string())
        } else {
            None
        };

        Ok(ListPage {
            entries: page,
            next_continuation,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".into()));
        }
        let buckets = self.buckets.read().expect("lock poisoned");
        buckets
            .get(bucket)
            .and_then(|b| b.get(key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        _content_type: &str,
        body: Bytes,
    ) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        let mut buckets = self.buckets.write().expect("lock poisoned");
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body);
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        let mut buckets = self.buckets.write().expect("lock poisoned");
        if let Some(b) = buckets.get_mut(bucket) {
            b.remove(key);
        }
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let buckets = self.buckets.read().expect("lock poisoned");
        f.debug_struct("InMemoryObjectStore")
            .field("buckets", &buckets.len())
            .field("page_size", &self.page_size)
            .finish()
    }
}
