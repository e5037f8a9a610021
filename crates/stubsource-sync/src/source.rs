//! The stub source: startup load plus the lifecycle mirror.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use bytes::Bytes;
use stubsource_store::RemoteObjectStore;
use stubsource_types::{StubId, StubMapping};

use crate::config::SourceConfig;
use crate::decode::decode_object;
use crate::enumerate::fetch_all;
use crate::error::{SyncError, SyncResult};
use crate::keys::key_for;
use crate::listener::StubLifecycleListener;
use crate::registry::{RegistryError, StubRegistry};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Outcome of a startup load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Stubs accepted into the live collection.
    pub accepted: usize,
    /// Stubs dropped because their id was already taken.
    pub duplicates: usize,
}

/// Synchronizes stub mappings between an object-store prefix and the host's
/// live collection.
///
/// One instance per bucket/prefix, with the store client injected so tests
/// can run against an in-memory double. [`load_mappings_into`] runs once at
/// startup; afterwards the instance is registered with the host as a
/// [`StubLifecycleListener`] and mirrors every mutation back to the store.
///
/// The set of initially loaded ids is built in full and then published
/// through a [`OnceLock`], so once `load_mappings_into` has returned, every
/// event handler on any task sees the complete set. Events delivered before
/// the load finishes (the host is expected not to do this) are persisted as
/// genuine and logged.
///
/// [`load_mappings_into`]: S3StubSource::load_mappings_into
pub struct S3StubSource {
    store: Arc<dyn RemoteObjectStore>,
    bucket: String,
    base_path: String,
    initially_loaded: OnceLock<Arc<HashSet<StubId>>>,
}

impl S3StubSource {
    pub fn new(store: Arc<dyn RemoteObjectStore>, config: &SourceConfig) -> Self {
        Self {
            store,
            bucket: config.bucket.clone(),
            base_path: config.base_path.clone(),
            initially_loaded: OnceLock::new(),
        }
    }

    /// Identifier under which the host registers this extension.
    pub fn name(&self) -> &'static str {
        "stubsource-s3"
    }

    /// Enumerate, decode and reconcile every stored stub into `registry`.
    ///
    /// Objects are processed in key order and collection members in array
    /// order, so repeated loads of the same bucket behave identically. A stub
    /// whose id is already taken is dropped with a warning; any other
    /// rejection, a store failure or a decode failure aborts the load.
    ///
    /// May be called once; a second call returns [`SyncError::AlreadyLoaded`].
    pub async fn load_mappings_into(&self, registry: &dyn StubRegistry) -> SyncResult<LoadReport> {
        if self.initially_loaded.get().is_some() {
            return Err(SyncError::AlreadyLoaded);
        }

        let objects = fetch_all(&self.store, &self.bucket, &self.base_path).await?;
        let mut stubs = Vec::new();
        for object in &objects {
            stubs.extend(decode_object(&object.key, &object.folder, &object.body)?);
        }

        let mut loaded = HashSet::with_capacity(stubs.len());
        let mut report = LoadReport::default();
        for stub in stubs {
            let id = stub.id;
            match registry.add_stub(stub) {
                Ok(()) => {
                    loaded.insert(id);
                    report.accepted += 1;
                }
                Err(RegistryError::DuplicateId { id, detail }) => {
                    // The earlier occurrence already owns the id; keep going.
                    tracing::warn!(%id, detail, "dropping stub with duplicate id");
                    report.duplicates += 1;
                }
                Err(RegistryError::Invalid(detail)) => {
                    return Err(SyncError::Registry { id, detail });
                }
            }
        }

        tracing::info!(
            accepted = report.accepted,
            duplicates = report.duplicates,
            "loaded stub mappings from store"
        );
        if self.initially_loaded.set(Arc::new(loaded)).is_err() {
            return Err(SyncError::AlreadyLoaded);
        }
        Ok(report)
    }

    /// Ids that were present in the store when the startup load completed.
    pub fn initially_loaded(&self) -> Option<&HashSet<StubId>> {
        self.initially_loaded.get().map(Arc::as_ref)
    }

    fn was_initially_loaded(&self, id: &StubId) -> bool {
        self.initially_loaded
            .get()
            .is_some_and(|set| set.contains(id))
    }

    async fn save_stub(&self, stub: &StubMapping) -> SyncResult<()> {
        let key = key_for(&self.base_path, &stub.id);
        let body = stub.to_json_vec()?;
        self.store
            .put_object(&self.bucket, &key, CONTENT_TYPE_JSON, Bytes::from(body))
            .await?;
        Ok(())
    }

    async fn delete_stub(&self, stub: &StubMapping) -> SyncResult<()> {
        let key = key_for(&self.base_path, &stub.id);
        self.store.delete_object(&self.bucket, &key).await?;
        Ok(())
    }
}

#[async_trait]
impl StubLifecycleListener for S3StubSource {
    async fn after_stub_created(&self, stub: &StubMapping) {
        if self.was_initially_loaded(&stub.id) {
            // Echo of the startup load re-announcing a stored stub.
            return;
        }
        if self.initially_loaded.get().is_none() {
            tracing::warn!(id = %stub.id, "created event before load completed, persisting as new");
        }
        if let Err(error) = self.save_stub(stub).await {
            tracing::error!(id = %stub.id, %error, "failed to persist created stub");
        }
    }

    async fn after_stub_edited(&self, _old_stub: &StubMapping, new_stub: &StubMapping) {
        // An edit is always intentional; initial-load membership is irrelevant.
        if let Err(error) = self.save_stub(new_stub).await {
            tracing::error!(id = %new_stub.id, %error, "failed to persist edited stub");
        }
    }

    async fn after_stub_removed(&self, stub: &StubMapping) {
        if let Err(error) = self.delete_stub(stub).await {
            tracing::error!(id = %stub.id, %error, "failed to delete removed stub");
        }
    }
}

impl std::fmt::Debug for S3StubSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3StubSource")
            .field("bucket", &self.bucket)
            .field("base_path", &self.base_path)
            .field("loaded", &self.initially_loaded.get().is_some())
            .finish()
    }
}
