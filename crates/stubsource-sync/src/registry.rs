//! The host-side insertion boundary for the live stub collection.

use std::collections::HashMap;
use std::sync::RwLock;

use stubsource_types::{StubId, StubMapping};
use thiserror::Error;

/// Rejection from the live collection on insertion.
///
/// Only `DuplicateId` is recoverable during a load; every other rejection is
/// a real validation failure the loader must surface.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate stub id {id}: {detail}")]
    DuplicateId { id: StubId, detail: String },

    #[error("invalid stub: {0}")]
    Invalid(String),
}

/// Insertion boundary of the host's live stub collection.
///
/// The host delivers lifecycle events post-commit through
/// [`StubLifecycleListener`](crate::listener::StubLifecycleListener); this
/// trait is the one call the loader needs in the other direction.
pub trait StubRegistry: Send + Sync {
    fn add_stub(&self, stub: StubMapping) -> Result<(), RegistryError>;
}

/// In-memory, `HashMap`-based stub registry.
///
/// Intended for tests and embedding. Rejects duplicate ids the way a real
/// mock engine does.
pub struct InMemoryStubRegistry {
    stubs: RwLock<HashMap<StubId, StubMapping>>,
}

impl InMemoryStubRegistry {
    pub fn new() -> Self {
        Self {
            stubs: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.stubs.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.read().expect("lock poisoned").is_empty()
    }

    pub fn contains(&self, id: &StubId) -> bool {
        self.stubs.read().expect("lock poisoned").contains_key(id)
    }

    pub fn get(&self, id: &StubId) -> Option<StubMapping> {
        self.stubs.read().expect("lock poisoned").get(id).cloned()
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<StubId> {
        let map = self.stubs.read().expect("lock poisoned");
        let mut ids: Vec<StubId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryStubRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StubRegistry for InMemoryStubRegistry {
    fn add_stub(&self, stub: StubMapping) -> Result<(), RegistryError> {
        let mut map = self.stubs.write().expect("lock poisoned");
        if map.contains_key(&stub.id) {
            return Err(RegistryError::DuplicateId {
                id: stub.id,
                detail: format!("stub with id {} is already registered", stub.id),
            });
        }
        map.insert(stub.id, stub);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryStubRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStubRegistry")
            .field("stub_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(id: &str) -> StubMapping {
        let mut s = StubMapping::new();
        s.id = id.parse().unwrap();
        s
    }

    #[test]
    fn add_and_get() {
        let registry = InMemoryStubRegistry::new();
        let s = stub("00000000-0000-0000-0000-000000000001");
        registry.add_stub(s.clone()).unwrap();
        assert_eq!(registry.get(&s.id), Some(s));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_id_is_rejected_and_keeps_first() {
        let registry = InMemoryStubRegistry::new();
        let mut first = stub("00000000-0000-0000-0000-000000000001");
        first.name = Some("first".into());
        let mut second = stub("00000000-0000-0000-0000-000000000001");
        second.name = Some("second".into());

        registry.add_stub(first).unwrap();
        let err = registry.add_stub(second).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { .. }));
        assert_eq!(
            registry
                .get(&"00000000-0000-0000-0000-000000000001".parse().unwrap())
                .unwrap()
                .name
                .as_deref(),
            Some("first")
        );
    }

    #[test]
    fn ids_are_sorted() {
        let registry = InMemoryStubRegistry::new();
        registry
            .add_stub(stub("00000000-0000-0000-0000-000000000003"))
            .unwrap();
        registry
            .add_stub(stub("00000000-0000-0000-0000-000000000001"))
            .unwrap();
        registry
            .add_stub(stub("00000000-0000-0000-0000-000000000002"))
            .unwrap();
        let ids = registry.ids();
        for w in ids.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }
}
