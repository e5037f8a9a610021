//! Bidirectional synchronizer between a live stub mapping collection and a
//! remote object store.
//!
//! At startup, [`S3StubSource::load_mappings_into`] enumerates every `.json`
//! object under a key prefix, decodes each as a single stub or a `mappings`
//! collection, and reconciles the result into the host's live collection,
//! remembering which ids came from storage. From then on the source acts as a
//! [`StubLifecycleListener`]: every create, edit and remove on the live
//! collection is mirrored back to the store — except the create events that
//! merely re-announce stubs just loaded, which are suppressed so a restart
//! never rewrites the whole bucket.
//!
//! The store side is the [`RemoteObjectStore`] trait from `stubsource-store`;
//! the host side is the [`StubRegistry`] insertion boundary plus the listener
//! callbacks. Both are constructor-injected, so tests run against in-memory
//! doubles.
//!
//! [`RemoteObjectStore`]: stubsource_store::RemoteObjectStore

pub mod config;
pub mod decode;
pub mod enumerate;
pub mod error;
pub mod keys;
pub mod listener;
pub mod registry;
pub mod source;

pub use config::SourceConfig;
pub use decode::decode_object;
pub use enumerate::{fetch_all, FetchedObject};
pub use error::{SyncError, SyncResult};
pub use listener::StubLifecycleListener;
pub use registry::{InMemoryStubRegistry, RegistryError, StubRegistry};
pub use source::{LoadReport, S3StubSource};
