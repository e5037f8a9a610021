//! Remote object store boundary for stubsource.
//!
//! The synchronizer talks to a bucket-and-key object store (S3 or compatible)
//! through the [`RemoteObjectStore`] trait: paginated list-by-prefix, full
//! object get, put, and delete. Credential and region resolution, retries and
//! timeouts all belong to the implementation behind the trait, not to the
//! callers.
//!
//! # Backends
//!
//! - [`InMemoryObjectStore`] — `BTreeMap`-based store for tests and embedding,
//!   with a configurable list page size and failure injection.
//!
//! A production backend wraps an AWS SDK client; it lives with the host
//! process, not here.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use traits::{ListPage, ObjectEntry, RemoteObjectStore};
