//! Foundation types for stubsource.
//!
//! A *stub mapping* is a uniquely identified configuration record for an HTTP
//! mock server: a request matcher plus a response template, carried here as an
//! open JSON document. This crate models only the parts the synchronizer needs
//! to understand — identity, the optional human-readable name, and the open
//! metadata mapping — and round-trips everything else verbatim.
//!
//! # Key Types
//!
//! - [`StubId`] — UUID identity of a stub mapping, its sole identity key
//! - [`Metadata`] — open, order-preserving mapping of string keys to JSON values
//! - [`StubMapping`] — one stub record; unknown fields are preserved untouched
//! - [`StubMappingCollection`] — multiple records bundled under a `mappings` field

pub mod error;
pub mod id;
pub mod metadata;
pub mod stub;

pub use error::{TypeError, TypeResult};
pub use id::StubId;
pub use metadata::Metadata;
pub use stub::{StubMapping, StubMappingCollection};
