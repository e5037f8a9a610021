use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TypeResult;
use crate::id::StubId;
use crate::metadata::Metadata;

/// One stub mapping record.
///
/// Only `id`, `name` and `metadata` are understood here. The matching rules,
/// response template and anything else a mock engine cares about live in the
/// flattened remainder and round-trip verbatim, in document order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StubMapping {
    pub id: StubId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Opaque body: request matcher, response, priority, anything.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StubMapping {
    /// A minimal stub with a fresh id and nothing else.
    pub fn new() -> Self {
        Self {
            id: StubId::new(),
            name: None,
            metadata: None,
            extra: Map::new(),
        }
    }

    /// Parse a single stub from raw JSON bytes.
    ///
    /// A document without an `id` field is an error: the id is the identity
    /// key and nothing here may invent one.
    pub fn from_slice(bytes: &[u8]) -> TypeResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Canonical JSON serialization, the form the mirror writes back.
    pub fn to_json_vec(&self) -> TypeResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// The metadata mapping, created empty on first access.
    pub fn ensure_metadata(&mut self) -> &mut Metadata {
        self.metadata.get_or_insert_with(Metadata::new)
    }
}

impl Default for StubMapping {
    fn default() -> Self {
        Self::new()
    }
}

/// Multiple stub mappings bundled in one document under a `mappings` field.
///
/// Collection-form documents are read-only inputs: the loader expands them,
/// the mirror only ever writes single-stub documents.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StubMappingCollection {
    pub mappings: Vec<StubMapping>,
}

impl StubMappingCollection {
    pub fn from_slice(bytes: &[u8]) -> TypeResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
