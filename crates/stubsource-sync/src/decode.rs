//! Turning raw object bodies into stub mappings.

use serde_json::Value;
use stubsource_types::{StubMapping, StubMappingCollection, TypeError};

use crate::error::{SyncError, SyncResult};

const FOLDER_KEY: &str = "folder";

/// Decode one stored object into its stub mappings.
///
/// A top-level JSON object carrying a `mappings` key is a collection and
/// yields its mappings in array order; anything else must be a single stub.
/// The distinction is made on the parsed document, so a stub whose response
/// body merely contains the text `"mappings"` is not misclassified.
///
/// Each yielded stub without a non-empty `folder` metadata entry is tagged
/// with the object's derived folder.
///
/// Malformed JSON or a stub missing its `id` is an error; the caller treats
/// it as fatal for the whole load.
pub fn decode_object(key: &str, folder: &str, body: &[u8]) -> SyncResult<Vec<StubMapping>> {
    let document: Value = serde_json::from_slice(body).map_err(|e| decode_err(key, e))?;
    let is_collection = document
        .as_object()
        .is_some_and(|o| o.contains_key("mappings"));

    let mut stubs = if is_collection {
        serde_json::from_value::<StubMappingCollection>(document)
            .map_err(|e| decode_err(key, e))?
            .mappings
    } else {
        vec![serde_json::from_value::<StubMapping>(document).map_err(|e| decode_err(key, e))?]
    };

    for stub in &mut stubs {
        tag_folder(stub, folder);
    }
    Ok(stubs)
}

fn decode_err(key: &str, source: serde_json::Error) -> SyncError {
    SyncError::Decode {
        key: key.to_string(),
        source: TypeError::Json(source),
    }
}

/// Set `metadata.folder` unless the stub already carries a non-empty one.
fn tag_folder(stub: &mut StubMapping, folder: &str) {
    let existing = stub
        .metadata
        .as_ref()
        .and_then(|m| m.get_str(FOLDER_KEY))
        .unwrap_or("");
    if !existing.is_empty() {
        return;
    }
    stub.ensure_metadata().insert(FOLDER_KEY, folder);
}
