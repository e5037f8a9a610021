//! Deterministic mapping between stub ids and storage keys.

use stubsource_types::StubId;

/// Only keys with this extension are loaded, and every written key gets it.
pub const JSON_EXTENSION: &str = ".json";

/// Storage key for a stub: `base_path + id + ".json"`.
///
/// Derived from the id alone, never from name or content, so a stub keeps one
/// stable key for its whole life and overwrites are idempotent.
pub fn key_for(base_path: &str, id: &StubId) -> String {
    format!("{base_path}{id}{JSON_EXTENSION}")
}

/// Derived grouping label for an object key: the sub-path under the base
/// path, without the file name. Cosmetic only — it never affects identity or
/// key derivation.
///
/// Removal is by substring, not anchored at the start of the key: a key that
/// happens to contain the bucket name (or the base path) mid-path loses that
/// segment too. Kept this way for compatibility with keys produced by earlier
/// deployments; prefer bucket and base path strings that cannot collide with
/// folder names.
pub fn folder_for(bucket: &str, base_path: &str, key: &str) -> String {
    let mut path = key.to_string();
    if !bucket.is_empty() {
        path = path.replace(bucket, "");
    }
    if !base_path.is_empty() {
        path = path.replace(base_path, "");
    }
    match path.rfind('/') {
        Some(i) => path[..i].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StubId {
        s.parse().unwrap()
    }

    #[test]
    fn key_is_base_path_id_json() {
        let id = id("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(
            key_for("env/", &id),
            "env/550e8400-e29b-41d4-a716-446655440000.json"
        );
        assert_eq!(
            key_for("", &id),
            "550e8400-e29b-41d4-a716-446655440000.json"
        );
    }

    #[test]
    fn key_derivation_is_pure() {
        let id = id("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(key_for("env/", &id), key_for("env/", &id));
    }

    #[test]
    fn folder_of_top_level_key_is_empty() {
        assert_eq!(folder_for("mock-store", "env/", "env/a1.json"), "");
    }

    #[test]
    fn folder_is_sub_path_without_file_name() {
        assert_eq!(
            folder_for("mock-store", "env/", "env/team-a/deep/a1.json"),
            "team-a/deep"
        );
    }

    #[test]
    fn empty_base_path_keeps_full_sub_path() {
        assert_eq!(folder_for("mock-store", "", "env/a1.json"), "env");
    }

    #[test]
    fn removal_is_by_substring_not_prefix() {
        // The bucket name occurring mid-key is removed as well. Documented
        // behavior, inherited from earlier deployments.
        assert_eq!(folder_for("env", "", "prod/env-x/a1.json"), "prod/-x");
    }
}
