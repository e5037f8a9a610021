use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open metadata mapping attached to a stub.
///
/// Deliberately not a fixed struct: keys written by other tools must round-trip
/// untouched, so this is a thin wrapper over an order-preserving JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    /// Create an empty metadata mapping.
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value at `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_str_only_matches_strings() {
        let mut md = Metadata::new();
        md.insert("folder", "env/prod");
        md.insert("count", 3);
        assert_eq!(md.get_str("folder"), Some("env/prod"));
        assert_eq!(md.get_str("count"), None);
        assert_eq!(md.get("count"), Some(&json!(3)));
    }

    #[test]
    fn unknown_entries_round_trip_in_order(){
        let raw = r#"{"zebra":1,"alpha":{"nested":true},"folder":"x"}"#;
        let md: Metadata = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&md).unwrap(), raw);
    }

    #[test]
    fn insert_replaces_and_returns_old() {
        let mut md = Metadata::new();
        assert_eq!(md.insert("folder", "a"), None);
        assert_eq!(md.insert("folder", "b"), Some(json!("a")));
        assert_eq!(md.get_str("folder"), Some("b"));
    }
}
