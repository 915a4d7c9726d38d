use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Correlation id carried by every request and echoed by the gateway.
///
/// The gateway is not consistent about the JSON type of `id`: some responses
/// carry `"123"`, others `123`. Both decode to the same string value, and the
/// id is always written back out as a JSON string. Ids of any other JSON
/// shape are kept as their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(value: impl Into<String>) -> Self {
        RequestId(value.into())
    }

    /// Generate a fresh, time-ordered id for a request the caller did not tag.
    pub fn generate() -> Self {
        RequestId(Uuid::now_v7().simple().to_string().to_uppercase())
    }

    /// Use the caller's id when given, otherwise generate one.
    pub fn or_generate(provided: Option<RequestId>) -> Self {
        provided.unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        RequestId::new(value)
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        RequestId(value)
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        RequestId(value.to_string())
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        RequestId(value.to_string())
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(value) => RequestId(value),
            // Numbers keep their decimal text; any other shape is kept as its
            // compact JSON rendering rather than failing the whole envelope.
            other => RequestId(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_numeric_and_string_ids_normalize_to_the_same_value() {
        let from_number: RequestId = serde_json::from_str("123").unwrap();
        let from_string: RequestId = serde_json::from_str("\"123\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "123");
    }

    #[test]
    fn test_negative_id() {
        let id: RequestId = serde_json::from_str("-7").unwrap();
        assert_eq!(id.as_str(), "-7");
    }

    #[test]
    fn test_always_serializes_as_string() {
        let id = RequestId::from(42u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");

        let id = RequestId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_other_id_shapes_keep_their_json_text() {
        let id: RequestId = serde_json::from_str("true").unwrap();
        assert_eq!(id.as_str(), "true");
        let id: RequestId = serde_json::from_str("{\"seq\": 1}").unwrap();
        assert_eq!(id.as_str(), "{\"seq\":1}");
        let id: RequestId = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(id.as_str(), "[1,2]");
    }

    #[test]
    fn test_float_id() {
        let id: RequestId = serde_json::from_str("1.5").unwrap();
        assert_eq!(id.as_str(), "1.5");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let id = RequestId::generate();
            assert_eq!(id.as_str().len(), 32);
            assert!(seen.insert(id), "duplicate generated id");
        }
    }

    #[test]
    fn test_or_generate_prefers_provided() {
        let provided = RequestId::from("caller-1");
        assert_eq!(RequestId::or_generate(Some(provided.clone())), provided);
        assert!(!RequestId::or_generate(None).as_str().is_empty());
    }

    #[test]
    fn test_display() {
        let id = RequestId::from("req-9");
        assert_eq!(format!("{}", id), "req-9");
    }
}
