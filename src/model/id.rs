use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Backend-assigned row identifier.
///
/// The hosted tables may use integer or UUID primary keys, so the id is kept
/// as text and accepts either JSON representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Integer keys go back out as numbers so PostgREST compares them natively.
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => RecordId(n.to_string()),
            RawId::Text(s) => RecordId(s),
        })
    }
}

/// Primary key of a row in the `assets` table.
pub type AssetId = RecordId;

/// Primary key of a row in the `logs` table.
pub type LogId = RecordId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let from_int: RecordId = serde_json::from_str("42").unwrap();
        let from_uuid: RecordId =
            serde_json::from_str("\"6f1c2a7e-3b1d-4c8e-9e55-0d4f1c2b3a4d\"").unwrap();

        assert_eq!(from_int.as_str(), "42");
        assert_eq!(from_uuid.as_str(), "6f1c2a7e-3b1d-4c8e-9e55-0d4f1c2b3a4d");
        assert_eq!(serde_json::to_string(&from_int).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&from_uuid).unwrap(),
            "\"6f1c2a7e-3b1d-4c8e-9e55-0d4f1c2b3a4d\""
        );
    }

    #[test]
    fn test_zero_padded_ids_stay_text() {
        let id = RecordId::from("007");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"007\"");
    }
}
