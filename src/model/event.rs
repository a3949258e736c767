use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::{AssetId, LogId};
use crate::ingest::timestamp::parse_event_time;

/// Kind of a logged event. Only failures and repairs carry meaning for the
/// reliability statistics; anything else is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Failure,
    Repair,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Failure => "failure",
            EventType::Repair => "repair",
            EventType::Other(s) => s,
        }
    }
}

impl From<&str> for EventType {
    // Exact match only: "Failure" is not a failure event.
    fn from(s: &str) -> Self {
        match s {
            "failure" => EventType::Failure,
            "repair" => EventType::Repair,
            other => EventType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EventType::from(s.as_str()))
    }
}

/// An event timestamp that is either already parsed or still raw text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    Parsed(DateTime<Utc>),
    Raw(String),
}

impl EventTime {
    /// Resolve to a UTC timestamp, or `None` if the raw text is unparseable.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            EventTime::Parsed(ts) => Some(*ts),
            EventTime::Raw(raw) => parse_event_time(raw),
        }
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(ts: DateTime<Utc>) -> Self {
        EventTime::Parsed(ts)
    }
}

impl From<&str> for EventTime {
    fn from(raw: &str) -> Self {
        EventTime::Raw(raw.to_string())
    }
}

/// The projection of a log row consumed by the reliability calculator.
///
/// All three fields are required; deserialising a record without one of
/// them is an error rather than a silently skipped row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub asset_id: AssetId,
    pub event_type: EventType,
    pub event_time: EventTime,
}

impl EventRecord {
    pub fn new(
        asset_id: impl Into<AssetId>,
        event_type: EventType,
        event_time: impl Into<EventTime>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            event_type,
            event_time: event_time.into(),
        }
    }
}

/// A row of the `logs` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LogId>,
    pub asset_id: AssetId,
    pub event_type: EventType,
    pub event_time: EventTime,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub failure_mode: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub deleted: bool,
}

impl LogEntry {
    pub fn to_event_record(&self) -> EventRecord {
        EventRecord {
            asset_id: self.asset_id.clone(),
            event_type: self.event_type.clone(),
            event_time: self.event_time.clone(),
        }
    }
}

/// Insert payload for the `logs` table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewLogEntry {
    pub asset_id: AssetId,
    pub event_type: EventType,
    /// RFC 3339 timestamp.
    pub event_time: String,
    pub failure_mode: String,
    pub description: String,
    pub deleted: bool,
}

pub(crate) fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
