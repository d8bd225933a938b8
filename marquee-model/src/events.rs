use std::fmt;

#[cfg(feature = "serde")]
use crate::lenient::or_default;

/// Event names pushed by the backend over the realtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelayEventKind {
    MonitorUpdate,
    SyncComplete,
    Other(String),
}

impl RelayEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            RelayEventKind::MonitorUpdate => "monitorUpdate",
            RelayEventKind::SyncComplete => "syncComplete",
            RelayEventKind::Other(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "monitorUpdate" => RelayEventKind::MonitorUpdate,
            "syncComplete" => RelayEventKind::SyncComplete,
            other => RelayEventKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RelayEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a `monitorUpdate` / `syncComplete` event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RelayPayload {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", deserialize_with = "or_default")
    )]
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub count: u64,
    /// Milliseconds since the Unix epoch.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub timestamp: i64,
    #[cfg_attr(
        feature = "serde",
        serde(
            skip_serializing_if = "Option::is_none",
            deserialize_with = "or_default"
        )
    )]
    pub processed_count: Option<u64>,
    #[cfg_attr(
        feature = "serde",
        serde(
            skip_serializing_if = "Option::is_none",
            deserialize_with = "or_default"
        )
    )]
    pub request_count: Option<u64>,
    #[cfg_attr(
        feature = "serde",
        serde(
            skip_serializing_if = "Option::is_none",
            deserialize_with = "or_default"
        )
    )]
    pub error_count: Option<u64>,
}

impl RelayPayload {
    pub fn processed(&self) -> u64 {
        self.processed_count.unwrap_or(0)
    }

    #[cfg(feature = "chrono")]
    pub fn timestamp_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Frame layout on the socket: `{"event": "...", "data": {...}}`.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelayEnvelope {
    pub event: String,
    #[serde(default, deserialize_with = "or_default")]
    pub data: RelayPayload,
}

#[cfg(feature = "serde")]
impl RelayEnvelope {
    pub fn kind(&self) -> RelayEventKind {
        RelayEventKind::parse(&self.event)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_optional_counters() {
        let raw = r#"{"event":"syncComplete","data":{"type":"sync","count":3,"timestamp":1700000000000,"processedCount":3}}"#;
        let envelope: RelayEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.kind(), RelayEventKind::SyncComplete);
        assert_eq!(envelope.data.processed(), 3);
        assert_eq!(envelope.data.error_count, None);
        assert!(envelope.data.timestamp_utc().is_some());
    }

    #[test]
    fn null_counters_read_as_zero() {
        let raw = r#"{"event":"monitorUpdate","data":{"type":null,"count":null,"timestamp":"soon","errorCount":null}}"#;
        let envelope: RelayEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.count, 0);
        assert_eq!(envelope.data.timestamp, 0);
        assert_eq!(envelope.data.error_count, None);

        let bare: RelayEnvelope =
            serde_json::from_str(r#"{"event":"syncComplete","data":null}"#).unwrap();
        assert_eq!(bare.data, RelayPayload::default());
    }

    #[test]
    fn unknown_event_names_are_preserved() {
        assert_eq!(
            RelayEventKind::parse("heartbeat"),
            RelayEventKind::Other("heartbeat".into())
        );
        assert_eq!(RelayEventKind::MonitorUpdate.as_str(), "monitorUpdate");
    }
}
