//! Event inputs and the JSON bodies for the trigger and trigger-batch API calls.

use serde::{Deserialize, Serialize};

use crate::error::EncodeResult;

/// Event payload as handed over by the caller.
///
/// Bytes and text are sent as-is; any other value is sent as its JSON encoding.
/// A JSON string converts to [`EventData::Text`], so `"hello"` goes out as
/// `hello` rather than `"hello"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum EventData {
    Bytes(Vec<u8>),
    Text(String),
    Json(serde_json::Value),
    /// JSON text already produced by the serializer, sent unchanged.
    Encoded(String),
}

impl EventData {
    /// Convert any serializable value, surfacing the serializer's failure.
    ///
    /// The value is serialized straight to text, so struct fields keep their
    /// declaration order and integers wider than 64 bits are accepted.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> EncodeResult<Self> {
        let encoded = serde_json::to_string(value)?;
        if encoded.starts_with('"') {
            return Ok(EventData::Text(serde_json::from_str(&encoded)?));
        }
        Ok(EventData::Encoded(encoded))
    }
}

impl From<serde_json::Value> for EventData {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => EventData::Text(s),
            other => EventData::Json(other),
        }
    }
}

impl From<String> for EventData {
    fn from(value: String) -> Self {
        EventData::Text(value)
    }
}

impl From<&str> for EventData {
    fn from(value: &str) -> Self {
        EventData::Text(value.to_string())
    }
}

impl From<Vec<u8>> for EventData {
    fn from(value: Vec<u8>) -> Self {
        EventData::Bytes(value)
    }
}

impl From<&[u8]> for EventData {
    fn from(value: &[u8]) -> Self {
        EventData::Bytes(value.to_vec())
    }
}

/// One event to publish on a single channel; the unit of a batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub channel: String,
    pub name: String,
    pub data: EventData,
    /// Connection excluded from delivery (usually the one that caused the event).
    #[serde(default)]
    pub socket_id: Option<String>,
}

impl Event {
    pub fn new(
        channel: impl Into<String>,
        name: impl Into<String>,
        data: impl Into<EventData>,
    ) -> Self {
        Self {
            channel: channel.into(),
            name: name.into(),
            data: data.into(),
            socket_id: None,
        }
    }

    pub fn with_socket_id(mut self, socket_id: impl Into<String>) -> Self {
        self.socket_id = Some(socket_id.into());
        self
    }
}

/// Body of a trigger call: one payload fanned out to every listed channel.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerBody<'a> {
    pub name: &'a str,
    pub channels: &'a [String],
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<&'a str>,
}

/// One entry of a trigger-batch body.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEvent<'a> {
    pub channel: &'a str,
    pub name: &'a str,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<&'a str>,
}

/// Body of a trigger-batch call.
#[derive(Debug, Clone, Serialize)]
pub struct BatchBody<'a> {
    pub batch: Vec<BatchEvent<'a>>,
}

/// Request read by the CLI: either a single trigger or a batch.
///
/// Both shapes reject unknown fields, so a document mixing them matches neither.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TriggerRequest {
    Batch(BatchRequest),
    Single(SingleRequest),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchRequest {
    pub batch: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SingleRequest {
    pub channels: Vec<String>,
    pub name: String,
    pub data: EventData,
    #[serde(default)]
    pub socket_id: Option<String>,
}
