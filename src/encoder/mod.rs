//! Trigger and trigger-batch body encoding.
//!
//! Event data is normalized to bytes, encrypted when the channel is a
//! `private-encrypted-*` channel, size-checked, and wrapped into the JSON body
//! the HTTP API expects. Every call is pure; no partial body is returned on error.

use std::borrow::Cow;

use tracing::debug;

use crate::crypto::{self, EncryptionKey};
use crate::error::{EncodeError, EncodeResult};
use crate::models::channel::is_encrypted_channel;
use crate::models::event::{BatchBody, BatchEvent, Event, EventData, TriggerBody, TriggerRequest};

/// Maximum size in bytes of an event's `data` field, measured after encryption.
pub const MAX_EVENT_PAYLOAD_SIZE: usize = 20480;

/// Normalize event data to bytes: bytes and text pass through, anything else is JSON-encoded.
pub fn encode_event_data(data: &EventData) -> EncodeResult<Cow<'_, [u8]>> {
    match data {
        EventData::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
        EventData::Text(text) => Ok(Cow::Borrowed(text.as_bytes())),
        EventData::Json(value) => Ok(Cow::Owned(serde_json::to_vec(value)?)),
        EventData::Encoded(json) => Ok(Cow::Borrowed(json.as_bytes())),
    }
}

/// Textual `data` field for one channel, with the size it counts against the limit.
struct Payload {
    text: String,
    size: usize,
}

fn payload_for(channel: &str, data: &EventData, key: Option<&EncryptionKey>) -> EncodeResult<Payload> {
    let bytes = encode_event_data(data)?;
    if is_encrypted_channel(channel) {
        let key = key.ok_or_else(|| EncodeError::MissingEncryptionKey {
            channel: channel.to_string(),
        })?;
        let text = crypto::encrypt(channel, &bytes, key)?;
        return Ok(Payload {
            size: text.len(),
            text,
        });
    }
    // Measured on the raw bytes, before invalid UTF-8 is replaced.
    let size = bytes.len();
    let text = match bytes {
        Cow::Borrowed(b) => String::from_utf8_lossy(b).into_owned(),
        Cow::Owned(b) => String::from_utf8(b)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
    };
    Ok(Payload { text, size })
}

/// Build the body for publishing one event to one or more channels.
///
/// Only `channels[0]` decides whether the payload is encrypted; all channels
/// share the resulting data.
///
/// The size limit applies to the ciphertext text on encrypted channels and to the
/// normalized bytes otherwise. Raw bytes that are not valid UTF-8 are still counted
/// by their raw length, then sent with each invalid sequence replaced by U+FFFD.
pub fn encode_trigger_body(
    channels: &[String],
    event: &str,
    data: &EventData,
    socket_id: Option<&str>,
    encryption_key: Option<&EncryptionKey>,
) -> EncodeResult<Vec<u8>> {
    let first = channels.first().ok_or(EncodeError::NoChannels)?;
    let payload = payload_for(first, data, encryption_key)?;
    if payload.size > MAX_EVENT_PAYLOAD_SIZE {
        debug!(event = %event, channel = %first, size = payload.size, "event payload too large");
        return Err(EncodeError::PayloadTooLarge { size: payload.size });
    }

    let body = serde_json::to_vec(&TriggerBody {
        name: event,
        channels,
        data: payload.text,
        socket_id,
    })?;
    debug!(event = %event, channels = channels.len(), bytes = body.len(), "encoded trigger body");
    Ok(body)
}

/// Build the body for publishing a batch of events, each on its own channel.
///
/// Output order matches input order. The first failing event aborts the whole batch.
pub fn encode_trigger_batch_body(
    batch: &[Event],
    encryption_key: Option<&EncryptionKey>,
) -> EncodeResult<Vec<u8>> {
    let mut events = Vec::with_capacity(batch.len());
    for (index, event) in batch.iter().enumerate() {
        let payload = payload_for(&event.channel, &event.data, encryption_key)?;
        if payload.size > MAX_EVENT_PAYLOAD_SIZE {
            debug!(index, channel = %event.channel, size = payload.size, "batch event payload too large");
            return Err(EncodeError::BatchPayloadTooLarge { index });
        }
        events.push(BatchEvent {
            channel: &event.channel,
            name: &event.name,
            data: payload.text,
            socket_id: event.socket_id.as_deref(),
        });
    }

    let body = serde_json::to_vec(&BatchBody { batch: events })?;
    debug!(events = batch.len(), bytes = body.len(), "encoded trigger batch body");
    Ok(body)
}

/// Encode whichever kind of request was supplied.
pub fn encode_request(
    request: &TriggerRequest,
    encryption_key: Option<&EncryptionKey>,
) -> EncodeResult<Vec<u8>> {
    match request {
        TriggerRequest::Single(single) => encode_trigger_body(
            &single.channels,
            &single.name,
            &single.data,
            single.socket_id.as_deref(),
            encryption_key,
        ),
        TriggerRequest::Batch(batch) => encode_trigger_batch_body(&batch.batch, encryption_key),
    }
}
