//! Request body encoding for a Pusher-style publish/subscribe HTTP API.
//!
//! Turns events into the JSON bodies of the trigger and trigger-batch calls,
//! encrypting data for `private-encrypted-*` channels and enforcing the
//! per-event payload size limit.

pub mod config;
pub mod crypto;
pub mod encoder;
pub mod error;
pub mod models;

pub use config::Config;
pub use crypto::EncryptionKey;
pub use encoder::{
    encode_event_data, encode_request, encode_trigger_batch_body, encode_trigger_body,
    MAX_EVENT_PAYLOAD_SIZE,
};
pub use error::{EncodeError, EncodeResult};
pub use models::{BatchRequest, ChannelType, Event, EventData, SingleRequest, TriggerRequest};
