//! Error types for request body encoding.

use thiserror::Error;

/// Errors raised while turning events into a trigger or trigger-batch body.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event payload exceeded maximum size ({size} bytes is too much)")]
    PayloadTooLarge { size: usize },

    #[error("Data of the event #{index} in batch exceeded maximum size")]
    BatchPayloadTooLarge { index: usize },

    #[error("At least one channel is required")]
    NoChannels,

    #[error("Encryption key required for encrypted channel: {channel}")]
    MissingEncryptionKey { channel: String },

    #[error("Invalid encryption key: {0}")]
    InvalidEncryptionKey(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),
}

pub type EncodeResult<T> = Result<T, EncodeError>;
