//! Configuration loaded from environment.

use crate::crypto::EncryptionKey;

/// Configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Master key for `private-encrypted-*` channels (`ENCRYPTION_MASTER_KEY_BASE64`).
    pub encryption_master_key: Option<EncryptionKey>,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let encryption_master_key = match lookup("ENCRYPTION_MASTER_KEY_BASE64") {
            Some(encoded) if !encoded.trim().is_empty() => Some(
                EncryptionKey::from_base64(&encoded)
                    .map_err(|e| ConfigLoadError::InvalidEncryptionKey(e.to_string()))?,
            ),
            _ => None,
        };
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            encryption_master_key,
            log_level,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid ENCRYPTION_MASTER_KEY_BASE64: {0}")]
    InvalidEncryptionKey(String),
}
