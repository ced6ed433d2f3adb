//! Channel types and naming conventions.

const PRIVATE_ENCRYPTED_PREFIX: &str = "private-encrypted-";
const PRIVATE_PREFIX: &str = "private-";
const PRESENCE_PREFIX: &str = "presence-";

/// Channel type based on prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelType {
    /// Public channel: no auth required.
    Public,
    /// Private channel: requires auth token.
    Private,
    /// Private channel whose event data is end-to-end encrypted.
    PrivateEncrypted,
    /// Presence channel: auth + track who is online.
    Presence,
}

impl ChannelType {
    /// Derive channel type from name. Pusher-style: `private-encrypted-*`, `private-*`, `presence-*`.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with(PRIVATE_ENCRYPTED_PREFIX) {
            ChannelType::PrivateEncrypted
        } else if name.starts_with(PRESENCE_PREFIX) {
            ChannelType::Presence
        } else if name.starts_with(PRIVATE_PREFIX) {
            ChannelType::Private
        } else {
            ChannelType::Public
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, ChannelType::PrivateEncrypted)
    }
}

/// True when event data published to `name` must be encrypted first.
pub fn is_encrypted_channel(name: &str) -> bool {
    ChannelType::from_name(name).is_encrypted()
}
