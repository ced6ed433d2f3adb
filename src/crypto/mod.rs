//! End-to-end encryption for `private-encrypted-*` channels.
//!
//! Each channel gets its own secretbox key, `SHA-256(channel_name ++ master_key)`.
//! Ciphertext travels as a JSON string `{"nonce": b64, "ciphertext": b64}` in the
//! event's `data` field; subscribers holding the master key derive the same secret.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{AeadInPlace, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{EncodeError, EncodeResult};

/// Master key size (256 bits).
pub const KEY_SIZE: usize = 32;
/// XSalsa20 nonce size (192 bits).
pub const NONCE_SIZE: usize = 24;
/// Poly1305 tag size, prepended to the ciphertext (NaCl layout).
pub const TAG_SIZE: usize = 16;

/// Encryption master key shared with subscribers of encrypted channels.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    pub fn from_bytes(bytes: &[u8]) -> EncodeResult<Self> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            EncodeError::InvalidEncryptionKey(format!(
                "expected {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }

    /// Parse a standard base64 encoded 32-byte key.
    pub fn from_base64(encoded: &str) -> EncodeResult<Self> {
        let bytes = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| EncodeError::InvalidEncryptionKey(format!("base64: {}", e)))?,
        );
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey([redacted])")
    }
}

/// Wire form of an encrypted event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMessage {
    pub nonce: String,
    pub ciphertext: String,
}

fn shared_secret(channel: &str, key: &EncryptionKey) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut hasher = Sha256::new();
    hasher.update(channel.as_bytes());
    hasher.update(key.as_bytes());
    Zeroizing::new(hasher.finalize().into())
}

fn cipher_for(channel: &str, key: &EncryptionKey) -> EncodeResult<XSalsa20Poly1305> {
    let secret = shared_secret(channel, key);
    XSalsa20Poly1305::new_from_slice(&secret[..])
        .map_err(|e| EncodeError::InvalidEncryptionKey(e.to_string()))
}

/// Encrypt `plaintext` for `channel` under a fresh random nonce.
pub fn encrypt(channel: &str, plaintext: &[u8], key: &EncryptionKey) -> EncodeResult<String> {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);
    encrypt_with_nonce(channel, plaintext, key, &nonce)
}

/// Encrypt with a caller-chosen nonce. Output is deterministic for equal inputs;
/// a nonce must never be reused with the same channel and key outside of tests.
pub fn encrypt_with_nonce(
    channel: &str,
    plaintext: &[u8],
    key: &EncryptionKey,
    nonce: &[u8; NONCE_SIZE],
) -> EncodeResult<String> {
    let cipher = cipher_for(channel, key)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce[..]), b"", &mut buffer[..])
        .map_err(|_| EncodeError::Encryption("secretbox seal failed".to_string()))?;

    let mut sealed = Vec::with_capacity(TAG_SIZE + buffer.len());
    sealed.extend_from_slice(&tag);
    sealed.extend_from_slice(&buffer);

    let message = EncryptedMessage {
        nonce: STANDARD.encode(nonce),
        ciphertext: STANDARD.encode(&sealed),
    };
    Ok(serde_json::to_string(&message)?)
}

/// Open a payload produced by [`encrypt`] for the same channel and key.
pub fn decrypt(channel: &str, message: &str, key: &EncryptionKey) -> EncodeResult<Vec<u8>> {
    let message: EncryptedMessage = serde_json::from_str(message)
        .map_err(|e| EncodeError::Decryption(format!("envelope: {}", e)))?;
    let nonce = STANDARD
        .decode(&message.nonce)
        .map_err(|e| EncodeError::Decryption(format!("nonce: {}", e)))?;
    if nonce.len() != NONCE_SIZE {
        return Err(EncodeError::Decryption(format!(
            "nonce must be {} bytes, got {}",
            NONCE_SIZE,
            nonce.len()
        )));
    }
    let sealed = STANDARD
        .decode(&message.ciphertext)
        .map_err(|e| EncodeError::Decryption(format!("ciphertext: {}", e)))?;
    if sealed.len() < TAG_SIZE {
        return Err(EncodeError::Decryption("ciphertext too short".to_string()));
    }

    let (tag, body) = sealed.split_at(TAG_SIZE);
    let mut buffer = body.to_vec();
    cipher_for(channel, key)?
        .decrypt_in_place_detached(
            GenericArray::from_slice(&nonce[..]),
            b"",
            &mut buffer[..],
            GenericArray::from_slice(tag),
        )
        .map_err(|_| EncodeError::Decryption("authentication failed".to_string()))?;
    Ok(buffer)
}
