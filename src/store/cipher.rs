use chacha20poly1305::aead::{Aead, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::StoreError;

const KEY_LABEL: &[u8] = b"acdc-bench token store v1";
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Cipher key = SHA-256(label || user key || entropy).
pub(super) fn derive_key(user_key: &[u8], entropy: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(KEY_LABEL);
    hasher.update(user_key);
    hasher.update(entropy);
    hasher.finalize().into()
}

/// Output layout: `nonce (12 bytes) || ciphertext+tag`.
pub(super) fn seal(key: &[u8; 32], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, StoreError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_err| StoreError::Encrypt)?;
    let mut blob = Vec::with_capacity(NONCE_LEN.saturating_add(ciphertext.len()));
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

pub(super) fn open(key: &[u8; 32], blob: &[u8], aad: &[u8]) -> Result<Vec<u8>, StoreError> {
    if blob.len() < NONCE_LEN.saturating_add(TAG_LEN) {
        return Err(StoreError::BlobTooShort { len: blob.len() });
    }
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    cipher
        .decrypt(
            Nonce::from_slice(nonce_bytes),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_err| StoreError::Decrypt)
}
