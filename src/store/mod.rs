//! Per-user encrypted persistence for the cached credential record.
//!
//! The store knows nothing about token semantics: it serializes whatever
//! [`CredentialRecord`] it is handed, seals it with a key bound to the current
//! user, and writes the blob atomically. Loading never fails hard; a missing,
//! unreadable or undecryptable cache simply yields `None`.
mod cipher;
mod keys;

#[cfg(test)]
mod tests;

use std::io::Write;
use std::path::Path;

use crate::domain::CredentialRecord;
use crate::error::{AppResult, StoreError};

pub use keys::{FileKeyProvider, StaticKeyProvider, USER_KEY_LEN, UserKeyProvider};

/// Fixed additional entropy mixed into the cipher key and bound as associated
/// data. Not a secret.
pub const ADDITIONAL_ENTROPY: [u8; 6] = [1, 3, 6, 0, 0, 6];

pub struct TokenStore {
    keys: Box<dyn UserKeyProvider>,
    entropy: Vec<u8>,
}

impl TokenStore {
    #[must_use]
    pub fn new(keys: Box<dyn UserKeyProvider>) -> Self {
        Self {
            keys,
            entropy: ADDITIONAL_ENTROPY.to_vec(),
        }
    }

    /// Encrypts `record` and atomically replaces the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when key material cannot be obtained, encryption
    /// fails, or the file cannot be written.
    pub fn save(&self, record: &CredentialRecord, path: &Path) -> AppResult<()> {
        let plaintext = serde_json::to_vec(record)
            .map_err(|err| StoreError::Serialize { source: err })?;
        let key = cipher::derive_key(&self.keys.user_key()?, &self.entropy);
        let blob = cipher::seal(&key, &plaintext, &self.entropy)?;
        write_atomic(path, &blob)?;
        tracing::debug!("Cached credential written to {}", path.display());
        Ok(())
    }

    /// Reads and decrypts the record at `path`.
    ///
    /// Returns `None` when the file does not exist or cannot be recovered.
    #[must_use]
    pub fn load(&self, path: &Path) -> Option<CredentialRecord> {
        if !path.exists() {
            tracing::debug!("No cached credential at {}", path.display());
            return None;
        }
        match self.try_load(path) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(
                    "Ignoring cached credential at {}: {}",
                    path.display(),
                    err
                );
                None
            }
        }
    }

    fn try_load(&self, path: &Path) -> Result<CredentialRecord, StoreError> {
        let blob = std::fs::read(path).map_err(|err| StoreError::Read {
            path: path.to_path_buf(),
            source: err,
        })?;
        let key = cipher::derive_key(&self.keys.user_key()?, &self.entropy);
        let plaintext = cipher::open(&key, &blob, &self.entropy)?;
        serde_json::from_slice(&plaintext).map_err(|err| StoreError::Deserialize { source: err })
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |err: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source: err,
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|err| StoreError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}
