use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Key material at {path} has {len} bytes, expected {expected}.")]
    KeyLength {
        path: PathBuf,
        len: usize,
        expected: usize,
    },
    #[error("Encryption failed.")]
    Encrypt,
    #[error("Encrypted blob is too short ({len} bytes).")]
    BlobTooShort { len: usize },
    #[error("Decryption failed; the blob belongs to another user or is corrupt.")]
    Decrypt,
    #[error("Failed to serialize credential record: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to parse credential record: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
