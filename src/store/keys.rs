use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub const USER_KEY_LEN: usize = 32;

/// Source of per-user key material for the token store.
pub trait UserKeyProvider: Send + Sync {
    /// Returns the key material of the current user.
    ///
    /// # Errors
    ///
    /// Returns an error when the key material cannot be read or created.
    fn user_key(&self) -> Result<[u8; USER_KEY_LEN], StoreError>;
}

/// Keeps random key material in a file only the current user can read.
///
/// The file is created on first use. Anyone who can read it can decrypt the
/// token cache, so it lives under the user's home directory by default.
#[derive(Debug, Clone)]
pub struct FileKeyProvider {
    path: PathBuf,
}

impl FileKeyProvider {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn create(&self) -> Result<[u8; USER_KEY_LEN], StoreError> {
        let mut key = [0u8; USER_KEY_LEN];
        rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut key);

        match write_key_file(&self.path, &key) {
            Ok(()) => {
                tracing::info!("Created per-user key material at {}", self.path.display());
                Ok(key)
            }
            Err(StoreError::Persist { source, .. })
                if source.kind() == std::io::ErrorKind::AlreadyExists =>
            {
                tracing::debug!(
                    "Key material at {} appeared concurrently; using it",
                    self.path.display()
                );
                self.read_existing()
            }
            Err(err) => Err(err),
        }
    }

    fn read_existing(&self) -> Result<[u8; USER_KEY_LEN], StoreError> {
        let bytes = std::fs::read(&self.path).map_err(|err| StoreError::Read {
            path: self.path.clone(),
            source: err,
        })?;
        let len = bytes.len();
        <[u8; USER_KEY_LEN]>::try_from(bytes).map_err(|_bytes| StoreError::KeyLength {
            path: self.path.clone(),
            len,
            expected: USER_KEY_LEN,
        })
    }
}

/// Writes `key` to a sibling temp file and moves it to `path` only once it is
/// complete. An existing file at `path` is never replaced.
pub(super) fn write_key_file(path: &Path, key: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |err: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source: err,
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(write_err)?;
    }
    tmp.write_all(key).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist_noclobber(path)
        .map_err(|err| StoreError::Persist {
            path: path.to_path_buf(),
            source: err.error,
        })?;
    Ok(())
}

impl UserKeyProvider for FileKeyProvider {
    fn user_key(&self) -> Result<[u8; USER_KEY_LEN], StoreError> {
        if self.path.exists() {
            return self.read_existing();
        }
        self.create()
    }
}

/// Fixed key material supplied by the caller.
#[derive(Clone)]
pub struct StaticKeyProvider {
    key: [u8; USER_KEY_LEN],
}

impl StaticKeyProvider {
    #[must_use]
    pub const fn new(key: [u8; USER_KEY_LEN]) -> Self {
        Self { key }
    }
}

impl UserKeyProvider for StaticKeyProvider {
    fn user_key(&self) -> Result<[u8; USER_KEY_LEN], StoreError> {
        Ok(self.key)
    }
}
