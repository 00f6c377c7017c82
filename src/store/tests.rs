use super::*;
use crate::domain::AccessToken;
use chrono::{DateTime, Utc};
use tempfile::tempdir;

fn record(token: &str, expires: &str) -> Result<CredentialRecord, String> {
    let expires_on = DateTime::parse_from_rfc3339(expires)
        .map_err(|err| format!("parse failed: {}", err))?
        .with_timezone(&Utc);
    Ok(CredentialRecord::new(
        AccessToken::new(token.to_owned()),
        expires_on,
    ))
}

fn static_store(byte: u8) -> TokenStore {
    TokenStore::new(Box::new(StaticKeyProvider::new([byte; USER_KEY_LEN])))
}

#[test]
fn save_then_load_round_trips() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("token.dat");
    let store = static_store(0x42);
    let original = record("eyJ0eXAiOiJKV1Qi.payload.sig", "2026-10-19T08:30:00.123Z")?;

    store
        .save(&original, &path)
        .map_err(|err| format!("save failed: {}", err))?;
    let loaded = store.load(&path).ok_or("Expected a cached record")?;
    if loaded != original {
        return Err(format!("Round trip mismatch: {:?}", loaded));
    }
    Ok(())
}

#[test]
fn saved_blob_does_not_contain_plaintext() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("token.dat");
    let store = static_store(0x42);
    store
        .save(&record("plain-token-value", "2026-10-19T08:30:00Z")?, &path)
        .map_err(|err| format!("save failed: {}", err))?;
    let bytes = std::fs::read(&path).map_err(|err| format!("read failed: {}", err))?;
    let text = String::from_utf8_lossy(&bytes);
    if text.contains("plain-token-value") || text.contains("accessToken") {
        return Err("Blob leaks plaintext".to_owned());
    }
    Ok(())
}

#[test]
fn save_overwrites_existing_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("token.dat");
    let store = static_store(1);
    store
        .save(&record("first", "2026-10-19T08:30:00Z")?, &path)
        .map_err(|err| format!("save failed: {}", err))?;
    let second = record("second", "2026-10-20T08:30:00Z")?;
    store
        .save(&second, &path)
        .map_err(|err| format!("save failed: {}", err))?;
    if store.load(&path).as_ref() != Some(&second) {
        return Err("Expected the second record".to_owned());
    }
    Ok(())
}

#[test]
fn load_missing_file_is_none() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let store = static_store(1);
    if store.load(&dir.path().join("absent.dat")).is_some() {
        return Err("Expected None for a missing file".to_owned());
    }
    Ok(())
}

#[test]
fn load_corrupt_file_is_none() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let store = static_store(1);
    let cases: [&[u8]; 3] = [b"", b"not encrypted at all", &[0u8; 64]];
    for (idx, bytes) in cases.iter().enumerate() {
        let path = dir.path().join(format!("corrupt-{}.dat", idx));
        std::fs::write(&path, bytes).map_err(|err| format!("write failed: {}", err))?;
        if store.load(&path).is_some() {
            return Err(format!("Expected None for corrupt case {}", idx));
        }
    }
    Ok(())
}

#[test]
fn load_with_other_user_key_is_none() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("token.dat");
    static_store(1)
        .save(&record("tok", "2026-10-19T08:30:00Z")?, &path)
        .map_err(|err| format!("save failed: {}", err))?;
    if static_store(2).load(&path).is_some() {
        return Err("Another user's key must not decrypt the cache".to_owned());
    }
    Ok(())
}

#[test]
fn file_key_provider_creates_then_reuses_key() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let key_path = dir.path().join("nested").join("user.key");
    let provider = FileKeyProvider::new(key_path.clone());
    let first = provider.user_key().map_err(|err| err.to_string())?;
    let second = provider.user_key().map_err(|err| err.to_string())?;
    if first != second {
        return Err("Key material changed between calls".to_owned());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&key_path)
            .map_err(|err| format!("metadata failed: {}", err))?
            .permissions()
            .mode();
        if mode & 0o077 != 0 {
            return Err(format!("Key file is readable by others: {:o}", mode));
        }
    }
    Ok(())
}

#[test]
fn file_key_provider_rejects_wrong_length() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let key_path = dir.path().join("user.key");
    std::fs::write(&key_path, [1u8; 5]).map_err(|err| format!("write failed: {}", err))?;
    match FileKeyProvider::new(key_path).user_key() {
        Err(StoreError::KeyLength { len: 5, .. }) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected a key length error".to_owned()),
    }
}

#[test]
fn key_file_write_never_replaces_or_leaves_partial_files() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let key_path = dir.path().join("user.key");
    std::fs::write(&key_path, [9u8; USER_KEY_LEN])
        .map_err(|err| format!("write failed: {}", err))?;

    match keys::write_key_file(&key_path, &[1u8; USER_KEY_LEN]) {
        Err(StoreError::Persist { source, .. })
            if source.kind() == std::io::ErrorKind::AlreadyExists => {}
        Err(err) => return Err(format!("Unexpected error: {}", err)),
        Ok(()) => return Err("Existing key material must not be replaced".to_owned()),
    }
    let kept = std::fs::read(&key_path).map_err(|err| format!("read failed: {}", err))?;
    if kept != [9u8; USER_KEY_LEN] {
        return Err("Existing key material was modified".to_owned());
    }

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .map_err(|err| format!("read_dir failed: {}", err))?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name())
        .collect();
    if entries != [std::ffi::OsString::from("user.key")] {
        return Err(format!("Temporary files left behind: {:?}", entries));
    }
    Ok(())
}

#[test]
fn file_key_provider_leaves_only_the_key_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let key_path = dir.path().join("user.key");
    let key = FileKeyProvider::new(key_path.clone())
        .user_key()
        .map_err(|err| err.to_string())?;
    let on_disk = std::fs::read(&key_path).map_err(|err| format!("read failed: {}", err))?;
    if on_disk != key {
        return Err("Key file does not hold the returned key".to_owned());
    }
    let count = std::fs::read_dir(dir.path())
        .map_err(|err| format!("read_dir failed: {}", err))?
        .count();
    if count != 1 {
        return Err(format!("Expected only the key file, found {} entries", count));
    }
    Ok(())
}
