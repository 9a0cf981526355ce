use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// Key holding the signed-in user's public fields
pub const USER_KEY: &str = "ridewise-user";
/// Key holding users created by signup (seed accounts excluded)
pub const USERS_KEY: &str = "ridewise-users";
/// Key holding every booking of the session
pub const BOOKINGS_KEY: &str = "ridewise-bookings";

pub const ALL_KEYS: [&str; 3] = [USER_KEY, USERS_KEY, BOOKINGS_KEY];

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored value is not valid JSON: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Key/value storage that lives exactly as long as one session
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Drop everything held for the session
    fn clear(&self) -> Result<(), StorageError>;
}

/// Read and decode a JSON value. Missing keys and unreadable values both
/// come back as `None`; the latter is logged.
pub fn load_json<T: DeserializeOwned>(storage: &dyn SessionStorage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "Failed to read session storage");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Ignoring unreadable session storage entry");
            None
        }
    }
}

/// Best-effort write: failures are logged and otherwise ignored.
pub fn save_json<T: Serialize + ?Sized>(storage: &dyn SessionStorage, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|raw| storage.set(key, &raw));

    if let Err(e) = result {
        warn!(key, error = %e, "Failed to write session storage");
    }
}

/// Best-effort removal.
pub fn remove_key(storage: &dyn SessionStorage, key: &str) {
    if let Err(e) = storage.remove(key) {
        warn!(key, error = %e, "Failed to remove session storage entry");
    }
}

/// In-process storage, gone when the session is dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("memory storage lock poisoned".to_string())
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.clear();
        Ok(())
    }
}
