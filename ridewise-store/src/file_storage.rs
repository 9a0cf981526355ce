use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use ridewise_core::{SessionStorage, StorageError};
use tracing::{debug, warn};

/// Session storage backed by a directory: one `<key>.json` file per key.
///
/// Removing the directory ends the session's persisted state.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory for one session under a shared root
    pub fn for_session(root: &Path, session_id: &str) -> Self {
        Self::new(root.join(session_id))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Delete session directories left under `root` by an earlier process.
    ///
    /// Only directories whose name satisfies `is_session_dir` are touched.
    /// A missing root is not an error. Returns how many were removed.
    pub fn remove_stale_sessions(
        root: &Path,
        is_session_dir: impl Fn(&str) -> bool,
    ) -> Result<usize, StorageError> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if !name.to_str().is_some_and(|n| is_session_dir(n)) {
                continue;
            }

            match fs::remove_dir_all(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(dir = %entry.path().display(), error = %e, "Failed to remove stale session"),
            }
        }

        Ok(removed)
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.starts_with('.') || key.contains(|c: char| c == '/' || c == '\\') {
            return Err(StorageError::Unavailable(format!("invalid storage key: {}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write then rename so readers never see a half-written file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(key, dir = %self.dir.display(), "Session storage written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
