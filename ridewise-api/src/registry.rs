use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use chrono::{DateTime, Utc};
use ridewise_booking::RideSession;
use ridewise_core::{MemoryStorage, SessionStorage};
use ridewise_store::app_config::StorageConfig;
use ridewise_store::{FileStorage, StorageBackend};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Guarded session; `None` once it has been closed
type SharedSession = Arc<Mutex<Option<RideSession>>>;

#[derive(Clone)]
struct SessionEntry {
    session: SharedSession,
    expires_at: DateTime<Utc>,
}

/// Live sessions keyed by id.
///
/// The map lock is only held to look an entry up or take it out. Store
/// operations run on the blocking pool under the session's own lock, since
/// the file backend does synchronous disk I/O.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    storage: StorageConfig,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionRegistry {
    /// With the file backend, session directories left by a previous process
    /// are removed here: their sessions can no longer be reached.
    pub fn new(storage: StorageConfig) -> Self {
        if storage.backend == StorageBackend::File {
            let stale = FileStorage::remove_stale_sessions(&storage.data_dir, |name| {
                Uuid::parse_str(name).is_ok()
            });
            match stale {
                Ok(0) => {}
                Ok(removed) => info!(removed, dir = %storage.data_dir.display(), "Removed stale session storage"),
                Err(e) => warn!(error = %e, dir = %storage.data_dir.display(), "Failed to sweep stale session storage"),
            }
        }

        Self {
            sessions: Mutex::new(HashMap::new()),
            storage,
        }
    }

    fn storage_for(&self, id: Uuid) -> Arc<dyn SessionStorage> {
        match self.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => Arc::new(FileStorage::for_session(
                &self.storage.data_dir,
                &id.to_string(),
            )),
        }
    }

    /// Start a session that lives until `expires_at`
    pub async fn open(&self, expires_at: DateTime<Utc>) -> Result<Uuid, JoinError> {
        let id = Uuid::new_v4();
        let storage = self.storage_for(id);
        let session = tokio::task::spawn_blocking(move || RideSession::open(storage)).await?;

        let entry = SessionEntry {
            session: Arc::new(Mutex::new(Some(session))),
            expires_at,
        };
        lock(&self.sessions).insert(id, entry);

        info!(session_id = %id, %expires_at, "Session opened");
        Ok(id)
    }

    /// Run `f` against a live session. `None` if the session is unknown,
    /// closed or past its expiry.
    pub async fn with_session<R, F>(&self, id: Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&mut RideSession) -> R + Send + 'static,
        R: Send + 'static,
    {
        let entry = lock(&self.sessions).get(&id).cloned()?;
        if entry.expires_at <= Utc::now() {
            debug!(session_id = %id, "Session past expiry");
            return None;
        }

        let task = tokio::task::spawn_blocking(move || lock(&entry.session).as_mut().map(f));

        match task.await {
            Ok(result) => result,
            Err(e) => {
                error!(session_id = %id, error = %e, "Session operation failed");
                None
            }
        }
    }

    /// Tear a session down. Returns whether it existed.
    pub async fn close(&self, id: Uuid) -> bool {
        let Some(entry) = lock(&self.sessions).remove(&id) else {
            return false;
        };

        Self::close_sessions(vec![entry.session]).await;
        info!(session_id = %id, "Session closed by client");
        true
    }

    /// Close every session whose expiry is at or before `now`
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<SharedSession> = {
            let mut sessions = lock(&self.sessions);
            let ids: Vec<Uuid> = sessions
                .iter()
                .filter(|(_, entry)| entry.expires_at <= now)
                .map(|(id, _)| *id)
                .collect();
            ids.iter()
                .filter_map(|id| sessions.remove(id))
                .map(|entry| entry.session)
                .collect()
        };

        let purged = expired.len();
        if purged > 0 {
            Self::close_sessions(expired).await;
        }
        purged
    }

    async fn close_sessions(sessions: Vec<SharedSession>) {
        let task = tokio::task::spawn_blocking(move || {
            for session in sessions {
                // An operation already in flight finishes first
                if let Some(session) = lock(&session).take() {
                    session.close();
                }
            }
        });

        if let Err(e) = task.await {
            error!(error = %e, "Failed to close sessions");
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Periodically purge expired sessions
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = self.purge_expired(Utc::now()).await;
                if purged > 0 {
                    info!(purged, "Purged expired sessions");
                }
            }
        })
    }
}
