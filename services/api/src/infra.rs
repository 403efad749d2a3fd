use assure_naija::config::StorageConfig;
use assure_naija::workflows::onboarding::{SessionId, SessionRecord, SessionStore, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn insert(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        match guard.entry(record.session_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(record.session_id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        guard.insert(record.session_id.clone(), record.clone());
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable("session store mutex poisoned".to_string())
}

/// One pretty-printed JSON document per session under a directory.
#[derive(Debug, Clone)]
pub(crate) struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub(crate) fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// `None` for ids that cannot be a file name we wrote.
    fn path_for(&self, id: &SessionId) -> Option<PathBuf> {
        let valid = !id.0.is_empty()
            && id
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| self.dir.join(format!("{}.json", id.0)))
    }

    fn writable_path(&self, id: &SessionId) -> Result<PathBuf, StoreError> {
        self.path_for(id)
            .ok_or_else(|| StoreError::Unavailable("session id is not file-safe".to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let Some(path) = self.path_for(id) else {
            return Ok(None);
        };

        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable(&path, err)),
        }
    }

    fn insert(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let path = self.writable_path(&record.session_id)?;
        let raw = serde_json::to_string_pretty(record)?;

        // Linking the staged file into place fails if the target exists.
        let staging = path.with_extension("json.new");
        fs::write(&staging, raw).map_err(|err| unavailable(&staging, err))?;
        let linked = fs::hard_link(&staging, &path);
        fs::remove_file(&staging).map_err(|err| unavailable(&staging, err))?;
        match linked {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                Err(StoreError::AlreadyExists(record.session_id.clone()))
            }
            Err(err) => Err(unavailable(&path, err)),
        }
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let path = self.writable_path(&record.session_id)?;
        let raw = serde_json::to_string_pretty(record)?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, raw).map_err(|err| unavailable(&staging, err))?;
        fs::rename(&staging, &path).map_err(|err| unavailable(&path, err))
    }
}

fn unavailable(path: &Path, err: io::Error) -> StoreError {
    StoreError::Unavailable(format!("{}: {err}", path.display()))
}

/// Store chosen at startup from `PROFILE_STORE_DIR`.
#[derive(Clone)]
pub(crate) enum SessionBackend {
    Memory(InMemorySessionStore),
    File(FileSessionStore),
}

impl SessionBackend {
    pub(crate) fn from_config(config: &StorageConfig) -> io::Result<Self> {
        match &config.profile_dir {
            Some(dir) => Ok(Self::File(FileSessionStore::open(dir)?)),
            None => Ok(Self::Memory(InMemorySessionStore::default())),
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            SessionBackend::Memory(_) => "memory",
            SessionBackend::File(_) => "file",
        }
    }
}

impl SessionStore for SessionBackend {
    fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        match self {
            SessionBackend::Memory(store) => store.load(id),
            SessionBackend::File(store) => store.load(id),
        }
    }

    fn insert(&self, record: &SessionRecord) -> Result<(), StoreError> {
        match self {
            SessionBackend::Memory(store) => store.insert(record),
            SessionBackend::File(store) => store.insert(record),
        }
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        match self {
            SessionBackend::Memory(store) => store.save(record),
            SessionBackend::File(store) => store.save(record),
        }
    }
}
