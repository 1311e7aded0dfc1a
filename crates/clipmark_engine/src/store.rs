use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clip_logging::clip_debug;
use tokio::sync::{watch, Mutex};

use crate::types::StoreError;

/// Wakes whenever the stored document changes, regardless of which context
/// wrote it — including the listener's own. The core's reentrancy guard
/// compensates for self-notification.
pub struct ChangeListener {
    rx: watch::Receiver<u64>,
}

impl ChangeListener {
    /// Waits for the next change. Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// The single logical value "current document", abstracted over the
/// platform's session-scoped storage so tests can inject [`MemoryStore`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The stored document, or `None` if never set.
    async fn get(&self) -> Result<Option<String>, StoreError>;

    /// Persists the document. Listeners are notified before this resolves,
    /// matching the platform's change-event ordering.
    async fn set(&self, value: &str) -> Result<(), StoreError>;

    fn watch(&self) -> ChangeListener;
}

/// In-memory store for tests and headless runs.
#[derive(Debug)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
    version: watch::Sender<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            value: Mutex::new(None),
            version,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.lock().await.clone())
    }

    async fn set(&self, value: &str) -> Result<(), StoreError> {
        *self.value.lock().await = Some(value.to_string());
        self.version.send_modify(|v| *v += 1);
        Ok(())
    }

    fn watch(&self) -> ChangeListener {
        ChangeListener {
            rx: self.version.subscribe(),
        }
    }
}

/// File-backed session store: one file holding the current document,
/// replaced atomically on every write. The file lives in a session-scoped
/// location (temp dir) so the platform discards it with the session.
pub struct SessionFileStore {
    path: PathBuf,
    version: watch::Sender<u64>,
}

impl SessionFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            path: path.into(),
            version,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentStore for SessionFileStore {
    async fn get(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    async fn set(&self, value: &str) -> Result<(), StoreError> {
        let path = self.path.clone();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || write_atomic(&path, &value))
            .await
            .map_err(|err| StoreError::Persist(err.to_string()))??;
        clip_debug!("session store wrote {:?}", self.path);
        self.version.send_modify(|v| *v += 1);
        Ok(())
    }

    fn watch(&self) -> ChangeListener {
        ChangeListener {
            rx: self.version.subscribe(),
        }
    }
}

/// Write a temp file in the same directory, then rename over the target.
fn write_atomic(path: &Path, value: &str) -> Result<(), StoreError> {
    use std::io::Write;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(value.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // persist() renames over an existing target atomically.
    tmp.persist(path).map_err(|err| StoreError::Io(err.error))?;
    Ok(())
}
