use crate::types::AppState;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tokio::fs;

pub const DEFAULT_STORAGE_KEY: &str = "agent_ui_state_v1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Key-value persistence for the single application document.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<AppState>, StoreError>;
    async fn save(&self, state: &AppState) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;

    /// Loads the stored document, substituting defaults when it is missing or
    /// unreadable.
    async fn load_or_default(&self) -> AppState {
        match self.load().await {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::info!("No stored state, starting from defaults");
                AppState::default()
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable stored state: {}", e);
                AppState::default()
            }
        }
    }
}

/// Stores the document as `<base_path>/<key>.json`.
pub struct FileStore {
    base_path: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(base_path: P, key: impl Into<String>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    pub async fn initialize(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path).await?;
        tracing::info!("State store initialized at {:?}", self.base_path);
        Ok(())
    }

    pub fn path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", self.key))
    }
}

#[async_trait]
impl StateStore for FileStore {
    async fn load(&self) -> Result<Option<AppState>, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let state: AppState = serde_json::from_str(&content)?;

        tracing::debug!("Loaded state from {:?}", path);
        Ok(Some(state))
    }

    async fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let path = self.path();

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        let content = serde_json::to_string(state)?;

        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved state to {:?}", path);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path).await?;
            tracing::info!("Cleared stored state at {:?}", path);
        }
        Ok(())
    }
}

/// In-process store holding the serialized document. Counts writes so that
/// callers can observe persistence side effects.
#[derive(Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with arbitrary content, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|raw| raw.clone())
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<Option<AppState>, StoreError> {
        let raw = self.raw.lock().map_err(|_| StoreError::Poisoned)?.clone();
        match raw {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let content = serde_json::to_string(state)?;
        *self.raw.lock().map_err(|_| StoreError::Poisoned)? = Some(content);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.raw.lock().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }
}

/// Writes a pretty-printed snapshot of `state` to `path`.
pub async fn export_state(state: &AppState, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let content = serde_json::to_string_pretty(state)?;
    fs::write(path, content).await?;

    tracing::info!("Exported state to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, LogKind};
    use oasis_tasks::{NewTask, Priority, TaskStatus};
    use serde_json::json;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        let task = state
            .tasks
            .create(NewTask::new("Enviar cotización").with_priority(Priority::P2));
        state.tasks.move_to(&task.id, TaskStatus::Doing);
        state.chat.push(ChatMessage::user("hola"), 120);
        state
            .logs
            .record(LogKind::TaskCreate, "Tarea creada", json!({ "id": task.id }), 300);
        state
    }

    #[tokio::test]
    async fn test_file_store_lifecycle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path(), DEFAULT_STORAGE_KEY);
        store.initialize().await.unwrap();

        assert!(store.load().await.unwrap().is_none());

        let state = sample_state();
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, state);

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path(), "broken");
        store.initialize().await.unwrap();
        tokio::fs::write(store.path(), "{ not json").await.unwrap();

        assert!(store.load().await.is_err());
        assert_eq!(store.load_or_default().await, AppState::default());
    }

    #[tokio::test]
    async fn test_memory_store_counts_writes() {
        let store = MemoryStore::new();
        assert_eq!(store.load_or_default().await, AppState::default());

        let state = sample_state();
        store.save(&state).await.unwrap();
        store.save(&state).await.unwrap();

        assert_eq!(store.writes(), 2);
        assert_eq!(store.load().await.unwrap().unwrap(), state);
    }

    #[tokio::test]
    async fn test_partial_document_fills_defaults() {
        let store = MemoryStore::with_raw(r#"{"tools":{"calendar":false,"sheets":true,"pdf":true,"whatsapp":true}}"#);
        let state = store.load_or_default().await;

        assert!(!state.tools.calendar);
        assert!(state.tools.whatsapp);
        assert_eq!(state.settings.agent_name, "Oasis Agent");
        assert!(state.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_export_is_pretty_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("agent-ui-export.json");
        let state = sample_state();

        export_state(&state, &path).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("\n  \"settings\""));
        let parsed: AppState = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, state);
    }
}
