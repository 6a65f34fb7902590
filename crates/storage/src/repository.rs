use async_trait::async_trait;
use quiz_core::model::ResultPayload;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key of the best-score slot in the persistent store.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Key of the result handoff slot in the session store.
pub const RESULTS_KEY: &str = "results";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// String-keyed storage with single-value slots.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Simple in-memory store for tests and for process-scoped data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

//
// ─── TYPED SLOTS ───────────────────────────────────────────────────────────────
//

/// Best score ever achieved, kept in a persistent store.
#[derive(Clone)]
pub struct BestScoreSlot {
    store: Arc<dyn KeyValueStore>,
}

impl BestScoreSlot {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current best score; a missing or unparsable value reads as 0.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn load(&self) -> Result<u32, StorageError> {
        let raw = self.store.get(HIGH_SCORE_KEY).await?;
        Ok(raw
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(0))
    }

    /// Store `score` if it strictly beats the stored best.
    ///
    /// Returns the best score after the call and whether it changed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or written.
    pub async fn record(&self, score: u32) -> Result<(u32, bool), StorageError> {
        let best = self.load().await?;
        if score > best {
            self.store.set(HIGH_SCORE_KEY, &score.to_string()).await?;
            return Ok((score, true));
        }
        Ok((best, false))
    }
}

/// Single slot holding the most recently finished quiz.
#[derive(Clone)]
pub struct ResultSlot {
    store: Arc<dyn KeyValueStore>,
}

impl ResultSlot {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrite the slot with `payload`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails, or other storage errors.
    pub async fn write(&self, payload: &ResultPayload) -> Result<(), StorageError> {
        let json = serde_json::to_string(payload)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(RESULTS_KEY, &json).await
    }

    /// Read back the stored payload.
    ///
    /// `Ok(None)` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when the stored value is not a payload.
    pub async fn read(&self) -> Result<Option<ResultPayload>, StorageError> {
        let Some(raw) = self.store.get(RESULTS_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Persistent and session-scoped stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    /// Survives restarts (best score).
    pub persistent: Arc<dyn KeyValueStore>,
    /// Lives as long as the process (result handoff).
    pub session: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let persistent: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let session: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        Self {
            persistent,
            session,
        }
    }

    #[must_use]
    pub fn best_score(&self) -> BestScoreSlot {
        BestScoreSlot::new(Arc::clone(&self.persistent))
    }

    #[must_use]
    pub fn results(&self) -> ResultSlot {
        ResultSlot::new(Arc::clone(&self.session))
    }
}
