use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use practice_core::model::Voice;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The cached voice catalog plus the moment it was fetched. Freshness
/// policy lives in the service layer; storage just keeps the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCacheRecord {
    pub voices: Vec<Voice>,
    pub fetched_at: DateTime<Utc>,
}

/// Client-local key/value preferences (the browser-localStorage
/// replacement). Keys are fixed patterns embedding the week key, built
/// by the prefs service.
#[async_trait]
pub trait ClientPrefsRepository: Send + Sync {
    /// Fetch a preference value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails; a missing key is
    /// `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store or replace a preference value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persistence fails.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a preference. Removing a missing key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Persisted voice-catalog cache.
#[async_trait]
pub trait VoiceCacheRepository: Send + Sync {
    /// Load the cached catalog, if any was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read or decode fails.
    async fn load(&self) -> Result<Option<VoiceCacheRecord>, StorageError>;

    /// Replace the cached catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persistence fails.
    async fn save(&self, record: &VoiceCacheRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and
/// prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    prefs: Arc<Mutex<HashMap<String, String>>>,
    voice_cache: Arc<Mutex<Option<VoiceCacheRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientPrefsRepository for InMemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .prefs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .prefs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .prefs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[async_trait]
impl VoiceCacheRepository for InMemoryRepository {
    async fn load(&self) -> Result<Option<VoiceCacheRecord>, StorageError> {
        let guard = self
            .voice_cache
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, record: &VoiceCacheRecord) -> Result<(), StorageError> {
        let mut guard = self
            .voice_cache
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }
}

/// Aggregates the client-local repositories behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub prefs: Arc<dyn ClientPrefsRepository>,
    pub voice_cache: Arc<dyn VoiceCacheRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let prefs: Arc<dyn ClientPrefsRepository> = Arc::new(repo.clone());
        let voice_cache: Arc<dyn VoiceCacheRepository> = Arc::new(repo);
        Self { prefs, voice_cache }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::time::fixed_now;

    #[tokio::test]
    async fn prefs_round_trip_and_remove() {
        let repo = InMemoryRepository::new();
        assert!(repo.get("script_tab:2024-W01").await.unwrap().is_none());

        repo.set("script_tab:2024-W01", "2").await.unwrap();
        assert_eq!(
            repo.get("script_tab:2024-W01").await.unwrap().as_deref(),
            Some("2")
        );

        repo.remove("script_tab:2024-W01").await.unwrap();
        assert!(repo.get("script_tab:2024-W01").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn voice_cache_replaces_previous_record() {
        let repo = InMemoryRepository::new();
        let record = VoiceCacheRecord {
            voices: vec![Voice {
                voice_id: "tc_olivia".into(),
                name: "Olivia".into(),
            }],
            fetched_at: fixed_now(),
        };
        repo.save(&record).await.unwrap();

        let newer = VoiceCacheRecord {
            voices: vec![],
            fetched_at: fixed_now() + chrono::Duration::hours(1),
        };
        repo.save(&newer).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert!(loaded.voices.is_empty());
        assert_eq!(loaded.fetched_at, newer.fetched_at);
    }
}
