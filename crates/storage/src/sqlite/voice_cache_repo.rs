use async_trait::async_trait;
use chrono::{DateTime, Utc};
use practice_core::model::Voice;
use sqlx::Row;

use crate::repository::{StorageError, VoiceCacheRecord, VoiceCacheRepository};

use super::SqliteRepository;

#[async_trait]
impl VoiceCacheRepository for SqliteRepository {
    async fn load(&self) -> Result<Option<VoiceCacheRecord>, StorageError> {
        let row = sqlx::query("SELECT payload, fetched_at FROM voice_cache WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let fetched_at: DateTime<Utc> = row
            .try_get("fetched_at")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let voices: Vec<Voice> = serde_json::from_str(&payload)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Some(VoiceCacheRecord { voices, fetched_at }))
    }

    async fn save(&self, record: &VoiceCacheRecord) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&record.voices)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO voice_cache (id, payload, fetched_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                payload = excluded.payload,
                fetched_at = excluded.fetched_at
            ",
        )
        .bind(payload)
        .bind(record.fetched_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
