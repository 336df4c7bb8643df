//! Voice catalog with a local cache.
//!
//! The narration voice list rarely changes, so a fetched copy is kept in
//! the client database for a day. When the server is unreachable a stale
//! cache is still better than an empty dropdown.

use std::sync::Arc;

use chrono::Duration;
use tracing::warn;

use practice_core::Clock;
use practice_core::model::Voice;

use crate::api::PracticeApi;
use crate::error::VoiceServiceError;
use storage::repository::{Storage, VoiceCacheRecord};

const CACHE_TTL_HOURS: i64 = 24;

#[derive(Clone)]
pub struct VoiceService {
    api: Arc<dyn PracticeApi>,
    storage: Storage,
    clock: Clock,
}

impl VoiceService {
    #[must_use]
    pub fn new(api: Arc<dyn PracticeApi>, storage: Storage, clock: Clock) -> Self {
        Self {
            api,
            storage,
            clock,
        }
    }

    /// Voices for the narration dropdown, cache-first. A fresh cached
    /// copy short-circuits the network; on fetch failure a stale copy
    /// is returned with a warning rather than an error.
    pub async fn voices(&self) -> Result<Vec<Voice>, VoiceServiceError> {
        let cached = self.storage.voice_cache.load().await?;
        if let Some(record) = &cached {
            if self.is_fresh(record) {
                return Ok(record.voices.clone());
            }
        }

        match self.fetch_and_cache().await {
            Ok(voices) => Ok(voices),
            Err(err) => match cached {
                Some(record) => {
                    warn!("voice fetch failed, serving stale cache: {err}");
                    Ok(record.voices)
                }
                None => Err(err),
            },
        }
    }

    /// Bypass the cache and refetch.
    pub async fn refresh(&self) -> Result<Vec<Voice>, VoiceServiceError> {
        self.fetch_and_cache().await
    }

    async fn fetch_and_cache(&self) -> Result<Vec<Voice>, VoiceServiceError> {
        let voices = self.api.fetch_voices().await?;
        let record = VoiceCacheRecord {
            voices: voices.clone(),
            fetched_at: self.clock.now(),
        };
        self.storage.voice_cache.save(&record).await?;
        Ok(voices)
    }

    fn is_fresh(&self, record: &VoiceCacheRecord) -> bool {
        self.clock.now() - record.fetched_at < Duration::hours(CACHE_TTL_HOURS)
    }
}
