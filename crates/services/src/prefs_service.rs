//! Client-local UI preferences, persisted per week in the local
//! database under namespaced keys. These never travel to the server.

use practice_core::model::ScriptSlot;
use practice_core::week::WeekKey;

use crate::error::PrefsServiceError;
use storage::repository::Storage;

/// Which audio track the podcast player is pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioSource {
    #[default]
    Original,
    Narration,
}

impl AudioSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioSource::Original => "original",
            AudioSource::Narration => "narration",
        }
    }

    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value {
            "narration" => AudioSource::Narration,
            _ => AudioSource::Original,
        }
    }
}

#[derive(Clone)]
pub struct PrefsService {
    storage: Storage,
}

impl PrefsService {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Selected shadowing script tab for a week. Defaults to slot 1.
    pub async fn script_tab(&self, week: WeekKey) -> Result<ScriptSlot, PrefsServiceError> {
        let stored = self.storage.prefs.get(&format!("script_tab:{week}")).await?;
        Ok(stored
            .and_then(|v| v.parse::<u8>().ok())
            .and_then(ScriptSlot::from_number)
            .unwrap_or(ScriptSlot::One))
    }

    pub async fn set_script_tab(
        &self,
        week: WeekKey,
        slot: ScriptSlot,
    ) -> Result<(), PrefsServiceError> {
        self.storage
            .prefs
            .set(&format!("script_tab:{week}"), &slot.number().to_string())
            .await?;
        Ok(())
    }

    /// Playback speed for the expressions player. Defaults to 1.0.
    pub async fn playback_speed(&self, week: WeekKey) -> Result<f64, PrefsServiceError> {
        let stored = self.storage.prefs.get(&format!("playback_speed:{week}")).await?;
        Ok(parse_speed(stored))
    }

    pub async fn set_playback_speed(
        &self,
        week: WeekKey,
        speed: f64,
    ) -> Result<(), PrefsServiceError> {
        self.storage
            .prefs
            .set(&format!("playback_speed:{week}"), &speed.to_string())
            .await?;
        Ok(())
    }

    /// Playback speed for one shadowing slot's player.
    pub async fn slot_playback_speed(
        &self,
        week: WeekKey,
        slot: ScriptSlot,
    ) -> Result<f64, PrefsServiceError> {
        let key = format!("playback_speed:{week}:{}", slot.number());
        Ok(parse_speed(self.storage.prefs.get(&key).await?))
    }

    pub async fn set_slot_playback_speed(
        &self,
        week: WeekKey,
        slot: ScriptSlot,
        speed: f64,
    ) -> Result<(), PrefsServiceError> {
        let key = format!("playback_speed:{week}:{}", slot.number());
        self.storage.prefs.set(&key, &speed.to_string()).await?;
        Ok(())
    }

    /// Which podcast track was last selected for a week.
    pub async fn podcast_source(&self, week: WeekKey) -> Result<AudioSource, PrefsServiceError> {
        let stored = self.storage.prefs.get(&format!("podcast_source:{week}")).await?;
        Ok(stored
            .map(|v| AudioSource::from_str_or_default(&v))
            .unwrap_or_default())
    }

    pub async fn set_podcast_source(
        &self,
        week: WeekKey,
        source: AudioSource,
    ) -> Result<(), PrefsServiceError> {
        self.storage
            .prefs
            .set(&format!("podcast_source:{week}"), source.as_str())
            .await?;
        Ok(())
    }
}

fn parse_speed(stored: Option<String>) -> f64 {
    stored.and_then(|v| v.parse::<f64>().ok()).unwrap_or(1.0)
}
