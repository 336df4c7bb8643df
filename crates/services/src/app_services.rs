//! Wires storage and the server API into the service set the UI
//! consumes.

use std::sync::Arc;

use practice_core::Clock;

use crate::api::PracticeApi;
use crate::error::AppServicesError;
use crate::http_api::{HttpApi, ServerConfig};
use crate::prefs_service::PrefsService;
use crate::recording_service::RecordingService;
use crate::sync_service::SyncService;
use crate::voice_service::VoiceService;
use storage::repository::Storage;

#[derive(Clone)]
pub struct AppServices {
    sync: SyncService,
    voices: VoiceService,
    prefs: PrefsService,
    recordings: RecordingService,
    clock: Clock,
    server_base: String,
}

impl AppServices {
    /// Production wiring: sqlite-backed local state and the HTTP API.
    pub async fn new_sqlite(
        database_url: &str,
        config: ServerConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(database_url).await?;
        let clock = Clock::default();
        let server_base = config.base_url.clone();
        let api: Arc<dyn PracticeApi> = Arc::new(HttpApi::new(config, clock));
        Ok(Self::assemble(api, storage, clock, server_base))
    }

    /// Test wiring over any API implementation and in-memory storage.
    #[must_use]
    pub fn with_api(api: Arc<dyn PracticeApi>, clock: Clock) -> Self {
        Self::assemble(api, Storage::in_memory(), clock, String::new())
    }

    fn assemble(
        api: Arc<dyn PracticeApi>,
        storage: Storage,
        clock: Clock,
        server_base: String,
    ) -> Self {
        Self {
            sync: SyncService::new(api.clone(), clock),
            voices: VoiceService::new(api.clone(), storage.clone(), clock),
            prefs: PrefsService::new(storage),
            recordings: RecordingService::new(api),
            clock,
            server_base,
        }
    }

    #[must_use]
    pub fn sync(&self) -> &SyncService {
        &self.sync
    }

    #[must_use]
    pub fn voices(&self) -> &VoiceService {
        &self.voices
    }

    #[must_use]
    pub fn prefs(&self) -> &PrefsService {
        &self.prefs
    }

    #[must_use]
    pub fn recordings(&self) -> &RecordingService {
        &self.recordings
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Base URL media paths are resolved against.
    #[must_use]
    pub fn server_base(&self) -> &str {
        &self.server_base
    }
}
