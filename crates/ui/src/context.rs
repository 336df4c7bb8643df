use std::sync::Arc;

use practice_core::Clock;
use services::{PrefsService, RecordingService, SyncService, VoiceService};

/// What the composition root must provide for the UI to run. Services
/// are cheap handle types, so the trait hands out owned clones.
pub trait UiApp: Send + Sync {
    fn sync(&self) -> SyncService;
    fn voices(&self) -> VoiceService;
    fn prefs(&self) -> PrefsService;
    fn recordings(&self) -> RecordingService;
    fn clock(&self) -> Clock;
    /// Base URL that storage-relative media paths resolve against.
    fn server_base(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    sync: SyncService,
    voices: VoiceService,
    prefs: PrefsService,
    recordings: RecordingService,
    clock: Clock,
    server_base: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            sync: app.sync(),
            voices: app.voices(),
            prefs: app.prefs(),
            recordings: app.recordings(),
            clock: app.clock(),
            server_base: app.server_base(),
        }
    }

    #[must_use]
    pub fn sync(&self) -> SyncService {
        self.sync.clone()
    }

    #[must_use]
    pub fn voices(&self) -> VoiceService {
        self.voices.clone()
    }

    #[must_use]
    pub fn prefs(&self) -> PrefsService {
        self.prefs.clone()
    }

    #[must_use]
    pub fn recordings(&self) -> RecordingService {
        self.recordings.clone()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Absolute URL for a storage-relative media path. Already-absolute
    /// URLs pass through untouched.
    #[must_use]
    pub fn media_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.server_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
