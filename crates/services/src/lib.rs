#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod error;
pub mod http_api;
pub mod prefs_service;
pub mod recording_service;
pub mod sync_service;
pub mod voice_service;

pub use practice_core::Clock;

pub use api::{
    ActivityFieldUpdate, DayToggle, MutationOutcome, PracticeApi, ProgressSnapshot,
    RecordingInfo, RecordingUpload, ScriptAudioRequest, WeekSnapshot,
};
pub use app_services::AppServices;
pub use error::{
    ApiError, AppServicesError, PrefsServiceError, RecordingServiceError, SyncServiceError,
    VoiceServiceError,
};
pub use http_api::{HttpApi, ServerConfig};
pub use prefs_service::{AudioSource, PrefsService};
pub use recording_service::RecordingService;
pub use sync_service::{ProgressStore, StoreTicket, SyncService};
pub use voice_service::VoiceService;
