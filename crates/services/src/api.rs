//! The server contract: request/response shapes and the `PracticeApi`
//! trait the sync layer talks through. `HttpApi` is the production
//! implementation; tests substitute their own.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use practice_core::model::{
    ActivityId, ProgressDocument, Provider, Roadmap, Voice, WeekRecord, WeeklySummary,
};
use practice_core::week::WeekKey;

use crate::error::ApiError;

/// Response of `GET /api/progress`: the full document plus the
/// server's idea of the current week.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressSnapshot {
    pub progress: ProgressDocument,
    pub current_week: WeekKey,
    pub weekly_summary: WeeklySummary,
}

/// Response of `GET /api/week/{key}`: a single week's record and
/// summary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeekSnapshot {
    pub week_key: WeekKey,
    pub progress: WeekRecord,
    pub summary: WeeklySummary,
}

/// The authoritative state a confirmed mutation hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub progress: ProgressDocument,
    pub weekly_summary: Option<WeeklySummary>,
    pub warnings: Vec<String>,
}

/// `POST /api/progress` body.
#[derive(Debug, Clone, Serialize)]
pub struct DayToggle {
    pub activity_id: ActivityId,
    pub week_key: WeekKey,
    pub day: NaiveDate,
    pub completed: bool,
    /// Expressions toggles carry the assigned file so the server can
    /// store the object-form entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp3_file: Option<String>,
}

/// `POST /api/activity-info` body; saves one field of one activity.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityFieldUpdate {
    pub activity_id: ActivityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_key: Option<WeekKey>,
    pub field_name: String,
    pub field_value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<NaiveDate>,
}

/// `POST /api/generate-audio-single` body. Both providers' parameter
/// sets travel together; `source_type` picks which one the server uses.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptAudioRequest {
    pub week_key: WeekKey,
    pub script_num: u8,
    pub voice_id: String,
    pub typecast_model: String,
    pub openai_voice: String,
    pub typecast_speed: f32,
    pub openai_speed: f32,
    pub source_type: Provider,
}

/// One uploaded practice recording, as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingInfo {
    pub filename: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub day: Option<NaiveDate>,
}

/// A captured audio blob bound for `POST /api/save-recording`.
#[derive(Debug, Clone)]
pub struct RecordingUpload {
    pub activity_id: ActivityId,
    pub week_key: WeekKey,
    pub day: NaiveDate,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything the client consumes from the practice server.
#[async_trait]
pub trait PracticeApi: Send + Sync {
    async fn fetch_roadmap(&self) -> ApiResult<Roadmap>;

    async fn fetch_progress(&self) -> ApiResult<ProgressSnapshot>;

    async fn fetch_week(&self, week: WeekKey) -> ApiResult<WeekSnapshot>;

    async fn toggle_day(&self, toggle: DayToggle) -> ApiResult<MutationOutcome>;

    async fn save_activity_field(&self, update: ActivityFieldUpdate) -> ApiResult<MutationOutcome>;

    /// `POST /api/generate/{activity_id}` for the ChatGPT-backed
    /// activities (journaling, shadowing scripts, prompt).
    async fn generate_activity(
        &self,
        activity: ActivityId,
        week: WeekKey,
    ) -> ApiResult<MutationOutcome>;

    async fn generate_script_audio(&self, request: ScriptAudioRequest)
        -> ApiResult<MutationOutcome>;

    async fn regenerate_expressions(&self, week: WeekKey) -> ApiResult<MutationOutcome>;

    async fn select_expressions_mp3(
        &self,
        week: WeekKey,
        mp3_file: String,
    ) -> ApiResult<MutationOutcome>;

    async fn regenerate_podcast(&self, week: WeekKey) -> ApiResult<MutationOutcome>;

    async fn generate_podcast_narration(&self, week: WeekKey) -> ApiResult<MutationOutcome>;

    async fn fetch_transcript(&self, week: WeekKey) -> ApiResult<String>;

    async fn save_recording(&self, upload: RecordingUpload) -> ApiResult<RecordingInfo>;

    async fn list_recordings(
        &self,
        activity: ActivityId,
        week: WeekKey,
        day: Option<NaiveDate>,
    ) -> ApiResult<Vec<RecordingInfo>>;

    async fn delete_recording(
        &self,
        activity: ActivityId,
        week: WeekKey,
        filename: String,
    ) -> ApiResult<()>;

    async fn fetch_voices(&self) -> ApiResult<Vec<Voice>>;
}
