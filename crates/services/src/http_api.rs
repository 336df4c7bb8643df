use std::env;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use practice_core::Clock;
use practice_core::model::{
    ActivityId, ProgressDocument, Roadmap, Voice, WeeklySummary,
};
use practice_core::week::WeekKey;

use crate::api::{
    ActivityFieldUpdate, ApiResult, DayToggle, MutationOutcome, PracticeApi, ProgressSnapshot,
    RecordingInfo, RecordingUpload, ScriptAudioRequest, WeekSnapshot,
};
use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub base_url: String,
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("PRACTICE_SERVER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5001".into());
        Self { base_url }
    }

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Reqwest-backed implementation of [`PracticeApi`].
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ServerConfig,
    clock: Clock,
}

/// Shared envelope for mutating endpoints.
#[derive(Debug, Deserialize)]
struct MutationResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    progress: Option<ProgressDocument>,
    #[serde(default)]
    weekly_summary: Option<WeeklySummary>,
    #[serde(default)]
    warnings: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    voices: Vec<Voice>,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    transcript: String,
}

#[derive(Debug, Deserialize)]
struct SaveRecordingResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    recording: Option<RecordingInfo>,
}

#[derive(Debug, Deserialize)]
struct RecordingsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    recordings: Vec<RecordingInfo>,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Message precedence for a non-2xx body: JSON `error` field, then raw
/// text, then a generic status line.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP error {}", status.as_u16())
    } else {
        trimmed.to_string()
    }
}

fn rejection(error: Option<String>) -> ApiError {
    ApiError::Rejected(error.unwrap_or_else(|| "Request failed".into()))
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ServerConfig, clock: Clock) -> Self {
        Self {
            client: Client::new(),
            config,
            clock,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Status check shared by every call; parses the error message out
    /// of failed responses before the caller touches the body.
    async fn checked(&self, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status,
            message: error_message(status, &body),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Ok(self.checked(response).await?.json().await?)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Ok(self.checked(response).await?.json().await?)
    }

    async fn post_mutation(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<MutationOutcome> {
        let parsed: MutationResponse = self.post_json(path, body).await?;
        if !parsed.success {
            return Err(rejection(parsed.error));
        }
        let progress = parsed
            .progress
            .ok_or_else(|| ApiError::Rejected("Response carried no progress document".into()))?;
        Ok(MutationOutcome {
            progress,
            weekly_summary: parsed.weekly_summary,
            warnings: parsed.warnings.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl PracticeApi for HttpApi {
    async fn fetch_roadmap(&self) -> ApiResult<Roadmap> {
        self.get_json("/api/roadmap").await
    }

    async fn fetch_progress(&self) -> ApiResult<ProgressSnapshot> {
        // Cache-bust so a stale intermediary never hands back an old
        // document on the initial load.
        let path = format!("/api/progress?t={}", self.clock.now().timestamp_millis());
        self.get_json(&path).await
    }

    async fn fetch_week(&self, week: WeekKey) -> ApiResult<WeekSnapshot> {
        self.get_json(&format!("/api/week/{week}")).await
    }

    async fn toggle_day(&self, toggle: DayToggle) -> ApiResult<MutationOutcome> {
        self.post_mutation("/api/progress", &toggle).await
    }

    async fn save_activity_field(&self, update: ActivityFieldUpdate) -> ApiResult<MutationOutcome> {
        self.post_mutation("/api/activity-info", &update).await
    }

    async fn generate_activity(
        &self,
        activity: ActivityId,
        week: WeekKey,
    ) -> ApiResult<MutationOutcome> {
        self.post_mutation(
            &format!("/api/generate/{activity}"),
            &json!({ "week_key": week }),
        )
        .await
    }

    async fn generate_script_audio(
        &self,
        request: ScriptAudioRequest,
    ) -> ApiResult<MutationOutcome> {
        self.post_mutation("/api/generate-audio-single", &request).await
    }

    async fn regenerate_expressions(&self, week: WeekKey) -> ApiResult<MutationOutcome> {
        self.post_mutation(
            "/api/weekly-expressions/regenerate",
            &json!({ "week_key": week }),
        )
        .await
    }

    async fn select_expressions_mp3(
        &self,
        week: WeekKey,
        mp3_file: String,
    ) -> ApiResult<MutationOutcome> {
        self.post_mutation(
            "/api/weekly-expressions/select-mp3",
            &json!({ "week_key": week, "mp3_file": mp3_file }),
        )
        .await
    }

    async fn regenerate_podcast(&self, week: WeekKey) -> ApiResult<MutationOutcome> {
        self.post_mutation(
            "/api/podcast-shadowing/regenerate",
            &json!({ "week_key": week }),
        )
        .await
    }

    async fn generate_podcast_narration(&self, week: WeekKey) -> ApiResult<MutationOutcome> {
        self.post_mutation(
            "/api/podcast-shadowing/generate-typecast-audio",
            &json!({ "week_key": week }),
        )
        .await
    }

    async fn fetch_transcript(&self, week: WeekKey) -> ApiResult<String> {
        let parsed: TranscriptResponse = self
            .post_json("/api/podcast-shadowing/transcript", &json!({ "week_key": week }))
            .await?;
        if !parsed.success {
            return Err(rejection(parsed.error));
        }
        Ok(parsed.transcript)
    }

    async fn save_recording(&self, upload: RecordingUpload) -> ApiResult<RecordingInfo> {
        let filename = format!(
            "{}_{}_{}.webm",
            upload.activity_id, upload.week_key, upload.day
        );
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(filename)
            .mime_str(&upload.mime_type)?;
        let form = reqwest::multipart::Form::new()
            .part("audio", part)
            .text("activity_id", upload.activity_id.to_string())
            .text("week_key", upload.week_key.to_string())
            .text("day", upload.day.to_string());

        let response = self
            .client
            .post(self.url("/api/save-recording"))
            .multipart(form)
            .send()
            .await?;
        let parsed: SaveRecordingResponse = self.checked(response).await?.json().await?;
        if !parsed.success {
            return Err(rejection(parsed.error));
        }
        parsed
            .recording
            .ok_or_else(|| ApiError::Rejected("Response carried no recording info".into()))
    }

    async fn list_recordings(
        &self,
        activity: ActivityId,
        week: WeekKey,
        day: Option<NaiveDate>,
    ) -> ApiResult<Vec<RecordingInfo>> {
        let parsed: RecordingsResponse = self
            .post_json(
                "/api/get-recordings",
                &json!({ "activity_id": activity, "week_key": week, "day": day }),
            )
            .await?;
        if !parsed.success {
            return Err(rejection(parsed.error));
        }
        Ok(parsed.recordings)
    }

    async fn delete_recording(
        &self,
        activity: ActivityId,
        week: WeekKey,
        filename: String,
    ) -> ApiResult<()> {
        let parsed: AckResponse = self
            .post_json(
                "/api/delete-recording",
                &json!({ "activity_id": activity, "week_key": week, "filename": filename }),
            )
            .await?;
        if !parsed.success {
            return Err(rejection(parsed.error));
        }
        Ok(())
    }

    async fn fetch_voices(&self) -> ApiResult<Vec<Voice>> {
        let parsed: VoicesResponse = self.get_json("/api/voices").await?;
        if !parsed.success {
            return Err(rejection(parsed.error));
        }
        Ok(parsed.voices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_error_field() {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(
            error_message(status, r#"{"error": "No script available"}"#),
            "No script available"
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_text() {
        let status = StatusCode::BAD_GATEWAY;
        assert_eq!(error_message(status, "upstream unavailable"), "upstream unavailable");
        // JSON without an error field also falls through to the text.
        assert_eq!(error_message(status, r#"{"detail": "x"}"#), r#"{"detail": "x"}"#);
    }

    #[test]
    fn error_message_falls_back_to_status_line() {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(error_message(status, "   "), "HTTP error 500");
    }
}
