use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use practice_core::model::{
    ActivityId, CompletedDays, CompletionEntry, ProgressDocument, PromptProgress, Roadmap, Voice,
    WeekRecord, WeeklySummary,
};
use practice_core::time::fixed_clock;
use practice_core::week::WeekKey;

use services::api::{
    ActivityFieldUpdate, ApiResult, DayToggle, MutationOutcome, PracticeApi, ProgressSnapshot,
    RecordingInfo, RecordingUpload, ScriptAudioRequest, WeekSnapshot,
};
use services::error::ApiError;
use services::sync_service::{ProgressStore, SyncService};
use services::voice_service::VoiceService;
use storage::repository::{Storage, VoiceCacheRecord};

fn week() -> WeekKey {
    "2024-W02".parse().unwrap()
}

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn document_with_prompt_days(days: &[NaiveDate]) -> ProgressDocument {
    let entries = days.iter().copied().map(CompletionEntry::Simple).collect();
    let mut doc = ProgressDocument::default();
    doc.weeks.insert(
        week(),
        WeekRecord {
            weekly_speaking_prompt: PromptProgress {
                completed_days: CompletedDays::new(entries),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    doc
}

/// Scriptable server double. Each toggle pops the next canned document;
/// voice fetches count calls and can be set to fail.
#[derive(Default)]
struct MockApi {
    toggle_documents: std::sync::Mutex<Vec<ProgressDocument>>,
    voices: Vec<Voice>,
    voice_calls: AtomicUsize,
    fail_voices: bool,
}

impl MockApi {
    fn with_toggles(documents: Vec<ProgressDocument>) -> Self {
        Self {
            toggle_documents: std::sync::Mutex::new(documents),
            ..Default::default()
        }
    }

    fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            ..Default::default()
        }
    }

    fn failing_voices() -> Self {
        Self {
            fail_voices: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl PracticeApi for MockApi {
    async fn fetch_roadmap(&self) -> ApiResult<Roadmap> {
        Err(ApiError::Rejected("not scripted".into()))
    }

    async fn fetch_progress(&self) -> ApiResult<ProgressSnapshot> {
        Ok(ProgressSnapshot {
            progress: ProgressDocument::default(),
            current_week: week(),
            weekly_summary: WeeklySummary {
                week_key: week().to_string(),
                total_activities: 5,
                ..Default::default()
            },
        })
    }

    async fn fetch_week(&self, key: WeekKey) -> ApiResult<WeekSnapshot> {
        Ok(WeekSnapshot {
            week_key: key,
            progress: WeekRecord::default(),
            summary: WeeklySummary {
                week_key: key.to_string(),
                ..Default::default()
            },
        })
    }

    async fn toggle_day(&self, _toggle: DayToggle) -> ApiResult<MutationOutcome> {
        let mut scripted = self.toggle_documents.lock().unwrap();
        if scripted.is_empty() {
            return Err(ApiError::Rejected("Invalid day for this week".into()));
        }
        Ok(MutationOutcome {
            progress: scripted.remove(0),
            weekly_summary: None,
            warnings: Vec::new(),
        })
    }

    async fn save_activity_field(&self, _update: ActivityFieldUpdate) -> ApiResult<MutationOutcome> {
        Err(ApiError::Rejected("not scripted".into()))
    }

    async fn generate_activity(
        &self,
        _activity: ActivityId,
        _week: WeekKey,
    ) -> ApiResult<MutationOutcome> {
        Err(ApiError::Rejected("not scripted".into()))
    }

    async fn generate_script_audio(
        &self,
        _request: ScriptAudioRequest,
    ) -> ApiResult<MutationOutcome> {
        Err(ApiError::Rejected("not scripted".into()))
    }

    async fn regenerate_expressions(&self, _week: WeekKey) -> ApiResult<MutationOutcome> {
        Err(ApiError::Rejected("not scripted".into()))
    }

    async fn select_expressions_mp3(
        &self,
        _week: WeekKey,
        _mp3_file: String,
    ) -> ApiResult<MutationOutcome> {
        Err(ApiError::Rejected("not scripted".into()))
    }

    async fn regenerate_podcast(&self, _week: WeekKey) -> ApiResult<MutationOutcome> {
        Err(ApiError::Rejected("not scripted".into()))
    }

    async fn generate_podcast_narration(&self, _week: WeekKey) -> ApiResult<MutationOutcome> {
        Err(ApiError::Rejected("not scripted".into()))
    }

    async fn fetch_transcript(&self, _week: WeekKey) -> ApiResult<String> {
        Ok("Host: Welcome back.".into())
    }

    async fn save_recording(&self, upload: RecordingUpload) -> ApiResult<RecordingInfo> {
        Ok(RecordingInfo {
            filename: format!("{}_{}_{}.webm", upload.activity_id, upload.week_key, upload.day),
            url: String::new(),
            day: Some(upload.day),
        })
    }

    async fn list_recordings(
        &self,
        _activity: ActivityId,
        _week: WeekKey,
        _day: Option<NaiveDate>,
    ) -> ApiResult<Vec<RecordingInfo>> {
        Ok(Vec::new())
    }

    async fn delete_recording(
        &self,
        _activity: ActivityId,
        _week: WeekKey,
        _filename: String,
    ) -> ApiResult<()> {
        Ok(())
    }

    async fn fetch_voices(&self) -> ApiResult<Vec<Voice>> {
        self.voice_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_voices {
            return Err(ApiError::Rejected("Typecast unavailable".into()));
        }
        Ok(self.voices.clone())
    }
}

#[tokio::test]
async fn toggle_outcome_replaces_store_state() {
    let monday = day("2024-01-15");
    let api = Arc::new(MockApi::with_toggles(vec![document_with_prompt_days(&[monday])]));
    let sync = SyncService::new(api, fixed_clock());

    let mut store = ProgressStore::default();
    store.set_current_week(sync.initial_snapshot().await.unwrap().current_week);

    let ticket = store.ticket();
    let outcome = sync
        .toggle_day(ActivityId::WeeklySpeakingPrompt, week(), monday, true, None)
        .await
        .unwrap();
    assert!(store.apply_if_current(ticket, outcome));
    assert!(
        store
            .completed_days(ActivityId::WeeklySpeakingPrompt)
            .contains_day(monday)
    );
}

#[tokio::test]
async fn rejected_toggle_surfaces_server_message() {
    let api = Arc::new(MockApi::with_toggles(Vec::new()));
    let sync = SyncService::new(api, fixed_clock());

    let err = sync
        .toggle_day(
            ActivityId::WeeklySpeakingPrompt,
            week(),
            day("2024-01-15"),
            true,
            None,
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid day for this week"));
}

#[tokio::test]
async fn concurrent_toggles_on_different_days_both_land() {
    let monday = day("2024-01-15");
    let tuesday = day("2024-01-16");
    let api = Arc::new(MockApi::with_toggles(vec![
        document_with_prompt_days(&[monday]),
        document_with_prompt_days(&[monday, tuesday]),
    ]));
    let sync = SyncService::new(api, fixed_clock());

    let mut store = ProgressStore::default();
    store.set_current_week(week());

    // Both cells clicked before either confirmation returns.
    let monday_ticket = store.ticket();
    let tuesday_ticket = store.ticket();
    let monday_outcome = sync
        .toggle_day(ActivityId::WeeklySpeakingPrompt, week(), monday, true, None)
        .await
        .unwrap();
    let tuesday_outcome = sync
        .toggle_day(ActivityId::WeeklySpeakingPrompt, week(), tuesday, true, None)
        .await
        .unwrap();

    // Neither confirmed completion may be dropped.
    assert!(store.apply_if_current(monday_ticket, monday_outcome));
    assert!(store.apply_if_current(tuesday_ticket, tuesday_outcome));

    let days = store.completed_days(ActivityId::WeeklySpeakingPrompt);
    assert!(days.contains_day(monday));
    assert!(days.contains_day(tuesday));
}

#[tokio::test]
async fn late_response_loses_to_newer_confirmation() {
    let monday = day("2024-01-15");
    let tuesday = day("2024-01-16");
    let api = Arc::new(MockApi::with_toggles(vec![
        document_with_prompt_days(&[monday]),
        document_with_prompt_days(&[monday, tuesday]),
    ]));
    let sync = SyncService::new(api, fixed_clock());

    let mut store = ProgressStore::default();
    store.set_current_week(week());

    // Two toggles issued back to back; the first response arrives last.
    let first_ticket = store.ticket();
    let first = sync
        .toggle_day(ActivityId::WeeklySpeakingPrompt, week(), monday, true, None)
        .await
        .unwrap();
    let second_ticket = store.ticket();
    let second = sync
        .toggle_day(ActivityId::WeeklySpeakingPrompt, week(), tuesday, true, None)
        .await
        .unwrap();

    assert!(store.apply_if_current(second_ticket, second));
    assert!(!store.apply_if_current(first_ticket, first));

    let days = store.completed_days(ActivityId::WeeklySpeakingPrompt);
    assert!(days.contains_day(monday));
    assert!(days.contains_day(tuesday));
}

#[tokio::test]
async fn voice_catalog_is_served_from_fresh_cache() {
    let api = Arc::new(MockApi::with_voices(vec![Voice {
        voice_id: "tc_olivia".into(),
        name: "Olivia".into(),
    }]));
    let service = VoiceService::new(api.clone(), Storage::in_memory(), fixed_clock());

    let first = service.voices().await.unwrap();
    let second = service.voices().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(api.voice_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_cache_triggers_refetch() {
    let api = Arc::new(MockApi::with_voices(vec![Voice {
        voice_id: "tc_olivia".into(),
        name: "Olivia".into(),
    }]));
    let storage = Storage::in_memory();
    let clock = fixed_clock();
    storage
        .voice_cache
        .save(&VoiceCacheRecord {
            voices: Vec::new(),
            fetched_at: clock.now() - Duration::hours(25),
        })
        .await
        .unwrap();

    let service = VoiceService::new(api.clone(), storage, clock);
    let voices = service.voices().await.unwrap();
    assert_eq!(voices.len(), 1);
    assert_eq!(api.voice_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fetch_failure_falls_back_to_stale_cache() {
    let api = Arc::new(MockApi::failing_voices());
    let storage = Storage::in_memory();
    let clock = fixed_clock();
    storage
        .voice_cache
        .save(&VoiceCacheRecord {
            voices: vec![Voice {
                voice_id: "tc_harry".into(),
                name: "Harry".into(),
            }],
            fetched_at: clock.now() - Duration::hours(48),
        })
        .await
        .unwrap();

    let service = VoiceService::new(api, storage, clock);
    let voices = service.voices().await.unwrap();
    assert_eq!(voices[0].name, "Harry");
}

#[tokio::test]
async fn fetch_failure_without_cache_is_an_error() {
    let service = VoiceService::new(
        Arc::new(MockApi::failing_voices()),
        Storage::in_memory(),
        fixed_clock(),
    );
    assert!(service.voices().await.is_err());
}
