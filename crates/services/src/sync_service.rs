//! Client-side progress state and the service that reconciles it with
//! the server.
//!
//! The store is the single source of truth for rendered progress. Every
//! confirmed mutation replaces the whole document with the server's
//! copy; the client never merges. Tickets stamp in-flight requests in
//! issue order: a slow response cannot clobber state a later request
//! already replaced, and a full reload invalidates everything issued
//! before it.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::warn;

use practice_core::Clock;
use practice_core::model::{ActivityId, CompletedDays, ProgressDocument, WeekRecord, WeeklySummary};
use practice_core::week::WeekKey;

use crate::api::{
    ActivityFieldUpdate, ApiResult, DayToggle, MutationOutcome, PracticeApi, ProgressSnapshot,
    ScriptAudioRequest, WeekSnapshot,
};
use crate::error::SyncServiceError;

/// Stamp for one in-flight request against a [`ProgressStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTicket {
    seq: u64,
}

/// The client's authoritative copy of the progress document, plus the
/// week currently displayed and its summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressStore {
    document: ProgressDocument,
    current_week: Option<WeekKey>,
    summary: Option<WeeklySummary>,
    issued: u64,
    applied: u64,
}

impl ProgressStore {
    #[must_use]
    pub fn document(&self) -> &ProgressDocument {
        &self.document
    }

    #[must_use]
    pub fn current_week(&self) -> Option<WeekKey> {
        self.current_week
    }

    #[must_use]
    pub fn summary(&self) -> Option<&WeeklySummary> {
        self.summary.as_ref()
    }

    /// Record for the displayed week, empty when the server has none.
    #[must_use]
    pub fn week_record(&self) -> WeekRecord {
        self.current_week
            .and_then(|week| self.document.week(&week))
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn completed_days(&self, activity: ActivityId) -> CompletedDays {
        self.week_record().completed_days(activity).clone()
    }

    /// Stamp to pair with a request about to be issued. Tickets rank by
    /// issue order, so several can be outstanding at once.
    #[must_use]
    pub fn ticket(&mut self) -> StoreTicket {
        self.issued += 1;
        StoreTicket { seq: self.issued }
    }

    /// Point the store at a different week without touching the
    /// document; the caller refreshes the summary separately.
    pub fn set_current_week(&mut self, week: WeekKey) {
        self.current_week = Some(week);
        self.invalidate_tickets();
    }

    pub fn set_week_snapshot(&mut self, snapshot: WeekSnapshot) {
        self.document
            .weeks
            .insert(snapshot.week_key, snapshot.progress);
        self.current_week = Some(snapshot.week_key);
        self.summary = Some(snapshot.summary);
        self.invalidate_tickets();
    }

    /// Apply a confirmed mutation unconditionally.
    pub fn apply(&mut self, outcome: MutationOutcome) {
        self.document = outcome.progress;
        if outcome.weekly_summary.is_some() {
            self.summary = outcome.weekly_summary;
        }
    }

    /// Apply a confirmed mutation unless something newer already landed.
    /// A response applies when its ticket outranks every response
    /// applied so far; a refetch outranks all tickets issued before it.
    /// Concurrent confirmations on different days therefore all land,
    /// while a slow response from before a reload is dropped. Returns
    /// whether it applied.
    pub fn apply_if_current(&mut self, ticket: StoreTicket, outcome: MutationOutcome) -> bool {
        if ticket.seq <= self.applied {
            return false;
        }
        self.applied = ticket.seq;
        self.apply(outcome);
        true
    }

    fn invalidate_tickets(&mut self) {
        self.applied = self.issued;
    }
}

/// Orchestrates server round trips for progress mutations.
#[derive(Clone)]
pub struct SyncService {
    api: Arc<dyn PracticeApi>,
    clock: Clock,
}

impl SyncService {
    #[must_use]
    pub fn new(api: Arc<dyn PracticeApi>, clock: Clock) -> Self {
        Self { api, clock }
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub async fn initial_snapshot(&self) -> Result<ProgressSnapshot, SyncServiceError> {
        Ok(self.api.fetch_progress().await?)
    }

    pub async fn fetch_week(&self, week: WeekKey) -> Result<WeekSnapshot, SyncServiceError> {
        Ok(self.api.fetch_week(week).await?)
    }

    /// Confirm or revert one day cell. The server answers with the full
    /// document, which becomes the new truth.
    pub async fn toggle_day(
        &self,
        activity: ActivityId,
        week: WeekKey,
        day: NaiveDate,
        completed: bool,
        mp3_file: Option<String>,
    ) -> Result<MutationOutcome, SyncServiceError> {
        let toggle = DayToggle {
            activity_id: activity,
            week_key: week,
            day,
            completed,
            mp3_file,
        };
        Ok(self.api.toggle_day(toggle).await?)
    }

    pub async fn save_activity_field(
        &self,
        update: ActivityFieldUpdate,
    ) -> Result<MutationOutcome, SyncServiceError> {
        Ok(self.api.save_activity_field(update).await?)
    }

    pub async fn save_prompt_notes(
        &self,
        week: WeekKey,
        notes: String,
    ) -> Result<MutationOutcome, SyncServiceError> {
        self.save_activity_field(ActivityFieldUpdate {
            activity_id: ActivityId::WeeklySpeakingPrompt,
            week_key: Some(week),
            field_name: "notes".into(),
            field_value: json!(notes),
            day: None,
        })
        .await
    }

    /// Auto-save variant for blur events: a failure is logged, never
    /// surfaced, and the user's draft stays in the textarea.
    pub async fn save_prompt_notes_silent(&self, week: WeekKey, notes: String) -> Option<MutationOutcome> {
        match self.save_prompt_notes(week, notes).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(%week, "auto-save of prompt notes failed: {err}");
                None
            }
        }
    }

    pub async fn save_expression_note(
        &self,
        week: WeekKey,
        day: NaiveDate,
        note: String,
    ) -> Result<MutationOutcome, SyncServiceError> {
        self.save_activity_field(ActivityFieldUpdate {
            activity_id: ActivityId::WeeklyExpressions,
            week_key: Some(week),
            field_name: "note".into(),
            field_value: json!(note),
            day: Some(day),
        })
        .await
    }

    /// Regenerate an activity's content. Expressions and podcast have
    /// dedicated endpoints; the rest go through the generic generator.
    pub async fn regenerate(
        &self,
        activity: ActivityId,
        week: WeekKey,
    ) -> Result<MutationOutcome, SyncServiceError> {
        let outcome = match activity {
            ActivityId::WeeklyExpressions => self.api.regenerate_expressions(week).await?,
            ActivityId::PodcastShadowing => self.api.regenerate_podcast(week).await?,
            _ => self.api.generate_activity(activity, week).await?,
        };
        Ok(outcome)
    }

    pub async fn generate_script_audio(
        &self,
        request: ScriptAudioRequest,
    ) -> Result<MutationOutcome, SyncServiceError> {
        Ok(self.api.generate_script_audio(request).await?)
    }

    pub async fn select_expressions_mp3(
        &self,
        week: WeekKey,
        mp3_file: String,
    ) -> Result<MutationOutcome, SyncServiceError> {
        Ok(self.api.select_expressions_mp3(week, mp3_file).await?)
    }

    pub async fn generate_podcast_narration(
        &self,
        week: WeekKey,
    ) -> Result<MutationOutcome, SyncServiceError> {
        Ok(self.api.generate_podcast_narration(week).await?)
    }

    pub async fn fetch_transcript(&self, week: WeekKey) -> Result<String, SyncServiceError> {
        Ok(self.api.fetch_transcript(week).await?)
    }

    pub async fn fetch_roadmap(&self) -> ApiResult<practice_core::model::Roadmap> {
        self.api.fetch_roadmap().await
    }
}
