use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use practice_core::model::{
    ActivityId, ProgressDocument, Roadmap, Voice, WeekRecord, WeeklySummary,
};
use practice_core::time::fixed_clock;
use practice_core::week::WeekKey;
use services::api::{
    ActivityFieldUpdate, ApiResult, DayToggle, MutationOutcome, PracticeApi, ProgressSnapshot,
    RecordingInfo, RecordingUpload, ScriptAudioRequest, WeekSnapshot,
};
use services::error::ApiError;
use services::{AppServices, PrefsService, RecordingService, SyncService, VoiceService};

use crate::context::{UiApp, build_app_context};
use crate::views::activity::ActivityTestHandles;
use crate::views::{HomeView, WeekView};

/// Scriptable server double: one canned week record, roadmap, and voice
/// list; `fail_week` makes the week fetch reject.
#[derive(Default)]
pub struct MockApi {
    pub week_record: WeekRecord,
    pub roadmap: Option<Roadmap>,
    pub voices: Vec<Voice>,
    pub recordings: Vec<RecordingInfo>,
    pub fail_week: bool,
}

#[async_trait]
impl PracticeApi for MockApi {
    async fn fetch_roadmap(&self) -> ApiResult<Roadmap> {
        self.roadmap
            .clone()
            .ok_or_else(|| ApiError::Rejected("no roadmap".into()))
    }

    async fn fetch_progress(&self) -> ApiResult<ProgressSnapshot> {
        // Deliberately not the fixed clock's week, so tests can tell
        // server-driven navigation from the local fallback.
        Ok(ProgressSnapshot {
            progress: ProgressDocument::default(),
            current_week: "2024-W03".parse().map_err(|_| ApiError::Rejected("bad key".into()))?,
            weekly_summary: WeeklySummary::default(),
        })
    }

    async fn fetch_week(&self, week: WeekKey) -> ApiResult<WeekSnapshot> {
        if self.fail_week {
            return Err(ApiError::Rejected("No progress for that week".into()));
        }
        Ok(WeekSnapshot {
            week_key: week,
            progress: self.week_record.clone(),
            summary: WeeklySummary {
                week_key: week.to_string(),
                total_activities: 5,
                completed_activities: 2,
                ..Default::default()
            },
        })
    }

    async fn toggle_day(&self, _toggle: DayToggle) -> ApiResult<MutationOutcome> {
        Err(ApiError::Rejected("Invalid day for this week".into()))
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
        Ok("Host: Welcome back.\n\nGuest: Glad to be here.".into())
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
        Ok(self.recordings.clone())
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
        Ok(self.voices.clone())
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn sync(&self) -> SyncService {
        self.services.sync().clone()
    }

    fn voices(&self) -> VoiceService {
        self.services.voices().clone()
    }

    fn prefs(&self) -> PrefsService {
        self.services.prefs().clone()
    }

    fn recordings(&self) -> RecordingService {
        self.services.recordings().clone()
    }

    fn clock(&self) -> practice_core::Clock {
        *self.services.clock()
    }

    fn server_base(&self) -> String {
        String::new()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Week(i32, u32),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: ActivityTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

// The home view redirects to the week route by path, so the harness
// router carries both.
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/week/:year/:week", WeekView)]
    Week { year: i32, week: u32 },
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Week(year, week) => rsx! { WeekView { year, week } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub handles: ActivityTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, api: MockApi) -> ViewHarness {
    let services = AppServices::with_api(Arc::new(api), fixed_clock());
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let handles = ActivityTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );
    ViewHarness {
        dom,
        services,
        handles,
    }
}
