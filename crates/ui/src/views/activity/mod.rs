//! One card per activity: header with options menu, activity-specific
//! body, the seven day cells, and a per-day detail panel.

mod expressions;
mod journaling;
mod podcast;
mod prompt;
mod shadowing;

use std::collections::HashSet;

use chrono::NaiveDate;
use dioxus::prelude::*;

use practice_core::model::ActivityId;
use practice_core::week::WeekKey;
use services::sync_service::ProgressStore;

use crate::context::AppContext;
use crate::views::recorder::RecorderPanel;
use crate::vm::{ActivityVm, DayCellVm, week_vm};

use expressions::ExpressionsBody;
use journaling::JournalingBody;
use podcast::PodcastBody;
use prompt::PromptBody;
use shadowing::ShadowingBody;

pub use expressions::SPEED_CHOICES;

#[component]
pub fn ActivityCard(
    activity: ActivityVm,
    week: WeekKey,
    store: Signal<ProgressStore>,
    on_refresh: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);
    let pending = use_signal(HashSet::<NaiveDate>::new);
    let selected_day = use_signal(|| None::<NaiveDate>);
    let show_mp3_form = use_signal(|| false);

    let id = activity.id;
    let has_content = store.read().week_record().has_content(id);
    let days = week_vm(week).days;

    let toggle_sync = ctx.sync();
    let on_toggle = use_callback(move |(day, target): (NaiveDate, bool)| {
        if pending.read().contains(&day) {
            return;
        }
        let sync = toggle_sync.clone();
        let mut pending = pending;
        let mut error = error;
        let mut store = store;
        spawn(async move {
            pending.write().insert(day);
            let ticket = store.write().ticket();
            // Expressions toggles carry the assigned file so the server
            // stores the object-form entry.
            let mp3_file = (id == ActivityId::WeeklyExpressions && target)
                .then(|| store.read().week_record().weekly_expressions.mp3_file.clone())
                .filter(|file| !file.is_empty());
            match sync.toggle_day(id, week, day, target, mp3_file).await {
                Ok(outcome) => {
                    error.set(None);
                    // A refetch can supersede a confirmed toggle mid
                    // flight; reload so the completion still lands.
                    if !store.write().apply_if_current(ticket, outcome) {
                        on_refresh.call(());
                    }
                }
                Err(err) => {
                    // The cell never moved past pending, so dropping the
                    // flag restores its pre-click appearance.
                    error.set(Some(err.message()));
                }
            }
            pending.write().remove(&day);
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ActivityTestHandles>() {
                handles.register(id, on_toggle);
            }
        }
    }

    let regen_sync = ctx.sync();
    let on_regenerate = use_callback(move |()| {
        if busy() {
            return;
        }
        let sync = regen_sync.clone();
        let mut error = error;
        spawn(async move {
            busy.set(true);
            match sync.regenerate(id, week).await {
                // Generation can change several fields at once, so the
                // whole week is re-fetched rather than patched.
                Ok(_) => {
                    error.set(None);
                    on_refresh.call(());
                }
                Err(err) => error.set(Some(err.message())),
            }
            busy.set(false);
        });
    });

    let narration_sync = ctx.sync();
    let on_narration = use_callback(move |()| {
        if busy() {
            return;
        }
        let sync = narration_sync.clone();
        let mut error = error;
        spawn(async move {
            busy.set(true);
            match sync.generate_podcast_narration(week).await {
                Ok(_) => {
                    error.set(None);
                    on_refresh.call(());
                }
                Err(err) => error.set(Some(err.message())),
            }
            busy.set(false);
        });
    });

    rsx! {
        section { class: "activity-card", id: "activity-{id}",
            header { class: "activity-header",
                h3 { "{activity.title}" }
                if let Some(target) = activity.target_length.as_deref() {
                    span { class: "target-length", "{target}" }
                }
                KebabMenu {
                    activity_id: id,
                    has_content,
                    busy: busy(),
                    show_mp3_form,
                    on_regenerate,
                    on_narration,
                }
            }
            if let Some(message) = error.read().as_deref() {
                div { class: "notice error",
                    span { "{message}" }
                    button { class: "dismiss", onclick: move |_| error.set(None), "Dismiss" }
                }
            }
            div { class: "activity-body",
                match id {
                    ActivityId::VoiceJournaling => rsx! {
                        JournalingBody { target_length: activity.target_length.clone() }
                    },
                    ActivityId::WeeklyExpressions => rsx! {
                        ExpressionsBody { week, store, error, show_mp3_form }
                    },
                    ActivityId::ShadowingPractice => rsx! {
                        ShadowingBody { week, store, error, on_refresh }
                    },
                    ActivityId::WeeklySpeakingPrompt => rsx! {
                        PromptBody { week, store }
                    },
                    ActivityId::PodcastShadowing => rsx! {
                        PodcastBody { week, store }
                    },
                }
            }
            DayCells { activity_id: id, days: days.clone(), store, pending, selected_day }
            if let Some(day) = *selected_day.read() {
                DayDetail { activity: activity.clone(), week, day, days, store, pending, on_toggle }
            }
        }
    }
}

/// Seven cells, Sunday through Saturday. A cell shows its confirmed
/// completion state; while a toggle round-trip is in flight it renders
/// as pending and ignores clicks. Clicking a cell opens its detail
/// panel.
#[component]
fn DayCells(
    activity_id: ActivityId,
    days: Vec<DayCellVm>,
    store: Signal<ProgressStore>,
    pending: Signal<HashSet<NaiveDate>>,
    selected_day: Signal<Option<NaiveDate>>,
) -> Element {
    let completed = store.read().completed_days(activity_id);
    rsx! {
        div { class: "day-cells",
            for cell in days {
                {
                    let date = cell.date;
                    let is_pending = pending.read().contains(&date);
                    let is_completed = completed.contains_day(date);
                    let is_selected = *selected_day.read() == Some(date);
                    let mut class = String::from("day-cell");
                    if is_completed { class.push_str(" completed"); }
                    if is_pending { class.push_str(" pending"); }
                    if is_selected { class.push_str(" selected"); }
                    rsx! {
                        button {
                            class: "{class}",
                            disabled: is_pending,
                            onclick: move |_| {
                                let mut selected_day = selected_day;
                                let current = *selected_day.read();
                                selected_day.set(if current == Some(date) { None } else { Some(date) });
                            },
                            "{cell.label}"
                        }
                    }
                }
            }
        }
    }
}

/// Detail panel for one selected day: the completion toggle plus
/// per-activity extras (journaling topic, expressions note) and the
/// recording controls.
#[component]
fn DayDetail(
    activity: ActivityVm,
    week: WeekKey,
    day: NaiveDate,
    days: Vec<DayCellVm>,
    store: Signal<ProgressStore>,
    pending: Signal<HashSet<NaiveDate>>,
    on_toggle: Callback<(NaiveDate, bool)>,
) -> Element {
    let id = activity.id;
    let record = store.read().week_record();
    let is_completed = record.completed_days(id).contains_day(day);
    let is_pending = pending.read().contains(&day);
    let toggle_label = match (is_pending, is_completed) {
        (true, _) => "Saving...",
        (false, true) => "Mark incomplete",
        (false, false) => "Mark complete",
    };
    let day_index = days.iter().position(|cell| cell.date == day);
    let topic = (id == ActivityId::VoiceJournaling)
        .then(|| {
            day_index.and_then(|index| record.voice_journaling.topics.get(index).cloned())
        })
        .flatten();

    rsx! {
        div { class: "day-detail",
            h4 { "{day}" }
            button {
                class: "toggle-complete",
                disabled: is_pending,
                onclick: move |_| on_toggle.call((day, !is_completed)),
                "{toggle_label}"
            }
            if let Some(topic) = topic {
                p { class: "day-topic", "Topic: {topic}" }
            }
            if id == ActivityId::VoiceJournaling && topic_missing(&record.voice_journaling.topics, day_index) {
                p { class: "day-topic empty", "No topic generated for this day yet." }
            }
            if id == ActivityId::WeeklyExpressions {
                expressions::DayNote { week, day, store }
            }
            RecorderPanel { activity_id: id, week, day }
        }
    }
}

fn topic_missing(topics: &[String], day_index: Option<usize>) -> bool {
    day_index.is_none_or(|index| topics.get(index).is_none())
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ActivityTestHandles {
    toggles: std::rc::Rc<
        std::cell::RefCell<std::collections::BTreeMap<ActivityId, Callback<(NaiveDate, bool)>>>,
    >,
}

#[cfg(test)]
impl ActivityTestHandles {
    pub(crate) fn register(&self, activity: ActivityId, toggle: Callback<(NaiveDate, bool)>) {
        self.toggles.borrow_mut().insert(activity, toggle);
    }

    pub(crate) fn toggle(&self, activity: ActivityId) -> Callback<(NaiveDate, bool)> {
        *self
            .toggles
            .borrow()
            .get(&activity)
            .expect("activity toggle registered")
    }
}

/// Options menu. Journaling only gets one once content exists (there
/// is nothing to regenerate before that and day progress would be
/// orphaned); every other activity always shows it, with the first
/// action generating and later ones regenerating.
#[component]
fn KebabMenu(
    activity_id: ActivityId,
    has_content: bool,
    busy: bool,
    show_mp3_form: Signal<bool>,
    on_regenerate: EventHandler<()>,
    on_narration: EventHandler<()>,
) -> Element {
    let mut open = use_signal(|| false);
    if activity_id == ActivityId::VoiceJournaling && !has_content {
        return rsx! {};
    }
    let regen_label = match (busy, has_content) {
        (true, _) => "Working...",
        (false, true) => "Regenerate",
        (false, false) => "Generate",
    };

    rsx! {
        div { class: "kebab",
            button {
                class: "kebab-toggle",
                onclick: move |_| {
                    let current = open();
                    open.set(!current);
                },
                "⋮"
            }
            if open() {
                ul { class: "kebab-menu",
                    li {
                        button {
                            disabled: busy,
                            onclick: move |_| {
                                open.set(false);
                                on_regenerate.call(());
                            },
                            "{regen_label}"
                        }
                    }
                    if activity_id == ActivityId::WeeklyExpressions {
                        li {
                            button {
                                onclick: move |_| {
                                    open.set(false);
                                    let current = show_mp3_form();
                                    let mut show_mp3_form = show_mp3_form;
                                    show_mp3_form.set(!current);
                                },
                                "Change MP3..."
                            }
                        }
                    }
                    if activity_id == ActivityId::PodcastShadowing {
                        li {
                            button {
                                disabled: busy,
                                onclick: move |_| {
                                    open.set(false);
                                    on_narration.call(());
                                },
                                "Generate narration"
                            }
                        }
                    }
                }
            }
        }
    }
}
