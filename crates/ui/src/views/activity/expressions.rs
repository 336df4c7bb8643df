use chrono::NaiveDate;
use dioxus::prelude::*;
use tracing::warn;

use practice_core::week::WeekKey;
use services::sync_service::ProgressStore;

use crate::context::AppContext;
use crate::views::audio_player::{AudioPlayer, SpeedSelector};

pub const SPEED_CHOICES: [f64; 4] = [1.0, 1.2, 1.4, 1.6];

/// Assigned audio file with the shared player and a discrete speed
/// selector, or a placeholder until the server assigns one.
#[component]
pub fn ExpressionsBody(
    week: WeekKey,
    store: Signal<ProgressStore>,
    error: Signal<Option<String>>,
    show_mp3_form: Signal<bool>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let mp3_file = store.read().week_record().weekly_expressions.mp3_file.clone();
    let player_id = format!("expr-{week}");

    let prefs = ctx.prefs();
    let speed_resource = use_resource(move || {
        let prefs = prefs.clone();
        async move { prefs.playback_speed(week).await.unwrap_or(1.0) }
    });
    let speed = speed_resource.value().read().as_ref().copied().unwrap_or(1.0);

    let prefs_for_select = ctx.prefs();
    let on_speed = move |choice: f64| {
        let prefs = prefs_for_select.clone();
        let mut speed_resource = speed_resource;
        spawn(async move {
            if let Err(err) = prefs.set_playback_speed(week, choice).await {
                warn!(%week, "could not persist playback speed: {err}");
            }
            speed_resource.restart();
        });
    };

    rsx! {
        div { class: "expressions-body",
            if mp3_file.is_empty() {
                p { class: "placeholder", "No expressions audio assigned yet." }
            } else {
                p { class: "media-name", "{mp3_file}" }
                AudioPlayer {
                    player_id: player_id.clone(),
                    src: ctx.media_url(&format!("audio/{mp3_file}")),
                    speed,
                }
                SpeedSelector {
                    player_id,
                    current: speed,
                    choices: SPEED_CHOICES.to_vec(),
                    on_select: on_speed,
                }
            }
            if show_mp3_form() {
                Mp3Form { week, store, error, show_mp3_form }
            }
        }
    }
}

/// Inline reassignment form opened from the options menu.
#[component]
fn Mp3Form(
    week: WeekKey,
    store: Signal<ProgressStore>,
    error: Signal<Option<String>>,
    show_mp3_form: Signal<bool>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let mut filename = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let sync = ctx.sync();
    let on_save = move |_| {
        if saving() || filename.read().trim().is_empty() {
            return;
        }
        let sync = sync.clone();
        let mut error = error;
        let mut store = store;
        let mut show_mp3_form = show_mp3_form;
        let file = filename.read().trim().to_string();
        spawn(async move {
            saving.set(true);
            let ticket = store.write().ticket();
            match sync.select_expressions_mp3(week, file).await {
                Ok(outcome) => {
                    error.set(None);
                    store.write().apply_if_current(ticket, outcome);
                    show_mp3_form.set(false);
                }
                Err(err) => error.set(Some(err.message())),
            }
            saving.set(false);
        });
    };

    rsx! {
        div { class: "mp3-form",
            input {
                r#type: "text",
                placeholder: "expressions file, e.g. chapter_03.mp3",
                value: "{filename}",
                oninput: move |evt| filename.set(evt.value()),
            }
            button {
                disabled: saving(),
                onclick: on_save,
                if saving() { "Saving..." } else { "Use this file" }
            }
        }
    }
}

/// Per-day free-text note, saved when the textarea loses focus. A
/// failed save keeps the draft in place and is only logged.
#[component]
pub fn DayNote(week: WeekKey, day: NaiveDate, store: Signal<ProgressStore>) -> Element {
    let ctx = use_context::<AppContext>();
    let saved = store
        .read()
        .week_record()
        .weekly_expressions
        .notes
        .get(&day)
        .cloned()
        .unwrap_or_default();
    let mut draft = use_signal(|| saved.clone());

    let sync = ctx.sync();
    let on_blur = move |_| {
        let sync = sync.clone();
        let mut store = store;
        let note = draft.read().clone();
        spawn(async move {
            let ticket = store.write().ticket();
            match sync.save_expression_note(week, day, note).await {
                Ok(outcome) => {
                    store.write().apply_if_current(ticket, outcome);
                }
                Err(err) => warn!(%week, %day, "expression note save failed: {}", err.message()),
            }
        });
    };

    rsx! {
        textarea {
            class: "day-note",
            placeholder: "Notes for this day...",
            value: "{draft}",
            oninput: move |evt| draft.set(evt.value()),
            onblur: on_blur,
        }
    }
}
