use base64::Engine as _;
use chrono::NaiveDate;
use dioxus::document::eval;
use dioxus::prelude::*;

use practice_core::model::ActivityId;
use practice_core::week::WeekKey;
use services::RecordingInfo;

use crate::context::AppContext;
use crate::views::scripts::{play_recording_script, recorder_script};

/// Recording controls for one activity day: capture, upload, and the
/// list of saved takes.
///
/// The capture session itself lives in a single JS script that opens
/// the microphone, ticks the duration label, and hands the bytes back
/// base64-encoded when the stop button fires. The script stops the
/// stream tracks and clears its ticker in the stop path, success or
/// not.
#[component]
pub fn RecorderPanel(activity_id: ActivityId, week: WeekKey, day: NaiveDate) -> Element {
    let ctx = use_context::<AppContext>();
    let mut recording = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let panel_id = format!("rec-{activity_id}-{week}-{day}");

    let recordings = ctx.recordings();
    let list_resource = use_resource(move || {
        let recordings = recordings.clone();
        async move {
            recordings
                .list(activity_id, week, Some(day))
                .await
                .unwrap_or_default()
        }
    });

    let recordings_for_capture = ctx.recordings();
    let capture_panel_id = panel_id.clone();
    let on_record = move |_| {
        if recording() {
            return;
        }
        recording.set(true);
        let recordings = recordings_for_capture.clone();
        let panel_id = capture_panel_id.clone();
        let mut list_resource = list_resource;
        let mut error = error;
        spawn(async move {
            let mut session = eval(&recorder_script(&panel_id));
            match session.recv::<String>().await {
                Ok(payload) if payload.starts_with("error:") => {
                    error.set(Some(payload.trim_start_matches("error:").to_string()));
                }
                Ok(payload) => {
                    match base64::engine::general_purpose::STANDARD.decode(payload.as_bytes()) {
                        Ok(bytes) if !bytes.is_empty() => {
                            match recordings
                                .save(activity_id, week, day, bytes, "audio/webm".into())
                                .await
                            {
                                Ok(_) => {
                                    error.set(None);
                                    list_resource.restart();
                                }
                                Err(err) => error.set(Some(err.message())),
                            }
                        }
                        Ok(_) => error.set(Some("Recording was empty".into())),
                        Err(_) => error.set(Some("Could not read recording data".into())),
                    }
                }
                Err(_) => error.set(Some("Recording session ended unexpectedly".into())),
            }
            recording.set(false);
        });
    };

    let recordings_for_delete = ctx.recordings();
    let on_delete = use_callback(move |filename: String| {
        let recordings = recordings_for_delete.clone();
        let mut list_resource = list_resource;
        let mut error = error;
        spawn(async move {
            match recordings.delete(activity_id, week, filename).await {
                Ok(()) => {
                    error.set(None);
                    list_resource.restart();
                }
                Err(err) => error.set(Some(err.message())),
            }
        });
    });

    let saved: Vec<RecordingInfo> = list_resource
        .value()
        .read()
        .as_ref()
        .cloned()
        .unwrap_or_default();

    rsx! {
        div { class: "recorder", id: "{panel_id}",
            if let Some(message) = error.read().as_deref() {
                p { class: "notice error", "{message}" }
            }
            div { class: "recorder-controls",
                if recording() {
                    span { id: "{panel_id}-timer", class: "recorder-timer", "0:00" }
                    button { id: "{panel_id}-stop", class: "recorder-stop", "Stop" }
                } else {
                    button { class: "recorder-start", onclick: on_record, "Record" }
                }
            }
            if !saved.is_empty() {
                ul { class: "recording-list",
                    for info in saved {
                        RecordingRow { info, panel_id: panel_id.clone(), on_delete }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordingRow(info: RecordingInfo, panel_id: String, on_delete: Callback<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let src = ctx.media_url(&info.url);
    let audio_id = format!("{panel_id}-{}", info.filename);
    let play_id = audio_id.clone();
    let filename = info.filename.clone();

    rsx! {
        li { class: "recording-row",
            audio { id: "{audio_id}", src: "{src}", preload: "none" }
            span { class: "recording-name", "{info.filename}" }
            button {
                class: "recording-play",
                onclick: move |_| {
                    let _ = eval(&play_recording_script(&play_id));
                },
                "Play"
            }
            button {
                class: "recording-delete",
                onclick: move |_| on_delete.call(filename.clone()),
                "Delete"
            }
        }
    }
}
