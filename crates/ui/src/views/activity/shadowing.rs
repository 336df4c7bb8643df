use dioxus::prelude::*;
use tracing::warn;

use practice_core::model::{AudioVariant, Provider, ScriptSlot, Voice};
use practice_core::prompt::split_paragraphs;
use practice_core::week::WeekKey;
use services::ScriptAudioRequest;
use services::sync_service::ProgressStore;

use crate::context::AppContext;
use crate::views::audio_player::{AudioPlayer, SpeedSelector};

use super::SPEED_CHOICES;

const GENERATION_SPEEDS: [f32; 5] = [0.8, 0.9, 1.0, 1.1, 1.2];
const DEFAULT_TYPECAST_MODEL: &str = "ssfm-v21";
const DEFAULT_OPENAI_VOICE: &str = "alloy";

/// Two independently tabbed script slots. The selected tab persists
/// per week in local storage only.
#[component]
pub fn ShadowingBody(
    week: WeekKey,
    store: Signal<ProgressStore>,
    error: Signal<Option<String>>,
    on_refresh: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();

    let prefs = ctx.prefs();
    let tab_resource = use_resource(move || {
        let prefs = prefs.clone();
        async move { prefs.script_tab(week).await.unwrap_or(ScriptSlot::One) }
    });
    let tab_override = use_signal(|| None::<ScriptSlot>);
    let selected = tab_override.read().as_ref().copied().unwrap_or_else(|| {
        tab_resource
            .value()
            .read()
            .as_ref()
            .copied()
            .unwrap_or(ScriptSlot::One)
    });

    let prefs_for_tab = ctx.prefs();
    let on_tab = move |slot: ScriptSlot| {
        let mut tab_override = tab_override;
        tab_override.set(Some(slot));
        let prefs = prefs_for_tab.clone();
        spawn(async move {
            if let Err(err) = prefs.set_script_tab(week, slot).await {
                warn!(%week, "could not persist script tab: {err}");
            }
        });
    };

    rsx! {
        div { class: "shadowing-body",
            div { class: "script-tabs",
                for slot in ScriptSlot::ALL {
                    button {
                        class: if slot == selected { "script-tab selected" } else { "script-tab" },
                        onclick: {
                            let on_tab = on_tab.clone();
                            move |_| on_tab(slot)
                        },
                        "Script {slot.number()}"
                    }
                }
            }
            SlotPanel { week, slot: selected, store, error, on_refresh }
        }
    }
}

#[component]
fn SlotPanel(
    week: WeekKey,
    slot: ScriptSlot,
    store: Signal<ProgressStore>,
    error: Signal<Option<String>>,
    on_refresh: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let slice = store.read().week_record().shadowing_practice.clone();
    let script = slice.slot_script(slot).to_string();
    let audio = slice.slot_audio(slot).clone();
    let mut regen_open = use_signal(|| false);

    let prefs = ctx.prefs();
    let speed_resource = use_resource(move || {
        let prefs = prefs.clone();
        async move {
            prefs.slot_playback_speed(week, slot).await.unwrap_or(1.0)
        }
    });
    let speed = speed_resource.value().read().as_ref().copied().unwrap_or(1.0);
    let prefs_for_speed = ctx.prefs();
    let on_speed = move |choice: f64| {
        let prefs = prefs_for_speed.clone();
        let mut speed_resource = speed_resource;
        spawn(async move {
            if let Err(err) = prefs.set_slot_playback_speed(week, slot, choice).await {
                warn!(%week, "could not persist slot playback speed: {err}");
            }
            speed_resource.restart();
        });
    };

    if script.is_empty() {
        return rsx! {
            div { class: "slot-panel",
                p { class: "placeholder", "No script yet. Use the menu to generate this week's scripts." }
            }
        };
    }

    rsx! {
        div { class: "slot-panel",
            div { class: "script-text",
                for paragraph in split_paragraphs(&script) {
                    p { "{paragraph}" }
                }
            }
            if audio.is_empty() {
                GenerationForm { week, slot, existing: None, error, on_refresh }
            } else {
                for (provider, variant) in audio.clone() {
                    {
                        let player_id = format!("shadow-{week}-s{}-{provider}", slot.number());
                        let src = ctx.media_url(&variant.url);
                        rsx! {
                            div { class: "slot-audio",
                                p { class: "audio-meta",
                                    "{variant.voice_name} · {variant.model} · {variant.speed}x"
                                }
                                AudioPlayer { player_id: player_id.clone(), src: src.clone(), speed }
                                SpeedSelector {
                                    player_id,
                                    current: speed,
                                    choices: SPEED_CHOICES.to_vec(),
                                    on_select: on_speed.clone(),
                                }
                                a { class: "download", href: "{src}", download: true, "Download" }
                            }
                        }
                    }
                }
                button {
                    class: "regen-toggle",
                    onclick: move |_| {
                        let current = regen_open();
                        regen_open.set(!current);
                    },
                    if regen_open() { "Close" } else { "Regenerate audio..." }
                }
                if regen_open() {
                    GenerationForm {
                        week,
                        slot,
                        existing: audio.get(&Provider::Typecast).or_else(|| audio.get(&Provider::Openai)).cloned(),
                        error,
                        on_refresh,
                    }
                }
            }
        }
    }
}

/// Voice/model/speed pickers plus the submit button. Controls are
/// disabled for the whole round trip; on success the week is
/// re-fetched because generation rewrites several fields at once.
#[component]
fn GenerationForm(
    week: WeekKey,
    slot: ScriptSlot,
    existing: Option<AudioVariant>,
    error: Signal<Option<String>>,
    on_refresh: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let mut busy = use_signal(|| false);
    let mut provider = use_signal(|| Provider::Typecast);
    let mut voice_id = use_signal(|| existing.as_ref().map(|v| v.voice_id.clone()).unwrap_or_default());
    let mut model = use_signal(|| {
        existing
            .as_ref()
            .map(|v| v.model.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_TYPECAST_MODEL.to_string())
    });
    let mut speed = use_signal(|| existing.as_ref().map_or(1.0_f32, |v| v.speed));

    let voices_service = ctx.voices();
    let voices_resource = use_resource(move || {
        let voices = voices_service.clone();
        async move { voices.voices().await.unwrap_or_default() }
    });
    let voices: Vec<Voice> = voices_resource
        .value()
        .read()
        .as_ref()
        .cloned()
        .unwrap_or_default();
    // First catalog entry is the default selection until the user picks.
    let effective_voice = {
        let chosen = voice_id.read().clone();
        if chosen.is_empty() {
            voices.first().map(|v| v.voice_id.clone()).unwrap_or_default()
        } else {
            chosen
        }
    };

    let sync = ctx.sync();
    let submit_voice = effective_voice.clone();
    let on_submit = move |_| {
        if busy() {
            return;
        }
        let sync = sync.clone();
        let mut error = error;
        let request = ScriptAudioRequest {
            week_key: week,
            script_num: slot.number(),
            voice_id: submit_voice.clone(),
            typecast_model: model.read().clone(),
            openai_voice: DEFAULT_OPENAI_VOICE.to_string(),
            typecast_speed: speed(),
            openai_speed: speed(),
            source_type: provider(),
        };
        spawn(async move {
            busy.set(true);
            match sync.generate_script_audio(request).await {
                Ok(_) => {
                    error.set(None);
                    on_refresh.call(());
                }
                Err(err) => error.set(Some(err.message())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "generation-form",
            select {
                class: "provider-select",
                disabled: busy(),
                onchange: move |evt| {
                    provider.set(match evt.value().as_str() {
                        "openai" => Provider::Openai,
                        _ => Provider::Typecast,
                    });
                },
                option { value: "typecast", selected: provider() == Provider::Typecast, "Typecast" }
                option { value: "openai", selected: provider() == Provider::Openai, "OpenAI (legacy)" }
            }
            select {
                class: "voice-select",
                disabled: busy(),
                onchange: move |evt| voice_id.set(evt.value()),
                for voice in voices {
                    option {
                        value: "{voice.voice_id}",
                        selected: voice.voice_id == effective_voice,
                        "{voice.name}"
                    }
                }
            }
            input {
                class: "model-input",
                r#type: "text",
                disabled: busy(),
                value: "{model}",
                oninput: move |evt| model.set(evt.value()),
            }
            select {
                class: "gen-speed-select",
                disabled: busy(),
                onchange: move |evt| {
                    if let Ok(value) = evt.value().parse::<f32>() {
                        speed.set(value);
                    }
                },
                for choice in GENERATION_SPEEDS {
                    option { value: "{choice}", selected: (choice - speed()).abs() < f32::EPSILON, "{choice}x" }
                }
            }
            button {
                class: "generate",
                disabled: busy(),
                onclick: on_submit,
                if busy() { "Generating..." } else { "Generate" }
            }
        }
    }
}
