use dioxus::prelude::*;
use tracing::warn;

use practice_core::prompt::split_paragraphs;
use practice_core::week::WeekKey;
use services::AudioSource;
use services::sync_service::ProgressStore;

use crate::context::AppContext;
use crate::views::audio_player::AudioPlayer;

/// Episode/chapter heading, a dual-source player (original clip vs the
/// generated narration track), and a transcript panel filled by a
/// follow-up fetch.
#[component]
pub fn PodcastBody(week: WeekKey, store: Signal<ProgressStore>) -> Element {
    let ctx = use_context::<AppContext>();
    let slice = store.read().week_record().podcast_shadowing.clone();
    let mut transcript_open = use_signal(|| false);

    if slice.audio_file.is_empty() {
        return rsx! {
            div { class: "podcast-body",
                p { class: "placeholder", "No podcast chapter assigned yet." }
            }
        };
    }

    // Persisted per week; switching sources survives reloads.
    let prefs = ctx.prefs();
    let source_resource = use_resource(move || {
        let prefs = prefs.clone();
        async move { prefs.podcast_source(week).await.unwrap_or_default() }
    });
    let source_override = use_signal(|| None::<AudioSource>);
    let source = source_override.read().as_ref().copied().unwrap_or_else(|| {
        source_resource
            .value()
            .read()
            .as_ref()
            .copied()
            .unwrap_or_default()
    });
    let has_narration = !slice.typecast_audio_url.is_empty();
    let effective = if has_narration { source } else { AudioSource::Original };

    let prefs_for_switch = ctx.prefs();
    let on_source = move |next: AudioSource| {
        let mut source_override = source_override;
        source_override.set(Some(next));
        let prefs = prefs_for_switch.clone();
        spawn(async move {
            if let Err(err) = prefs.set_podcast_source(week, next).await {
                warn!(%week, "could not persist podcast source: {err}");
            }
        });
    };

    let src = match effective {
        AudioSource::Original => ctx.media_url(&format!("audio/{}", slice.audio_file)),
        AudioSource::Narration => ctx.media_url(&slice.typecast_audio_url),
    };
    // The id embeds the source so switching tracks rewires a fresh
    // element instead of reusing the old one's listeners.
    let player_id = format!("podcast-{week}-{}", effective.as_str());

    let sync = ctx.sync();
    let has_transcript = !slice.transcript_file.is_empty();
    let transcript_resource = use_resource(move || {
        let sync = sync.clone();
        async move {
            if !has_transcript {
                return Ok(String::new());
            }
            sync.fetch_transcript(week).await.map_err(|err| err.message())
        }
    });

    rsx! {
        div { class: "podcast-body",
            p { class: "media-name",
                "{slice.episode_name}"
                if !slice.chapter_name.is_empty() {
                    span { class: "chapter", " · {slice.chapter_name}" }
                }
            }
            if has_narration {
                div { class: "source-switch",
                    button {
                        class: if effective == AudioSource::Original { "source selected" } else { "source" },
                        onclick: {
                            let on_source = on_source.clone();
                            move |_| on_source(AudioSource::Original)
                        },
                        "Original"
                    }
                    button {
                        class: if effective == AudioSource::Narration { "source selected" } else { "source" },
                        onclick: {
                            let on_source = on_source.clone();
                            move |_| on_source(AudioSource::Narration)
                        },
                        "Narration"
                    }
                }
            }
            AudioPlayer { player_id, src, speed: 1.0 }
            if has_transcript {
                button {
                    class: "transcript-toggle",
                    onclick: move |_| {
                        let current = transcript_open();
                        transcript_open.set(!current);
                    },
                    if transcript_open() { "Hide transcript" } else { "Show transcript" }
                }
                if transcript_open() {
                    div { class: "transcript",
                        match transcript_resource.value().read().as_ref() {
                            Some(Ok(text)) => rsx! {
                                for paragraph in split_paragraphs(text) {
                                    p { "{paragraph}" }
                                }
                            },
                            Some(Err(message)) => rsx! {
                                p { class: "notice error", "{message}" }
                            },
                            None => rsx! {
                                p { "Loading transcript..." }
                            },
                        }
                    }
                }
            }
        }
    }
}
