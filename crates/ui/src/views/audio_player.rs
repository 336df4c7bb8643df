use dioxus::document::eval;
use dioxus::prelude::*;

use super::scripts::{audio_player_script, set_playback_rate_script};

/// Shared audio widget. `player_id` must be unique per
/// (week, script-slot, provider) so several players can coexist on the
/// page; all element ids derive from it.
///
/// `speed` is reactive: the persisted value arrives after the first
/// render, and the wiring script re-runs to push it into playbackRate.
#[component]
pub fn AudioPlayer(player_id: String, src: String, speed: ReadOnlySignal<f64>) -> Element {
    let wire_id = player_id.clone();
    use_effect(move || {
        let _ = eval(&audio_player_script(&wire_id, speed()));
    });

    rsx! {
        div { class: "audio-player", id: "{player_id}",
            audio {
                id: "{player_id}-audio",
                src: "{src}",
                preload: "metadata",
            }
            div { class: "player-controls",
                button { id: "{player_id}-back", class: "player-skip", "-5s" }
                button { id: "{player_id}-toggle", class: "player-toggle", "Play" }
                button { id: "{player_id}-fwd", class: "player-skip", "+5s" }
                div { id: "{player_id}-bar", class: "player-bar",
                    div { id: "{player_id}-fill", class: "player-fill" }
                }
                span { id: "{player_id}-time", class: "player-time", "0:00 / 0:00" }
            }
        }
    }
}

/// Discrete speed selector used by the expressions and shadowing
/// players.
#[component]
pub fn SpeedSelector(
    player_id: String,
    current: f64,
    choices: Vec<f64>,
    on_select: EventHandler<f64>,
) -> Element {
    rsx! {
        div { class: "speed-selector",
            for choice in choices {
                button {
                    class: if (choice - current).abs() < f64::EPSILON { "speed-option selected" } else { "speed-option" },
                    onclick: {
                        let player_id = player_id.clone();
                        move |_| {
                            let _ = eval(&set_playback_rate_script(&player_id, choice));
                            on_select.call(choice);
                        }
                    },
                    "{choice}x"
                }
            }
        }
    }
}
