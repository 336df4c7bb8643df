//! JS snippets run through `document::eval`. Each script is written to
//! be idempotent: re-running it against elements it already wired is a
//! no-op, so effects can fire on every render pass.

/// Wires one audio widget: play/pause toggle, ±5s skip, click-to-seek
/// with a draggable playhead, and the elapsed/total readout. Playback
/// state stays in the audio element itself; this only attaches
/// listeners and pushes the current playback rate.
pub(super) fn audio_player_script(player_id: &str, speed: f64) -> String {
    format!(
        r#"(function() {{
            const root = document.getElementById({player_id:?});
            if (!root) return;
            const audio = document.getElementById({player_id:?} + "-audio");
            if (!audio) return;
            audio.playbackRate = {speed};
            if (root.dataset.wired) return;
            root.dataset.wired = "1";

            const toggle = document.getElementById({player_id:?} + "-toggle");
            const back = document.getElementById({player_id:?} + "-back");
            const fwd = document.getElementById({player_id:?} + "-fwd");
            const bar = document.getElementById({player_id:?} + "-bar");
            const fill = document.getElementById({player_id:?} + "-fill");
            const time = document.getElementById({player_id:?} + "-time");

            const fmt = (secs) => {{
                if (!isFinite(secs)) return "0:00";
                const m = Math.floor(secs / 60);
                const s = String(Math.floor(secs % 60)).padStart(2, "0");
                return m + ":" + s;
            }};
            const sync = () => {{
                if (fill && audio.duration) {{
                    fill.style.width = (audio.currentTime / audio.duration * 100) + "%";
                }}
                if (time) {{
                    time.textContent = fmt(audio.currentTime) + " / " + fmt(audio.duration);
                }}
                if (toggle) {{
                    toggle.textContent = audio.paused ? "Play" : "Pause";
                }}
            }};
            audio.addEventListener("timeupdate", sync);
            audio.addEventListener("loadedmetadata", sync);
            audio.addEventListener("play", sync);
            audio.addEventListener("pause", sync);
            audio.addEventListener("ended", sync);

            if (toggle) toggle.addEventListener("click", () => {{
                if (audio.paused) {{ audio.play(); }} else {{ audio.pause(); }}
            }});
            if (back) back.addEventListener("click", () => {{
                audio.currentTime = Math.max(0, audio.currentTime - 5);
            }});
            if (fwd) fwd.addEventListener("click", () => {{
                audio.currentTime = Math.min(audio.duration || 0, audio.currentTime + 5);
            }});

            if (bar) {{
                const seekTo = (clientX) => {{
                    const rect = bar.getBoundingClientRect();
                    const ratio = Math.min(1, Math.max(0, (clientX - rect.left) / rect.width));
                    if (audio.duration) audio.currentTime = ratio * audio.duration;
                }};
                let dragging = false;
                bar.addEventListener("pointerdown", (evt) => {{
                    dragging = true;
                    bar.setPointerCapture(evt.pointerId);
                    seekTo(evt.clientX);
                }});
                bar.addEventListener("pointermove", (evt) => {{
                    if (dragging) seekTo(evt.clientX);
                }});
                bar.addEventListener("pointerup", (evt) => {{
                    dragging = false;
                    bar.releasePointerCapture(evt.pointerId);
                }});
            }}
            sync();
        }})();"#,
    )
}

/// Pushes a new playback rate to an already-wired player.
pub(super) fn set_playback_rate_script(player_id: &str, speed: f64) -> String {
    format!(
        r#"(function() {{
            const audio = document.getElementById({player_id:?} + "-audio");
            if (audio) audio.playbackRate = {speed};
        }})();"#,
    )
}

/// Runs one capture session: opens the microphone, records until the
/// stop button is clicked, and sends the bytes back base64-encoded.
/// Stream tracks and the duration ticker are torn down in the stop
/// handler no matter how the session ends; a failure sends an
/// "error:"-prefixed message instead of data.
pub(super) fn recorder_script(panel_id: &str) -> String {
    format!(
        r#"(async function() {{
            const label = document.getElementById({panel_id:?} + "-timer");
            const stopBtn = document.getElementById({panel_id:?} + "-stop");
            let stream = null;
            let ticker = null;
            try {{
                stream = await navigator.mediaDevices.getUserMedia({{ audio: true }});
            }} catch (err) {{
                dioxus.send("error:" + err.message);
                return;
            }}
            const recorder = new MediaRecorder(stream);
            const chunks = [];
            let seconds = 0;
            ticker = setInterval(() => {{
                seconds += 1;
                if (label) {{
                    const m = Math.floor(seconds / 60);
                    const s = String(seconds % 60).padStart(2, "0");
                    label.textContent = m + ":" + s;
                }}
            }}, 1000);
            const teardown = () => {{
                if (ticker) {{ clearInterval(ticker); ticker = null; }}
                stream.getTracks().forEach((track) => track.stop());
            }};
            recorder.ondataavailable = (evt) => {{
                if (evt.data.size > 0) chunks.push(evt.data);
            }};
            recorder.onstop = () => {{
                teardown();
                const blob = new Blob(chunks, {{ type: "audio/webm" }});
                const reader = new FileReader();
                reader.onloadend = () => {{
                    const data = reader.result.split(",", 2)[1] || "";
                    dioxus.send(data);
                }};
                reader.onerror = () => dioxus.send("error:could not read recording");
                reader.readAsDataURL(blob);
            }};
            recorder.onerror = () => {{
                teardown();
                dioxus.send("error:recording failed");
            }};
            if (stopBtn) {{
                stopBtn.addEventListener("click", () => {{
                    if (recorder.state !== "inactive") recorder.stop();
                }}, {{ once: true }});
            }}
            recorder.start();
        }})();"#,
    )
}

/// One-line playback for a saved recording, reusing the list entry's
/// hidden audio element.
pub(super) fn play_recording_script(audio_id: &str) -> String {
    format!(
        r#"(function() {{
            const audio = document.getElementById({audio_id:?});
            if (!audio) return;
            if (audio.paused) {{ audio.play(); }} else {{ audio.pause(); }}
        }})();"#,
    )
}
