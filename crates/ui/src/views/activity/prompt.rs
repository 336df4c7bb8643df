use dioxus::prelude::*;

use practice_core::week::WeekKey;
use services::sync_service::ProgressStore;

use crate::context::AppContext;
use crate::vm::prompt_vm;

/// Main question with a collapsible hints panel and an auto-saving
/// notes textarea.
#[component]
pub fn PromptBody(week: WeekKey, store: Signal<ProgressStore>) -> Element {
    let ctx = use_context::<AppContext>();
    let slice = store.read().week_record().weekly_speaking_prompt.clone();
    let mut hints_open = use_signal(|| false);
    let mut draft = use_signal(|| slice.notes.clone());

    if slice.prompt.is_empty() {
        return rsx! {
            div { class: "prompt-body",
                p { class: "placeholder", "No prompt generated yet." }
            }
        };
    }

    let vm = prompt_vm(&slice.prompt);

    let sync = ctx.sync();
    // Saved on blur; failures stay silent and the draft survives in the
    // textarea.
    let on_blur = move |_| {
        let sync = sync.clone();
        let mut store = store;
        let notes = draft.read().clone();
        spawn(async move {
            let ticket = store.write().ticket();
            if let Some(outcome) = sync.save_prompt_notes_silent(week, notes).await {
                store.write().apply_if_current(ticket, outcome);
            }
        });
    };

    rsx! {
        div { class: "prompt-body",
            p { class: "prompt-main", "{vm.main}" }
            if let Some(hints) = vm.hints {
                button {
                    class: "hints-toggle",
                    onclick: move |_| {
                        let current = hints_open();
                        hints_open.set(!current);
                    },
                    if hints_open() { "Hide hints" } else { "Show hints" }
                }
                if hints_open() {
                    p { class: "prompt-hints", "{hints}" }
                }
            }
            textarea {
                class: "prompt-notes",
                placeholder: "Jot down ideas before you record...",
                value: "{draft}",
                oninput: move |evt| draft.set(evt.value()),
                onblur: on_blur,
            }
        }
    }
}
