use dioxus::prelude::*;

/// Journaling shows only the target-length hint up front; the day's
/// topic is revealed inside the detail panel.
#[component]
pub fn JournalingBody(target_length: Option<String>) -> Element {
    rsx! {
        div { class: "journaling-body",
            if let Some(target) = target_length {
                p { class: "hint", "Record for about {target} each day." }
            } else {
                p { class: "hint", "Record a short entry each day." }
            }
        }
    }
}
