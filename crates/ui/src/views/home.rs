use dioxus::prelude::*;
use dioxus_router::use_navigator;

use practice_core::week::WeekKey;

use crate::context::AppContext;
use crate::routes::Route;

/// Asks the server which week is current and lands there. When the
/// server is unreachable the week is computed locally in the reference
/// timezone instead, which matches the server's own calendar.
#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let fallback = WeekKey::current(&ctx.clock());

    let sync = ctx.sync();
    let snapshot = use_resource(move || {
        let sync = sync.clone();
        async move { sync.initial_snapshot().await.ok() }
    });

    use_effect(move || {
        let target = match snapshot.value().read().as_ref() {
            Some(Some(initial)) => Some(initial.current_week),
            Some(None) => Some(fallback),
            None => None,
        };
        if let Some(week) = target {
            navigator.replace(Route::Week {
                year: week.year(),
                week: week.week(),
            });
        }
    });

    rsx! {
        div { class: "page",
            p { "Loading {fallback}..." }
        }
    }
}
