use dioxus::prelude::*;
use dioxus_router::Link;

use practice_core::week::WeekKey;
use services::sync_service::ProgressStore;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::activity::ActivityCard;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SummaryVm, fallback_activities, map_activities, week_vm};

#[component]
pub fn WeekView(year: i32, week: u32) -> Element {
    let ctx = use_context::<AppContext>();
    let key = match WeekKey::new(year, week) {
        Ok(key) => key,
        // Malformed week routes render a dead-end instead of navigating.
        Err(_) => {
            return rsx! {
                div { class: "page",
                    p { class: "notice error", "That week does not exist." }
                    Link { to: Route::Home {}, "Back to this week" }
                }
            };
        }
    };

    let store = use_signal(ProgressStore::default);
    let mut loaded_key = use_signal(|| None::<WeekKey>);

    let sync = ctx.sync();
    let mut week_resource = use_resource(move || {
        let sync = sync.clone();
        let mut store = store;
        async move {
            let snapshot = sync.fetch_week(key).await.map_err(ViewError::from)?;
            store.write().set_week_snapshot(snapshot);
            Ok::<_, ViewError>(())
        }
    });

    // Route changes reuse this component, so re-fetch when the key
    // moves.
    use_effect(move || {
        if *loaded_key.read() != Some(key) {
            loaded_key.set(Some(key));
            week_resource.restart();
        }
    });

    let roadmap_sync = ctx.sync();
    let roadmap_resource = use_resource(move || {
        let sync = roadmap_sync.clone();
        async move { sync.fetch_roadmap().await.ok() }
    });
    let activities = roadmap_resource
        .value()
        .read()
        .as_ref()
        .and_then(Option::as_ref)
        .map_or_else(fallback_activities, map_activities);

    let on_refresh = use_callback(move |()| {
        let mut week_resource = week_resource;
        week_resource.restart();
    });

    let state = view_state_from_resource(&week_resource);
    let vm = week_vm(key);
    let summary = store.read().summary().map(SummaryVm::from);

    rsx! {
        div { class: "page week-page",
            header { class: "week-header",
                Link {
                    class: "week-nav",
                    to: Route::Week { year: vm.prev.year(), week: vm.prev.week() },
                    "< Previous"
                }
                div { class: "week-title",
                    h2 { "{vm.key}" }
                    p { class: "week-range", "{vm.range_label}" }
                }
                Link {
                    class: "week-nav",
                    to: Route::Week { year: vm.next.year(), week: vm.next.week() },
                    "Next >"
                }
            }
            if let Some(summary) = summary {
                p { class: "week-summary", "{summary.label}" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading week..." }
                },
                ViewState::Ready(()) => rsx! {
                    div { class: "activities",
                        for activity in activities {
                            ActivityCard {
                                key: "{activity.id}",
                                activity,
                                week: key,
                                store,
                                on_refresh,
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "notice error",
                        p { "{err.message()}" }
                        button { onclick: move |_| on_refresh.call(()), "Retry" }
                    }
                },
            }
        }
    }
}
