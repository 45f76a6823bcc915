//! Sale countdown component
//!
//! Renders `[data-countdown]` slots and ticks them once a second in the browser.

use chrono::{Local, NaiveDateTime};
use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use gloo_timers::callback::Interval;

use crate::core::countdown::{CountdownParts, next_deadline};

/// Countdown slots, in display order, with their unit labels
const SLOTS: [(&str, &str); 4] = [
    ("days", "Days"),
    ("hours", "Hours"),
    ("minutes", "Minutes"),
    ("seconds", "Seconds"),
];

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[component]
pub fn Countdown() -> impl IntoView {
    let now = RwSignal::new(local_now());
    let deadline = next_deadline(now.get_untracked());
    let parts = Memo::new(move |_| CountdownParts::between(now.get(), deadline));

    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            let interval = Interval::new(1000, move || now.set(local_now()));
            // Ticks for the lifetime of the page
            interval.forget();
        });
    }

    view! {
        <div class="countdown_wrap flex items-center justify-center gap-4" aria-live="polite">
            {SLOTS
                .into_iter()
                .map(|(slot, label)| {
                    view! {
                        <div class="countdown_slot flex flex-col items-center">
                            <span class="text-3xl font-bold tabular-nums" data-countdown=slot>
                                {move || parts.get().label(slot).unwrap_or_default()}
                            </span>
                            <span class="text-xs uppercase text-theme-secondary">{label}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
