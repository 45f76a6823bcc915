//! Site navigation with mobile menu toggle
//!
//! - `.nav_button` toggles `is-nav-open` on `.nav_menu` and locks body scrolling
//! - on desktop, `.nav_wrap` gets `is-scrolled` once the page leaves the top

use leptos::prelude::*;

use crate::ui::icon::{Icon, icons};

/// Widest viewport that still uses the mobile menu
pub const MOBILE_MAX_WIDTH: f64 = 767.0;

/// Scroll offset (2rem) after which the desktop nav is marked as scrolled
pub const SCROLLED_OFFSET: f64 = 32.0;

/// Body class that blocks page scrolling while the mobile menu is open
pub const BODY_LOCK_CLASS: &str = "u-overflow-hidden";

pub fn is_scrolled(scroll_y: f64, viewport_width: f64) -> bool {
    viewport_width > MOBILE_MAX_WIDTH && scroll_y >= SCROLLED_OFFSET
}

#[cfg(not(feature = "ssr"))]
fn lock_body_scroll(locked: bool) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body.class_list().toggle_with_force(BODY_LOCK_CLASS, locked);
    }
}

#[component]
pub fn SiteNav() -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let (scrolled, set_scrolled) = signal(false);

    #[cfg(not(feature = "ssr"))]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        Effect::new(move |_| lock_body_scroll(menu_open.get()));

        Effect::new(move |_| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let update = move || {
                if let Some(window) = web_sys::window() {
                    let scroll_y = window.scroll_y().unwrap_or(0.0);
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|w| w.as_f64())
                        .unwrap_or(0.0);
                    set_scrolled.set(is_scrolled(scroll_y, width));
                }
            };
            update();

            let handler = Closure::<dyn Fn()>::new(update);
            let _ = window.add_event_listener_with_callback("scroll", handler.as_ref().unchecked_ref());
            let _ = window.add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref());
            handler.forget();
        });
    }

    #[cfg(feature = "ssr")]
    let _ = set_scrolled;

    view! {
        <header
            class="nav_wrap fixed top-0 left-0 right-0 z-50 bg-theme-primary/80 backdrop-blur-md border-b border-theme/50"
            class:is-scrolled=move || scrolled.get()
        >
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center justify-between h-16">
                    <a href="/" class="flex items-center gap-3 hover:opacity-80 transition-opacity">
                        <span class="text-xl font-bold text-theme-primary">"Rentals"</span>
                    </a>

                    <button
                        class="nav_button md:hidden p-2 rounded-lg transition-colors"
                        on:click=move |_| set_menu_open.update(|v| *v = !*v)
                        aria-label="Toggle navigation"
                        aria-expanded=move || menu_open.get().to_string()
                    >
                        {move || {
                            if menu_open.get() {
                                view! { <Icon name=icons::X class="w-6 h-6" /> }.into_any()
                            } else {
                                view! { <Icon name=icons::MENU class="w-6 h-6" /> }.into_any()
                            }
                        }}
                    </button>

                    <nav
                        class="nav_menu md:flex items-center gap-6"
                        class:is-nav-open=move || menu_open.get()
                    >
                        <a href="#pricing" class="text-sm font-medium" on:click=move |_| set_menu_open.set(false)>
                            "Pricing"
                        </a>
                        <a href="#compare" class="text-sm font-medium" on:click=move |_| set_menu_open.set(false)>
                            "Compare plans"
                        </a>
                        <a href="#offer" class="text-sm font-medium" on:click=move |_| set_menu_open.set(false)>
                            "Offer"
                        </a>
                    </nav>
                </div>
            </div>
        </header>
    }
}
