use leptos::prelude::*;

#[component]
pub fn Icon(
    /// Icon name (file name without the .svg extension)
    name: &'static str,
    /// CSS classes for sizing and color
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=name
            draggable=false
        />
    }
}

/// Icons served from `/icons`
pub mod icons {
    pub const CHEVRON_DOWN: &str = "chevron-down";
    pub const CHECK: &str = "check";
    pub const X: &str = "x";
    pub const MENU: &str = "menu";
    pub const ALERT_CIRCLE: &str = "alert-circle";
}
