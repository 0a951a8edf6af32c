//! Shared map control button with a side-anchored tooltip.

#[cfg(test)]
#[path = "control_button_test.rs"]
mod control_button_test;

use leptos::prelude::*;

use mapcore::consts::DEFAULT_TOOLTIP_SIDE_OFFSET;
use mapcore::controls::TooltipSide;

/// Inline CSS variables positioning the tooltip `side_offset` pixels away
/// from the button on `side`.
pub fn tooltip_style(side: TooltipSide, side_offset: f64) -> String {
    let (x, y) = side.offset(side_offset);
    format!("--map-tooltip-x: {x}px; --map-tooltip-y: {y}px;")
}

/// Root class for a control button in the given state.
pub fn button_class(active: bool, disabled: bool) -> String {
    let mut class = "map-control__button".to_owned();
    if active {
        class.push_str(" map-control__button--active");
    }
    if disabled {
        class.push_str(" map-control__button--disabled");
    }
    class
}

/// Icon button used by every map control.
#[component]
pub fn ControlButton<F>(
    label: Signal<String>,
    disabled: Signal<bool>,
    active: Signal<bool>,
    #[prop(optional)] side: TooltipSide,
    #[prop(optional)] side_offset: Option<f64>,
    #[prop(optional)] aria_label: Option<Signal<String>>,
    on_click: F,
    children: Children,
) -> impl IntoView
where
    F: Fn(leptos::ev::MouseEvent) + 'static,
{
    let style = tooltip_style(side, side_offset.unwrap_or(DEFAULT_TOOLTIP_SIDE_OFFSET));

    view! {
        <button
            type="button"
            class=move || button_class(active.get(), disabled.get())
            title=move || label.get()
            aria-label=move || aria_label.unwrap_or(label).get()
            aria-pressed=move || active.get().to_string()
            disabled=move || disabled.get()
            data-tooltip-side=side.as_str()
            style=style
            on:click=on_click
        >
            {children()}
            <span class="map-control__tooltip" role="tooltip">
                {move || label.get()}
            </span>
        </button>
    }
}
