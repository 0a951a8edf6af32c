//! Popup and tooltip slots for markers and static shapes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Slot content renders into a hidden holder next to the component. Once the
//! owning layer exists, each holder is bound as the layer's popup or tooltip
//! content; Leaflet moves the element into its pane and the view inside
//! stays reactive.

#[cfg(test)]
#[path = "overlays_test.rs"]
mod overlays_test;

use leptos::html::Div;
use leptos::prelude::*;

use mapcore::controls::{TooltipBinding, TooltipSide};

/// Opened by clicking the parent marker or shape.
#[slot]
pub struct Popup {
    #[prop(optional, into)]
    class: String,
    children: ChildrenFn,
}

/// Shown while hovering the parent marker or shape.
#[slot]
pub struct Tooltip {
    #[prop(optional)]
    side: TooltipSide,
    #[prop(optional)]
    side_offset: Option<f64>,
    #[prop(optional, into)]
    class: String,
    children: ChildrenFn,
}

/// Tooltip placement for a slot; the offset falls back to the shared default.
pub fn tooltip_binding(side: TooltipSide, side_offset: Option<f64>, class: &str) -> TooltipBinding {
    let defaults = TooltipBinding::default();
    TooltipBinding {
        side,
        side_offset: side_offset.unwrap_or(defaults.side_offset),
        class_name: class.to_owned(),
    }
}

/// Rendered holders of one layer's popup and tooltip.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub struct Overlays {
    popup: Option<(NodeRef<Div>, String)>,
    tooltip: Option<(NodeRef<Div>, TooltipBinding)>,
}

impl Overlays {
    /// Render the slots into a hidden holder, returned alongside.
    pub fn render(popup: Option<Popup>, tooltip: Option<Tooltip>) -> (Self, AnyView) {
        let (popup, popup_view) = match popup {
            Some(popup) => {
                let node = NodeRef::<Div>::new();
                let view = view! {
                    <div node_ref=node class="map-popup__content">
                        {(popup.children)()}
                    </div>
                };
                (Some((node, popup.class)), Some(view))
            }
            None => (None, None),
        };
        let (tooltip, tooltip_view) = match tooltip {
            Some(tooltip) => {
                let node = NodeRef::<Div>::new();
                let binding = tooltip_binding(tooltip.side, tooltip.side_offset, &tooltip.class);
                let side = binding.side.as_str();
                let arrow = binding.arrow_class();
                let view = view! {
                    <div node_ref=node class="map-tooltip__content" data-side=side>
                        {(tooltip.children)()}
                        <div class=arrow aria-hidden="true"></div>
                    </div>
                };
                (Some((node, binding)), Some(view))
            }
            None => (None, None),
        };
        let holder = view! {
            <div class="map-overlay-holder" hidden>
                {popup_view}
                {tooltip_view}
            </div>
        };
        (Self { popup, tooltip }, holder.into_any())
    }

    /// Bind the holders to `layer`. Reads the node refs, so an effect
    /// calling this runs again once they are mounted.
    #[cfg(feature = "hydrate")]
    pub fn bind(&self, layer: &wasm_bindgen::JsValue) -> Result<(), wasm_bindgen::JsValue> {
        use crate::util::leaflet::{bind_popup, bind_tooltip};

        if let Some((node, class)) = &self.popup {
            if let Some(element) = node.get() {
                bind_popup(layer, &element, class)?;
            }
        }
        if let Some((node, binding)) = &self.tooltip {
            if let Some(element) = node.get() {
                bind_tooltip(layer, &element, binding)?;
            }
        }
        Ok(())
    }
}
