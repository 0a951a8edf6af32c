//! Zoom in / zoom out buttons.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the engine's zoom range in a `ZoomControlModel`, refreshed on
//! every `zoomend`, and disables each button at its end of the range.

use leptos::prelude::*;

use mapcore::controls::ZoomControlModel;

use crate::components::control_button::ControlButton;
use crate::util::map_handle::MapSignal;

/// Zoom buttons for `map`.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn ZoomControl(map: MapSignal) -> impl IntoView {
    let model = RwSignal::new(None::<ZoomControlModel>);

    #[cfg(feature = "hydrate")]
    {
        use crate::util::leaflet::{Listener, defer, describe};

        let listener = StoredValue::new_local(None::<Listener>);
        Effect::new(move || {
            let Some(handle) = map.get() else {
                listener.set_value(None);
                return;
            };
            model.set(Some(ZoomControlModel::from_view(&*handle.borrow())));
            let source = handle.clone();
            let bound = handle.borrow().on("zoomend", move |_| {
                let source = source.clone();
                defer(move || {
                    model.update(|model| {
                        if let Some(model) = model.as_mut() {
                            model.on_zoom_end(&*source.borrow());
                        }
                    });
                });
            });
            match bound {
                Ok(bound) => listener.set_value(Some(bound)),
                Err(err) => leptos::logging::warn!("zoom control: {}", describe(&err)),
            }
        });
    }

    let zoom = move |zoom_in: bool| {
        #[cfg(feature = "hydrate")]
        {
            let (Some(handle), Some(model)) = (map.get_untracked(), model.get_untracked()) else {
                return;
            };
            let mut view = handle.borrow_mut();
            let moved = if zoom_in { model.zoom_in(&mut *view) } else { model.zoom_out(&mut *view) };
            if !moved {
                leptos::logging::warn!("zoom control: already at the limit");
            }
        }
    };
    let zoom_in_disabled = Signal::derive(move || !model.with(|model| model.is_some_and(|m| m.can_zoom_in())));
    let zoom_out_disabled = Signal::derive(move || !model.with(|model| model.is_some_and(|m| m.can_zoom_out())));

    view! {
        <div class="map-control map-zoom-control" role="group" aria-label="Zoom">
            <ControlButton
                label=Signal::stored("Zoom in".to_owned())
                disabled=zoom_in_disabled
                active=Signal::stored(false)
                on_click=move |_| zoom(true)
            >
                <span aria-hidden="true">"+"</span>
            </ControlButton>
            <ControlButton
                label=Signal::stored("Zoom out".to_owned())
                disabled=zoom_out_disabled
                active=Signal::stored(false)
                on_click=move |_| zoom(false)
            >
                <span aria-hidden="true">"−"</span>
            </ControlButton>
        </div>
    }
}
