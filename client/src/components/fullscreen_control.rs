//! Fullscreen toggle.
//!
//! Clicks ask the engine to toggle; the button state only changes when the
//! engine reports `enterFullscreen` or `exitFullscreen`.

use leptos::prelude::*;

use mapcore::controls::{FullscreenState, TooltipSide};

use crate::components::control_button::ControlButton;
use crate::util::map_handle::MapSignal;

#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn FullscreenControl(map: MapSignal, #[prop(optional)] side: TooltipSide) -> impl IntoView {
    let state = RwSignal::new(FullscreenState::default());

    #[cfg(feature = "hydrate")]
    {
        use crate::util::leaflet::{Listener, defer, describe};

        let listeners = StoredValue::new_local(Vec::<Listener>::new());
        Effect::new(move || {
            listeners.set_value(Vec::new());
            let Some(handle) = map.get() else {
                return;
            };
            let map = handle.borrow();
            let bound = map
                .on("enterFullscreen", move |_| defer(move || state.update(FullscreenState::on_enter)))
                .and_then(|enter| {
                    let exit = map.on("exitFullscreen", move |_| defer(move || state.update(FullscreenState::on_exit)))?;
                    Ok(vec![enter, exit])
                });
            match bound {
                Ok(bound) => listeners.set_value(bound),
                Err(err) => leptos::logging::warn!("fullscreen control: {}", describe(&err)),
            }
        });
    }

    let on_click = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use mapcore::engine::MapView;

            if let Some(handle) = map.get_untracked() {
                handle.borrow_mut().toggle_fullscreen();
            }
        }
    };

    view! {
        <div class="map-control map-fullscreen-control">
            <ControlButton
                label=Signal::derive(move || state.get().label().to_owned())
                disabled=Signal::stored(false)
                active=Signal::derive(move || state.get().is_fullscreen())
                side=side
                on_click=on_click
            >
                <span class="map-fullscreen-control__icon" aria-hidden="true"></span>
            </ControlButton>
        </div>
    }
}
