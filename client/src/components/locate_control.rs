//! Locate-me button and live position marker.
//!
//! SYSTEM CONTEXT
//! ==============
//! `LocateController` owns the lifecycle. Each start hands out a token that
//! is captured by that cycle's engine listeners and loading timer, so events
//! from a stopped cycle are discarded by the controller. A cycle's listeners
//! are bound with `LocateController::next_token` before the request is
//! issued. They are dropped together with its timer when the cycle ends or
//! the control unmounts.

#[cfg(test)]
#[path = "locate_control_test.rs"]
mod locate_control_test;

use leptos::prelude::*;

use mapcore::controls::TooltipSide;
use mapcore::error::LocateError;
use mapcore::locate::{LocateController, LocateOptions, LocateState, LocationFound};

use crate::components::control_button::ControlButton;
use crate::util::map_handle::MapSignal;

/// Root class for the control in the given state.
pub fn locate_class(state: LocateState, loading: bool) -> String {
    let mut class = "map-control map-locate-control".to_owned();
    match state {
        LocateState::Idle => {}
        LocateState::Locating => class.push_str(" map-locate-control--locating"),
        LocateState::Tracking => class.push_str(" map-locate-control--tracking"),
    }
    if loading {
        class.push_str(" map-locate-control--loading");
    }
    class
}

/// Geolocation toggle for `map`.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn LocateControl(
    map: MapSignal,
    #[prop(optional)] options: LocateOptions,
    #[prop(optional)] side: TooltipSide,
    #[prop(optional)] on_location_found: Option<Callback<LocationFound>>,
    #[prop(optional)] on_location_error: Option<Callback<LocateError>>,
) -> impl IntoView {
    let mut controller = LocateController::new(options);
    if let Some(callback) = on_location_found {
        controller.set_on_location_found(Box::new(move |found: &LocationFound| callback.run(*found)));
    }
    if let Some(callback) = on_location_error {
        controller.set_on_location_error(Box::new(move |error: &LocateError| callback.run(error.clone())));
    }
    let controller = RwSignal::new_local(controller);

    #[cfg(feature = "hydrate")]
    let on_click = {
        use gloo_timers::callback::Timeout;
        use mapcore::locate::LocateToken;

        use crate::util::leaflet::{Listener, MapLayer, defer, describe, location_error, location_found};
        use crate::util::map_handle::MapHandle;

        struct Cycle {
            _listeners: Vec<Listener>,
            _loading_delay: Timeout,
        }

        type CycleSlot = StoredValue<Option<Cycle>, LocalStorage>;

        /// Listeners and loading timer for the request that `token` will
        /// identify. Leaflet reports a missing geolocation API from inside
        /// `locate()`, so these exist before the request is made.
        fn arm(
            handle: &MapHandle,
            token: LocateToken,
            controller: RwSignal<LocateController, LocalStorage>,
            cycle: CycleSlot,
        ) -> Result<Cycle, wasm_bindgen::JsValue> {
            let map = handle.borrow();
            let found = map.on("locationfound", move |event| {
                defer(move || match location_found(&event) {
                    Ok(found) => {
                        controller.try_update(|controller| {
                            if !controller.on_location_found(token, found) {
                                log::debug!("locate: dropped position from an old request");
                            }
                        });
                    }
                    Err(err) => log::warn!("locate: unreadable locationfound event: {}", describe(&err)),
                });
            })?;
            let source = handle.clone();
            let failed = map.on("locationerror", move |event| {
                let source = source.clone();
                defer(move || {
                    let error = location_error(&event);
                    let accepted = controller
                        .try_update(|controller| controller.on_location_error(token, &error, &mut *source.borrow_mut()));
                    match accepted {
                        Some(true) => {
                            cycle.try_update_value(|cycle| *cycle = None);
                        }
                        Some(false) => log::debug!("locate: dropped error from an old request"),
                        None => {}
                    }
                });
            })?;
            let delay = controller.with_untracked(LocateController::loading_delay_ms);
            let loading_delay = Timeout::new(delay, move || {
                controller.try_update(|controller| controller.on_loading_delay_elapsed(token));
            });
            Ok(Cycle { _listeners: vec![found, failed], _loading_delay: loading_delay })
        }

        let cycle = StoredValue::new_local(None::<Cycle>);
        let marker = StoredValue::new_local(None::<(mapcore::geo::LatLng, MapLayer)>);

        Effect::new(move || {
            let position = controller.with(LocateController::marker_position);
            let Some(handle) = map.get() else {
                marker.set_value(None);
                return;
            };
            let Some(position) = position else {
                marker.set_value(None);
                return;
            };
            if marker.with_value(|marker| marker.as_ref().is_some_and(|(current, _)| *current == position)) {
                return;
            }
            marker.set_value(None);
            match MapLayer::position_marker(&handle.borrow(), position) {
                Ok(layer) => marker.set_value(Some((position, layer))),
                Err(err) => leptos::logging::warn!("locate marker: {}", describe(&err)),
            }
        });

        on_cleanup(move || {
            if let Some(Some(handle)) = map.try_get_untracked() {
                controller.try_update(|controller| controller.teardown(&mut *handle.borrow_mut()));
            }
        });

        move |_| {
            let Some(handle) = map.get_untracked() else {
                return;
            };
            let Some(state) = controller.try_with_untracked(LocateController::state) else {
                return;
            };
            if state == LocateState::Idle {
                let token = controller.with_untracked(LocateController::next_token);
                match arm(&handle, token, controller, cycle) {
                    Ok(armed) => cycle.set_value(Some(armed)),
                    Err(err) => {
                        leptos::logging::error!("locate control: {}", describe(&err));
                        return;
                    }
                }
            }
            let started = controller.try_update(|controller| controller.toggle(&mut *handle.borrow_mut())).flatten();
            if started.is_none() && state != LocateState::Locating {
                cycle.set_value(None);
            }
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let on_click = |_| {};

    let title = Signal::derive(move || controller.with(LocateController::title).to_owned());
    let aria_label = Signal::derive(move || controller.with(LocateController::aria_label).to_owned());
    let active = Signal::derive(move || controller.with(LocateController::state) != LocateState::Idle);
    let loading = move || controller.with(LocateController::is_loading);

    view! {
        <div class=move || locate_class(controller.with(LocateController::state), loading())>
            <ControlButton
                label=title
                aria_label=aria_label
                disabled=Signal::stored(false)
                active=active
                side=side
                on_click=on_click
            >
                <span class="map-locate-control__icon" aria-hidden="true"></span>
                <Show when=loading>
                    <span class="map-locate-control__spinner" aria-hidden="true"></span>
                </Show>
            </ControlButton>
        </div>
    }
}
