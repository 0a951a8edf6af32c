//! Map viewport host.
//!
//! SYSTEM CONTEXT
//! ==============
//! Requests the shared engine on first mount, creates the `L.map` instance in
//! its viewport div and publishes it through the [`MapSignal`] prop. Layers
//! and controls are children and stay unmounted until the map exists, so
//! none of them has to handle a half-initialised engine.

#[cfg(test)]
#[path = "map_container_test.rs"]
mod map_container_test;

use leptos::prelude::*;

use mapcore::config::MapOptions;

use crate::util::map_handle::MapSignal;

/// Root class of the container, with caller classes appended.
pub fn container_class(extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() { "map".to_owned() } else { format!("map {extra}") }
}

/// Interactive map with overlay children.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn MapContainer(
    options: MapOptions,
    map: MapSignal,
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let viewport_ref = NodeRef::<leptos::html::Div>::new();
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    {
        use crate::util::engine_loader;
        use crate::util::leaflet::{LeafletMap, describe};
        use crate::util::map_handle::MapHandle;

        let pending = StoredValue::new(None::<mapcore::bridge::ConsumerId>);
        let requested = StoredValue::new(false);
        Effect::new(move || {
            let Some(viewport) = viewport_ref.get() else {
                return;
            };
            if requested.get_value() {
                return;
            }
            requested.set_value(true);
            let options = options.clone();
            let consumer = engine_loader::request_engine(move |result| {
                pending.set_value(None);
                loading.set(false);
                let created = result
                    .map_err(|err| err.to_string())
                    .and_then(|engine| {
                        LeafletMap::create(engine.leaflet.clone(), &viewport, &options).map_err(|err| describe(&err))
                    });
                match created {
                    Ok(instance) => map.set(Some(MapHandle::new(instance))),
                    Err(message) => {
                        leptos::logging::error!("map: {message}");
                        load_error.set(Some(message));
                    }
                }
            });
            pending.set_value(consumer);
        });

        on_cleanup(move || {
            if let Some(consumer) = pending.get_value() {
                engine_loader::abandon(consumer);
            }
            if let Some(Some(handle)) = map.try_get_untracked() {
                handle.borrow().remove();
                map.set(None);
            }
        });
    }

    view! {
        <div class=container_class(&class)>
            <div class="map__viewport" node_ref=viewport_ref></div>
            <Show when=move || loading.get()>
                <div class="map__loading" aria-busy="true">
                    "Loading map..."
                </div>
            </Show>
            {move || {
                load_error
                    .get()
                    .map(|message| {
                        view! {
                            <div class="map__error" role="alert">
                                {message}
                            </div>
                        }
                    })
            }}
            <Show when=move || map.with(Option::is_some)>
                <div class="map__overlay">{children()}</div>
            </Show>
        </div>
    }
}
