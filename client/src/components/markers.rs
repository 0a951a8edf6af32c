//! Markers and marker cluster groups.
//!
//! SYSTEM CONTEXT
//! ==============
//! A `MarkerClusterGroup` publishes its Leaflet group through a
//! [`ClusterSignal`] that its markers receive as a prop, the same way the
//! map travels as a `MapSignal`. Markers without a cluster go straight onto
//! the map. Each marker is removed again when it unmounts.

use leptos::prelude::*;

use mapcore::geo::LatLng;
use mapcore::markers::{ClusterGroupOptions, MarkerIcon, MarkerOptions};

use crate::components::overlays::{Overlays, Popup, Tooltip};
use crate::util::map_handle::MapSignal;

/// A live cluster group markers can join.
#[derive(Clone)]
pub struct ClusterHandle {
    #[cfg(feature = "hydrate")]
    group: wasm_bindgen::JsValue,
}

/// The cluster group once it is on the map.
pub type ClusterSignal = RwSignal<Option<ClusterHandle>, LocalStorage>;

/// A signal with no cluster group yet.
pub fn cluster_signal() -> ClusterSignal {
    RwSignal::new_local(None)
}

/// Clusters the markers among `children` that are given the same `cluster`.
/// Children mount once the group exists.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn MarkerClusterGroup(
    map: MapSignal,
    cluster: ClusterSignal,
    #[prop(optional)] options: ClusterGroupOptions,
    children: ChildrenFn,
) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use crate::util::leaflet::{ClusterLayer, describe};

        let layer = StoredValue::new_local(None::<ClusterLayer>);
        Effect::new(move || {
            let Some(handle) = map.get() else {
                cluster.set(None);
                layer.set_value(None);
                return;
            };
            if layer.with_value(Option::is_some) {
                return;
            }
            match ClusterLayer::create(&handle.borrow(), &options) {
                Ok(created) => {
                    cluster.set(Some(ClusterHandle { group: created.raw().clone() }));
                    layer.set_value(Some(created));
                }
                Err(err) => leptos::logging::warn!("marker cluster group: {}", describe(&err)),
            }
        });
        on_cleanup(move || {
            cluster.try_set(None);
        });
    }

    let ready = move || cluster.with(Option::is_some);
    view! { <Show when=ready>{children()}</Show> }
}

/// A marker with an HTML icon, on the map or in `cluster`.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn Marker(
    map: MapSignal,
    position: LatLng,
    #[prop(optional)] cluster: Option<ClusterSignal>,
    #[prop(optional)] icon: MarkerIcon,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional)] popup: Option<Popup>,
    #[prop(optional)] tooltip: Option<Tooltip>,
) -> impl IntoView {
    let options = MarkerOptions { icon, title, ..MarkerOptions::at(position) };
    let (overlays, holder) = Overlays::render(popup, tooltip);

    #[cfg(feature = "hydrate")]
    {
        use crate::util::leaflet::{MapLayer, describe};

        let rendered = StoredValue::new_local(None::<MapLayer>);
        Effect::new(move || {
            rendered.set_value(None);
            let Some(handle) = map.get() else {
                return;
            };
            let parent = match cluster {
                Some(cluster) => match cluster.get() {
                    Some(joined) => joined.group,
                    None => return,
                },
                None => handle.borrow().raw().clone(),
            };
            let added = MapLayer::marker(handle.borrow().leaflet(), &parent, &options)
                .and_then(|layer| overlays.bind(layer.raw()).map(|()| layer));
            match added {
                Ok(layer) => rendered.set_value(Some(layer)),
                Err(err) => leptos::logging::warn!("marker at {:?}: {}", options.position, describe(&err)),
            }
        });
    }

    holder
}
