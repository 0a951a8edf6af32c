//! Render slots for basemaps and overlay groups.
//!
//! SYSTEM CONTEXT
//! ==============
//! Slots read the shared `LayerRegistry` and render only what it selects:
//! [`TileLayers`] keeps exactly one Leaflet tile layer on the map, and each
//! [`LayerGroupSlot`] mounts its children while its group is active. Nothing
//! here mutates the registry; the layers control does.

#[cfg(test)]
#[path = "layer_slots_test.rs"]
mod layer_slots_test;

use leptos::prelude::*;

use mapcore::layers::{LayerRegistry, TileLayerDescriptor};

use crate::util::map_handle::MapSignal;

/// Whether the rendered basemap must be replaced to show `next`.
///
/// A theme change keeps the name but changes the URL, so whole descriptors
/// are compared.
pub fn needs_swap(current: Option<&TileLayerDescriptor>, next: Option<&TileLayerDescriptor>) -> bool {
    current != next
}

/// The selected basemap.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn TileLayers(map: MapSignal, registry: RwSignal<LayerRegistry>) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use crate::util::leaflet::{MapLayer, describe};

        let rendered = StoredValue::new_local(None::<(TileLayerDescriptor, MapLayer)>);
        Effect::new(move || {
            let Some(handle) = map.get() else {
                return;
            };
            let next = registry.with(|registry| registry.selected_tile_descriptor().cloned());
            let current = rendered.with_value(|rendered| rendered.as_ref().map(|(descriptor, _)| descriptor.clone()));
            if !needs_swap(current.as_ref(), next.as_ref()) {
                return;
            }
            rendered.set_value(None);
            let Some(descriptor) = next else {
                return;
            };
            match MapLayer::tile(&handle.borrow(), &descriptor) {
                Ok(layer) => rendered.set_value(Some((descriptor, layer))),
                Err(err) => leptos::logging::warn!("tile layer {:?}: {}", descriptor.name, describe(&err)),
            }
        });
    }
}

/// Mounts `children` while the named overlay group is active.
#[component]
pub fn LayerGroupSlot(
    #[prop(into)] name: String,
    registry: RwSignal<LayerRegistry>,
    children: ChildrenFn,
) -> impl IntoView {
    if !registry.with_untracked(|registry| registry.has_layer_group(&name)) {
        leptos::logging::warn!("layer group slot {name:?} has no registered group");
    }
    let active = move || registry.with(|registry| registry.is_layer_group_active(&name));

    view! { <Show when=active>{children()}</Show> }
}
