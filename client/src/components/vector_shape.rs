//! Static circles, circle markers, lines, polygons and rectangles.

use leptos::prelude::*;

use mapcore::engine::PathStyle;
use mapcore::shapes::{StaticShape, StaticShapeOptions};

use crate::components::overlays::{Overlays, Popup, Tooltip};
use crate::util::map_handle::MapSignal;

/// `shape` on the map, styled by `class` unless an explicit `style` is given.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn VectorShape(
    map: MapSignal,
    shape: StaticShape,
    #[prop(optional, into)] class: String,
    #[prop(optional)] style: Option<PathStyle>,
    #[prop(optional)] popup: Option<Popup>,
    #[prop(optional)] tooltip: Option<Tooltip>,
) -> impl IntoView {
    let options = StaticShapeOptions { class_name: class, style, ..StaticShapeOptions::new(shape) };
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
            let map = handle.borrow();
            let added = MapLayer::shape(map.leaflet(), map.raw(), &options)
                .and_then(|layer| overlays.bind(layer.raw()).map(|()| layer));
            match added {
                Ok(layer) => rendered.set_value(Some(layer)),
                Err(err) => leptos::logging::warn!("{} shape: {}", options.shape.factory(), describe(&err)),
            }
        });
    }

    holder
}
