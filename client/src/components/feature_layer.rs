//! Selectable vector feature layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders a feature collection on the map and routes clicks into the
//! layer's `mapcore::feature_layer::FeatureLayer`, which owns selection,
//! popup content and the fit-once-per-dataset rule. A new collection
//! reference replaces every rendered shape.

use std::rc::Rc;

use leptos::prelude::*;

use mapcore::feature_layer::{FeatureLayer, FeatureLayerConfig};
use mapcore::geo::FeatureCollection;

use crate::util::map_handle::MapSignal;

/// Local signal carrying a shared feature collection.
pub type FeatureData = Signal<Option<Rc<FeatureCollection>>, LocalStorage>;

/// Vector layer for `data`. Renders nothing until data arrives.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn GeoJsonLayer(map: MapSignal, data: FeatureData, config: FeatureLayerConfig) -> impl IntoView {
    let layer = StoredValue::new_local(FeatureLayer::new(config));

    #[cfg(feature = "hydrate")]
    {
        use mapcore::engine::ShapeId;

        use crate::util::leaflet::{FeatureShapes, describe};

        let shapes = StoredValue::new_local(None::<FeatureShapes>);
        let on_click = move |id: ShapeId| {
            shapes.update_value(|shapes| {
                if let Some(shapes) = shapes.as_mut() {
                    layer.update_value(|layer| {
                        layer.on_click(id, shapes);
                    });
                }
            });
        };
        let on_double_click = move |_: ShapeId| {
            shapes.update_value(|shapes| {
                if let Some(shapes) = shapes.as_mut() {
                    layer.update_value(|layer| {
                        layer.on_double_click(shapes);
                    });
                }
            });
        };

        Effect::new(move || {
            let Some(handle) = map.get() else {
                return;
            };
            let Some(collection) = data.get() else {
                shapes.set_value(None);
                return;
            };
            let is_new = layer.with_value(|layer| {
                layer.data().is_none_or(|current| !Rc::ptr_eq(current, &collection))
            });
            layer.update_value(|layer| {
                layer.set_data(Rc::clone(&collection), &mut *handle.borrow_mut());
            });
            if !is_new && shapes.with_value(Option::is_some) {
                return;
            }
            shapes.set_value(None);
            let rendered = layer.with_value(|layer| {
                FeatureShapes::render(
                    &handle.borrow(),
                    &collection,
                    |id| layer.style_for(id).clone(),
                    |index| collection.features.get(index).and_then(|feature| layer.popup_html(feature)),
                    on_click,
                    on_double_click,
                )
            });
            match rendered {
                Ok(rendered) => shapes.set_value(Some(rendered)),
                Err(err) => leptos::logging::warn!("feature layer: {}", describe(&err)),
            }
        });
    }
}
