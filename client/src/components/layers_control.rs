//! Basemap and overlay picker.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the `LayersControlModel` derived from the registry: a radio group
//! of basemaps (only with two or more) and a checkbox per overlay group.
//! Changes write straight back to the registry signal; the slots follow.

#[cfg(test)]
#[path = "layers_control_test.rs"]
mod layers_control_test;

use leptos::prelude::*;

use mapcore::consts::{LAYER_GROUPS_LABEL, TILE_LAYERS_LABEL};
use mapcore::layers::{LayerGroupOption, LayerRegistry, LayersControlModel, TileLayerOption};

/// `name` attribute shared by the basemap radio buttons of one control.
pub fn radio_group_name(control_id: &str) -> String {
    format!("{control_id}-tile-layer")
}

/// Dropdown with the layer choices. Hidden when there is nothing to choose.
#[component]
pub fn LayersControl(
    registry: RwSignal<LayerRegistry>,
    #[prop(optional, into)] id: Option<String>,
) -> impl IntoView {
    let group_name = StoredValue::new(radio_group_name(id.as_deref().unwrap_or("map-layers")));
    let model = Memo::new(move |_| registry.with(LayersControlModel::from_registry));

    view! {
        <Show when=move || !model.with(LayersControlModel::is_hidden)>
            <details class="map-layers-control">
                <summary class="map-control__button map-layers-control__trigger" title="Select layers" aria-label="Select layers">
                    <span class="map-layers-control__icon" aria-hidden="true"></span>
                </summary>
                <div class="map-layers-control__menu">
                    <Show when=move || model.with(LayersControlModel::show_tile_layers)>
                        <div class="map-layers-control__section" role="radiogroup" aria-label=TILE_LAYERS_LABEL>
                            <p class="map-layers-control__label">{TILE_LAYERS_LABEL}</p>
                            {move || {
                                model
                                    .get()
                                    .tile_layers
                                    .into_iter()
                                    .map(|option| tile_layer_row(registry, group_name.get_value(), option))
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                    <Show when=move || model.with(LayersControlModel::show_separator)>
                        <hr class="map-layers-control__separator"/>
                    </Show>
                    <Show when=move || model.with(LayersControlModel::show_layer_groups)>
                        <div class="map-layers-control__section">
                            <p class="map-layers-control__label">{LAYER_GROUPS_LABEL}</p>
                            {move || {
                                model
                                    .get()
                                    .layer_groups
                                    .into_iter()
                                    .map(|option| layer_group_row(registry, option))
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                </div>
            </details>
        </Show>
    }
}

fn tile_layer_row(registry: RwSignal<LayerRegistry>, group_name: String, option: TileLayerOption) -> impl IntoView {
    let name = option.name.clone();
    view! {
        <label class="map-layers-control__item">
            <input
                type="radio"
                name=group_name
                value=option.name.clone()
                prop:checked=option.selected
                on:change=move |_| registry.update(|registry| registry.set_selected_tile_layer(&name))
            />
            <span>{option.name}</span>
        </label>
    }
}

fn layer_group_row(registry: RwSignal<LayerRegistry>, option: LayerGroupOption) -> impl IntoView {
    let name = option.name.clone();
    view! {
        <label class="map-layers-control__item" class:map-layers-control__item--disabled=option.disabled>
            <input
                type="checkbox"
                prop:checked=option.checked
                disabled=option.disabled
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    registry.update(|registry| registry.toggle_layer_group(&name, checked));
                }
            />
            <span>{option.name}</span>
        </label>
    }
}
