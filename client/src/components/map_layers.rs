//! Layer registry construction for one map.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the `LayerRegistry` from an explicit, ordered configuration in one
//! batch and hands it to the slots and the layers control through the
//! `registry` prop. `MapLayers` wraps the whole map, `MapContainer`
//! included. An invalid configuration is an integration bug: the map never
//! mounts, the engine is not loaded, and a visible error takes its place.

#[cfg(test)]
#[path = "map_layers_test.rs"]
mod map_layers_test;

use leptos::prelude::*;

use mapcore::config::{LayersConfig, Theme};
use mapcore::error::ConfigError;
use mapcore::layers::LayerRegistry;

use crate::util::theme::read_theme;

/// Text shown in place of the layers when the configuration is invalid.
pub fn config_error_message(err: &ConfigError) -> String {
    format!("Map configuration error: {err}")
}

/// The registry for `config`, or the message to show instead of the map.
pub fn build_registry(config: &LayersConfig, theme: Theme) -> Result<LayerRegistry, String> {
    LayerRegistry::from_config(config, theme).map_err(|err| {
        leptos::logging::error!("map layers: {err}");
        config_error_message(&err)
    })
}

/// Validates `config`, publishes the registry and renders `children`, which
/// should be the map container with everything mounted on it.
///
/// `theme` defaults to the page theme at mount time.
#[component]
pub fn MapLayers(
    config: LayersConfig,
    registry: RwSignal<LayerRegistry>,
    #[prop(optional)] theme: Option<Theme>,
    children: Children,
) -> impl IntoView {
    let theme = theme.unwrap_or_else(read_theme);
    match build_registry(&config, theme) {
        Ok(built) => {
            registry.set(built);
            children().into_any()
        }
        Err(message) => view! {
            <div class="map__config-error" role="alert">
                {message}
            </div>
        }
        .into_any(),
    }
}
