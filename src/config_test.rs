#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn bare_tile_spec_resolves_to_default_basemap() {
    let light = TileLayerSpec::default().resolve(Theme::Light);
    assert_eq!(light.name, DEFAULT_TILE_LAYER_NAME);
    assert_eq!(light.url, DEFAULT_TILE_URL);
    assert_eq!(light.attribution, DEFAULT_TILE_ATTRIBUTION);

    let dark = TileLayerSpec::default().resolve(Theme::Dark);
    assert_eq!(dark.url, DEFAULT_DARK_TILE_URL);
    assert_eq!(dark.attribution, DEFAULT_TILE_ATTRIBUTION);
}

#[test]
fn dark_theme_prefers_dark_url_then_light_url() {
    let spec = TileLayerSpec {
        name: Some("Streets".to_owned()),
        url: Some("light-url".to_owned()),
        dark_url: Some("dark-url".to_owned()),
        ..TileLayerSpec::default()
    };
    assert_eq!(spec.resolve(Theme::Dark).url, "dark-url");
    assert_eq!(spec.resolve(Theme::Light).url, "light-url");

    let without_dark = TileLayerSpec { dark_url: None, ..spec };
    assert_eq!(without_dark.resolve(Theme::Dark).url, "light-url");
}

#[test]
fn dark_attribution_only_applies_under_dark_theme() {
    let spec = TileLayerSpec {
        attribution: Some("light".to_owned()),
        dark_attribution: Some("dark".to_owned()),
        ..TileLayerSpec::default()
    };
    assert_eq!(spec.resolve(Theme::Dark).attribution, "dark");
    assert_eq!(spec.resolve(Theme::Light).attribution, "light");
}

#[test]
fn layers_config_parses_camel_case_json() {
    let config = LayersConfig::from_json(
        r#"{
            "defaultTileLayer": "Satellite",
            "defaultLayerGroups": ["Kommuner 2020"],
            "tileLayers": [
                {},
                {"name": "Satellite", "url": "https://sat.example/{z}/{y}/{x}", "attribution": "Esri"}
            ],
            "layerGroups": [{"name": "Kommuner 2020"}, {"name": "Kommuner 1947", "disabled": true}]
        }"#,
    )
    .expect("valid config");
    assert_eq!(config.default_tile_layer.as_deref(), Some("Satellite"));
    assert_eq!(config.tile_layers.len(), 2);
    assert_eq!(config.tile_layers[0], TileLayerSpec::default());
    assert!(config.layer_groups[1].disabled);
    assert!(!config.layer_groups[0].disabled);
}

#[test]
fn empty_layers_config_is_valid() {
    let config = LayersConfig::from_json("{}").expect("valid config");
    assert_eq!(config, LayersConfig::default());
}

#[test]
fn map_options_fill_zoom_defaults() {
    let options: MapOptions =
        serde_json::from_str(r#"{"center": {"lat": 65.38, "lng": 12.79}, "zoom": 5}"#).expect("valid options");
    assert_eq!(options.zoom, 5.0);
    assert_eq!(options.max_zoom, DEFAULT_MAX_ZOOM);
    assert_eq!(options.min_zoom, DEFAULT_MIN_ZOOM);
}

#[test]
fn clamped_zoom_respects_bounds() {
    let mut options = MapOptions::centered(LatLng::new(60.39, 5.32));
    assert_eq!(options.clamped_zoom(), DEFAULT_ZOOM);
    options.zoom = 42.0;
    assert_eq!(options.clamped_zoom(), DEFAULT_MAX_ZOOM);
    options.zoom = -3.0;
    assert_eq!(options.clamped_zoom(), DEFAULT_MIN_ZOOM);
}
