use super::*;

use mapcore::config::TileLayerSpec;

#[test]
fn config_error_message_names_the_bad_default() {
    let err = ConfigError::UnknownDefaultTileLayer("Satelite".to_owned());
    let message = config_error_message(&err);
    assert!(message.starts_with("Map configuration error: "));
    assert!(message.contains("\"Satelite\""));
}

#[test]
fn config_error_message_lists_unknown_groups() {
    let err = ConfigError::UnknownDefaultLayerGroups(vec!["Kommuner 2021".to_owned()]);
    assert!(config_error_message(&err).contains("Kommuner 2021"));
}

#[test]
fn misspelled_default_refuses_to_build_the_map() {
    let config = LayersConfig {
        default_tile_layer: Some("Satelite".to_owned()),
        tile_layers: vec![TileLayerSpec::new("Satellite", "https://tile/{z}/{x}/{y}.png", "")],
        ..LayersConfig::default()
    };
    let message = build_registry(&config, Theme::Light).expect_err("invalid default");
    assert_eq!(message, config_error_message(&ConfigError::UnknownDefaultTileLayer("Satelite".to_owned())));
}

#[test]
fn valid_config_builds_with_declared_default() {
    let config = LayersConfig {
        default_tile_layer: Some("Satellite".to_owned()),
        tile_layers: vec![
            TileLayerSpec::new("OSM", "https://osm/{z}/{x}/{y}.png", ""),
            TileLayerSpec::new("Satellite", "https://tile/{z}/{x}/{y}.png", ""),
        ],
        ..LayersConfig::default()
    };
    let registry = build_registry(&config, Theme::Light).expect("valid config");
    assert_eq!(registry.selected_tile_layer(), Some("Satellite"));
}
