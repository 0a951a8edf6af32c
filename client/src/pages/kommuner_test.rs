use mapcore::config::Theme;
use mapcore::consts::DEFAULT_TILE_LAYER_NAME;
use mapcore::geo::{Feature, LatLng};
use serde_json::json;

use super::*;

#[test]
fn map_starts_over_norway_at_zoom_five() {
    let options = map_options();
    assert_eq!(options.center, LatLng::new(65.382_159_705_004_28, 12.796_135_827_352_643));
    assert_eq!(options.clamped_zoom(), 5.0);
}

#[test]
fn layers_config_selects_national_geographic_and_2020() {
    let registry = LayerRegistry::from_config(&layers_config(), Theme::Light).expect("valid config");
    assert_eq!(registry.selected_tile_layer(), Some("National Geographic"));
    assert_eq!(registry.active_layer_groups(), [KOMMUNER_2020.to_owned()]);
}

#[test]
fn layers_config_keeps_declaration_order() {
    let registry = LayerRegistry::from_config(&layers_config(), Theme::Light).expect("valid config");
    let tiles: Vec<&str> = registry.tile_layers().iter().map(|layer| layer.name.as_str()).collect();
    assert_eq!(tiles, [DEFAULT_TILE_LAYER_NAME, "National Geographic", "Satellite"]);
    let groups: Vec<&str> = registry.layer_groups().iter().map(|group| group.name.as_str()).collect();
    assert_eq!(groups, [KOMMUNER_1947, KOMMUNER_2019, KOMMUNER_2020, BYER]);
}

#[test]
fn every_boundary_group_has_a_dataset() {
    let sources = dataset_sources();
    assert_eq!(sources.len(), 3);
    for group in [KOMMUNER_1947, KOMMUNER_2019, KOMMUNER_2020] {
        assert!(sources.iter().any(|source| source.name == group), "{group} has no source");
    }
    assert!(sources.iter().all(|source| source.name != BYER), "cities are declared, not fetched");
}

#[test]
fn page_config_mounts_the_map() {
    let registry = crate::components::map_layers::build_registry(&layers_config(), Theme::Dark);
    assert!(registry.is_ok());
}

#[test]
fn cities_start_hidden_and_cluster_with_a_count() {
    let registry = LayerRegistry::from_config(&layers_config(), Theme::Light).expect("valid config");
    assert!(!registry.is_layer_group_active(BYER));
    assert_eq!(cities().len(), 7);
    assert_eq!(cities()[0], ("Oslo", LatLng::new(59.913_9, 10.752_2)));
    let icon = city_clusters().icon_for(4).expect("count icon");
    assert!(icon.html.contains(">4<"));
}

#[test]
fn country_length_runs_south_to_north() {
    let StaticShape::Polyline { points } = country_length() else {
        panic!("country length is a polyline");
    };
    assert_eq!(points.len(), 2);
    assert!(points[0].lat < points[1].lat);
}

#[test]
fn only_1947_fits_bounds() {
    assert!(feature_config(KOMMUNER_1947).fit_bounds);
    assert!(!feature_config(KOMMUNER_2019).fit_bounds);
    assert!(!feature_config(KOMMUNER_2020).fit_bounds);
}

#[test]
fn oldest_boundaries_use_blue_stroke_and_lighter_fill() {
    let style = feature_config(KOMMUNER_1947).default_style;
    assert_eq!(style.color, "#2563eb");
    assert_eq!(style.fill_color, "#60a5fa");
    assert_eq!(style.fill_opacity, 0.25);
}

#[test]
fn popups_title_by_era_specific_field() {
    let popup_1947 = feature_config(KOMMUNER_1947).popup;
    let popup_2020 = feature_config(KOMMUNER_2020).popup;
    assert_eq!(popup_1947.title_field.as_deref(), Some("Kommune"));
    assert_eq!(popup_2020.title_field.as_deref(), Some("navn"));
    assert_eq!(popup_2020.fields, ["Fylke", "KNR", "Opprettet", "Opphør"]);
}

#[test]
fn popup_skips_missing_end_date() {
    let layer = mapcore::feature_layer::FeatureLayer::new(feature_config(KOMMUNER_1947));
    let feature: Feature = serde_json::from_value(json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [5.32, 60.39] },
        "properties": { "Kommune": "Bergen", "Fylke": "Hordaland", "Opphør": null }
    }))
    .expect("valid feature");
    let html = layer.popup_html(&feature).expect("popup enabled");
    assert!(html.contains("Bergen"));
    assert!(html.contains("Hordaland"));
    assert!(!html.contains("Opphør"));
}

#[test]
fn drawn_summary_pluralises() {
    assert_eq!(drawn_summary(0), "No shapes drawn");
    assert_eq!(drawn_summary(1), "1 shape drawn");
    assert_eq!(drawn_summary(4), "4 shapes drawn");
}
