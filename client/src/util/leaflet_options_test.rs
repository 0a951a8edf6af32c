use super::*;

use mapcore::config::TileLayerSpec;
use mapcore::config::Theme;
use mapcore::controls::TooltipSide;
use mapcore::engine::PathStyle;

#[test]
fn map_options_clamp_zoom_and_drop_default_zoom_control() {
    let mut options = MapOptions::centered(LatLng::new(65.382, 12.796));
    options.zoom = 30.0;
    let value = map_options(&options);
    assert_eq!(value["center"], json!([65.382, 12.796]));
    assert_eq!(value["zoom"], json!(18.0));
    assert_eq!(value["zoomControl"], json!(false));
}

#[test]
fn tile_layer_options_carry_attribution() {
    let descriptor = TileLayerSpec::new("OSM", "https://tile/{z}/{x}/{y}.png", "&copy; OSM").resolve(Theme::Light);
    assert_eq!(tile_layer_options(&descriptor), json!({ "attribution": "&copy; OSM" }));
}

#[test]
fn bounds_are_south_west_then_north_east() {
    let mut b = LatLngBounds::from_point(LatLng::new(58.0, 5.0));
    b.extend(LatLng::new(71.0, 31.0));
    assert_eq!(bounds(&b), json!([[58.0, 5.0], [71.0, 31.0]]));
}

#[test]
fn fit_bounds_options_skip_unset_fields() {
    assert_eq!(fit_bounds_options(&FitBoundsOptions::default()), json!({}));
    let options = FitBoundsOptions { padding: Some((20.0, 20.0)), max_zoom: Some(10.0) };
    assert_eq!(fit_bounds_options(&options), json!({ "padding": [20.0, 20.0], "maxZoom": 10.0 }));
}

#[test]
fn locate_options_only_cap_zoom_when_set() {
    let value = locate_options(&LocateOptions::default());
    assert_eq!(value, json!({ "watch": false, "setView": true }));

    let watching = LocateOptions { watch: true, set_view: false, max_zoom: Some(16.0) };
    assert_eq!(locate_options(&watching)["maxZoom"], json!(16.0));
}

#[test]
fn draw_options_only_include_the_measurement_of_the_shape() {
    let options = DrawOptions { show_length: true, show_area: true, ..DrawOptions::default() };
    let polyline = draw_options(DrawShape::Polyline, &options);
    assert_eq!(polyline["showLength"], json!(true));
    assert!(polyline.get("showArea").is_none());

    let polygon = draw_options(DrawShape::Polygon, &options);
    assert_eq!(polygon["showArea"], json!(true));
    assert_eq!(polygon["drawError"]["color"], json!("var(--color-destructive)"));

    let marker = draw_options(DrawShape::Marker, &options);
    assert!(marker.get("showLength").is_none());
}

#[test]
fn every_shape_has_a_handler_class() {
    let classes: Vec<&str> = DrawShape::ALL.iter().map(|shape| draw_handler_class(*shape)).collect();
    assert_eq!(classes, vec!["Marker", "Polyline", "Circle", "Rectangle", "Polygon"]);
}

#[test]
fn div_icon_options_skip_unset_anchors() {
    let icon = MarkerIcon::new("<b>pin</b>").with_popup_anchor((0.0, -12.0));
    assert_eq!(
        div_icon_options(&icon),
        json!({ "html": "<b>pin</b>", "iconAnchor": [12.0, 12.0], "popupAnchor": [0.0, -12.0] })
    );
    assert_eq!(div_icon_options(&MarkerIcon::html_only("3")), json!({ "html": "3" }));
}

#[test]
fn marker_options_rise_on_hover_and_carry_title() {
    let mut marker = MarkerOptions::at(LatLng::new(59.91, 10.75));
    assert_eq!(marker_options(&marker), json!({ "riseOnHover": true }));
    marker.title = Some("Oslo".to_owned());
    assert_eq!(marker_options(&marker)["title"], json!("Oslo"));
}

#[test]
fn cluster_outlines_use_the_shape_class() {
    let value = cluster_group_options(&ClusterGroupOptions::default());
    assert_eq!(value["polygonOptions"], json!({ "className": "map-shape" }));
    assert_eq!(value["spiderLegPolylineOptions"], json!({ "className": "map-shape" }));
    assert!(value.get("iconCreateFunction").is_none());
}

#[test]
fn circle_geometry_is_its_centre_with_radius_in_options() {
    let options = StaticShapeOptions::new(StaticShape::Circle { center: LatLng::new(59.91, 10.75), radius_m: 800.0 });
    assert_eq!(static_shape_geometry(&options.shape), json!([59.91, 10.75]));
    assert_eq!(static_shape_options(&options), json!({ "className": "map-shape", "radius": 800.0 }));
}

#[test]
fn polyline_geometry_lists_points_and_style_overrides_class() {
    let shape = StaticShape::Polyline { points: vec![LatLng::new(57.98, 7.05), LatLng::new(71.17, 25.78)] };
    assert_eq!(static_shape_geometry(&shape), json!([[57.98, 7.05], [71.17, 25.78]]));

    let options = StaticShapeOptions {
        class_name: "route".to_owned(),
        style: Some(PathStyle::solid("#ef4444", 0.0)),
        ..StaticShapeOptions::new(shape)
    };
    let value = static_shape_options(&options);
    assert_eq!(value["className"], json!("map-shape route"));
    assert_eq!(value["color"], json!("#ef4444"));
    assert!(value.get("radius").is_none());
}

#[test]
fn rectangle_geometry_is_a_corner_pair() {
    let mut corners = LatLngBounds::from_point(LatLng::new(58.0, 5.0));
    corners.extend(LatLng::new(60.0, 11.0));
    assert_eq!(static_shape_geometry(&StaticShape::Rectangle { bounds: corners }), json!([[58.0, 5.0], [60.0, 11.0]]));
}

#[test]
fn tooltip_options_follow_side_and_offset() {
    let binding = TooltipBinding { side: TooltipSide::Bottom, side_offset: 10.0, class_name: "city".to_owned() };
    assert_eq!(
        tooltip_options(&binding),
        json!({ "direction": "bottom", "offset": [0.0, 10.0], "opacity": 1, "className": "map-tooltip city" })
    );
}

#[test]
fn popup_options_prefix_the_shell_class() {
    assert_eq!(popup_options("city"), json!({ "className": "map-popup city" }));
}
