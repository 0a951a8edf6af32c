//! Option objects handed to Leaflet constructors.
//!
//! Built as `serde_json` values so they can be checked natively; the browser
//! bindings in `util::leaflet` convert them with `JSON.parse`.

#[cfg(test)]
#[path = "leaflet_options_test.rs"]
mod leaflet_options_test;

use serde_json::{Value, json};

use mapcore::config::MapOptions;
use mapcore::controls::{TooltipBinding, popup_class};
use mapcore::draw::{DrawOptions, DrawShape};
use mapcore::engine::FitBoundsOptions;
use mapcore::geo::{LatLng, LatLngBounds};
use mapcore::layers::TileLayerDescriptor;
use mapcore::locate::LocateOptions;
use mapcore::markers::{ClusterGroupOptions, MarkerIcon, MarkerOptions};
use mapcore::shapes::{StaticShape, StaticShapeOptions};

/// `L.map` options. The built-in zoom control is replaced by our own.
pub fn map_options(options: &MapOptions) -> Value {
    json!({
        "center": [options.center.lat, options.center.lng],
        "zoom": options.clamped_zoom(),
        "minZoom": options.min_zoom,
        "maxZoom": options.max_zoom,
        "zoomControl": false,
    })
}

/// `L.tileLayer` options.
pub fn tile_layer_options(descriptor: &TileLayerDescriptor) -> Value {
    json!({ "attribution": descriptor.attribution })
}

/// `[[south, west], [north, east]]` corner pair.
pub fn bounds(bounds: &LatLngBounds) -> Value {
    json!([
        [bounds.south_west.lat, bounds.south_west.lng],
        [bounds.north_east.lat, bounds.north_east.lng],
    ])
}

/// `map.fitBounds` options; unset fields are left to Leaflet.
pub fn fit_bounds_options(options: &FitBoundsOptions) -> Value {
    let mut out = json!({});
    if let Some((x, y)) = options.padding {
        out["padding"] = json!([x, y]);
    }
    if let Some(max_zoom) = options.max_zoom {
        out["maxZoom"] = json!(max_zoom);
    }
    out
}

/// `map.locate` options.
pub fn locate_options(options: &LocateOptions) -> Value {
    let mut out = json!({ "watch": options.watch, "setView": options.set_view });
    if let Some(max_zoom) = options.max_zoom {
        out["maxZoom"] = json!(max_zoom);
    }
    out
}

/// `L.Draw.*` handler options.
pub fn draw_options(shape: DrawShape, options: &DrawOptions) -> Value {
    let mut out = json!({
        "shapeOptions": {
            "color": options.shape_options.color,
            "opacity": options.shape_options.opacity,
            "weight": options.shape_options.weight,
        },
        "drawError": { "color": options.draw_error_color },
    });
    match shape {
        DrawShape::Polyline => out["showLength"] = json!(options.show_length),
        DrawShape::Circle => out["showRadius"] = json!(options.show_radius),
        DrawShape::Rectangle | DrawShape::Polygon => out["showArea"] = json!(options.show_area),
        DrawShape::Marker => {}
    }
    out
}

/// `L.Draw` namespace member implementing a shape tool.
pub fn draw_handler_class(shape: DrawShape) -> &'static str {
    match shape {
        DrawShape::Marker => "Marker",
        DrawShape::Polyline => "Polyline",
        DrawShape::Circle => "Circle",
        DrawShape::Rectangle => "Rectangle",
        DrawShape::Polygon => "Polygon",
    }
}

/// `[lat, lng]` pair.
pub fn lat_lng(point: LatLng) -> Value {
    json!([point.lat, point.lng])
}

/// `L.divIcon` options. Anchors left unset are omitted.
pub fn div_icon_options(icon: &MarkerIcon) -> Value {
    let mut out = json!({ "html": icon.html });
    let anchors = [
        ("iconAnchor", icon.icon_anchor),
        ("bgPos", icon.bg_pos),
        ("popupAnchor", icon.popup_anchor),
        ("tooltipAnchor", icon.tooltip_anchor),
    ];
    for (key, point) in anchors {
        if let Some((x, y)) = point {
            out[key] = json!([x, y]);
        }
    }
    out
}

/// `L.marker` options without the icon, which is built separately.
pub fn marker_options(marker: &MarkerOptions) -> Value {
    let mut out = json!({ "riseOnHover": marker.rise_on_hover });
    if let Some(title) = &marker.title {
        out["title"] = json!(title);
    }
    out
}

/// `L.markerClusterGroup` options without `iconCreateFunction`.
pub fn cluster_group_options(options: &ClusterGroupOptions) -> Value {
    json!({
        "polygonOptions": { "className": options.polygon_class },
        "spiderLegPolylineOptions": { "className": options.spider_leg_class },
    })
}

/// First constructor argument of a static shape.
pub fn static_shape_geometry(shape: &StaticShape) -> Value {
    match shape {
        StaticShape::Circle { center, .. } | StaticShape::CircleMarker { center, .. } => lat_lng(*center),
        StaticShape::Polyline { points } | StaticShape::Polygon { ring: points } => {
            Value::Array(points.iter().map(|point| lat_lng(*point)).collect())
        }
        StaticShape::Rectangle { bounds: corners } => bounds(corners),
    }
}

/// Path options of a static shape: class, radius and any explicit style.
pub fn static_shape_options(options: &StaticShapeOptions) -> Value {
    let mut out = json!({ "className": options.class_list() });
    match options.shape {
        StaticShape::Circle { radius_m: radius, .. } | StaticShape::CircleMarker { radius_px: radius, .. } => {
            out["radius"] = json!(radius);
        }
        StaticShape::Polyline { .. } | StaticShape::Polygon { .. } | StaticShape::Rectangle { .. } => {}
    }
    if let Some(style) = &options.style {
        out["color"] = json!(style.color);
        out["weight"] = json!(style.weight);
        out["fillColor"] = json!(style.fill_color);
        out["fillOpacity"] = json!(style.fill_opacity);
    }
    out
}

/// `layer.bindPopup` options.
pub fn popup_options(class_name: &str) -> Value {
    json!({ "className": popup_class(class_name) })
}

/// `layer.bindTooltip` options. Fully opaque; the fade is left to CSS.
pub fn tooltip_options(binding: &TooltipBinding) -> Value {
    let (x, y) = binding.offset();
    json!({
        "direction": binding.side.as_str(),
        "offset": [x, y],
        "opacity": 1,
        "className": binding.class_list(),
    })
}
