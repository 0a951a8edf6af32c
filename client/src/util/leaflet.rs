//! Dynamic bindings to the global Leaflet namespace.
//!
//! ARCHITECTURE
//! ============
//! Leaflet and its plugins are injected at runtime by
//! `util::engine_loader`, so there is nothing to link against at build time.
//! Every call goes through `js_sys::Reflect` on the `L` object; option
//! objects come from `util::leaflet_options` and cross as JSON. The types
//! here implement the `mapcore::engine` traits so the state machines drive
//! Leaflet without knowing about it.
//!
//! Leaflet fires some events synchronously from inside the calls we make
//! (saving an edit fires `draw:edited` before `save()` returns). Handlers for
//! those events never touch controller state directly: they queue a
//! [`microtask`] that runs once the call has returned. Events that only come
//! from user input, such as `draw:created`, are applied at once so they land
//! before any later click. Controls whose state is never borrowed across a
//! Leaflet call [`defer`] to the next task.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use mapcore::config::MapOptions;
use mapcore::controls::TooltipBinding;
use mapcore::draw::{DrawAction, DrawEvent, DrawOptions, DrawShape, ShapeGeometry};
use mapcore::engine::{
    DrawTool, DrawToolFactory, FitBoundsOptions, Geolocator, MapView, PathStyle, ShapeId, ShapeStyler, Teardown,
};
use mapcore::error::LocateError;
use mapcore::geo::{FeatureCollection, LatLng, LatLngBounds};
use mapcore::layers::TileLayerDescriptor;
use mapcore::locate::{LocateOptions, LocationFound};
use mapcore::markers::{ClusterGroupOptions, MarkerIcon, MarkerOptions};
use mapcore::shapes::StaticShapeOptions;

use crate::util::leaflet_options;

// =============================================================
// Reflection helpers
// =============================================================

pub fn get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

/// Call `target[method](...args)`.
pub fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let function: Function = get(target, method)?.dyn_into()?;
    function.apply(target, &args.iter().collect::<Array>())
}

/// `new target.path[0].path[1]...(...args)`.
pub fn construct(target: &JsValue, path: &[&str], args: &[JsValue]) -> Result<JsValue, JsValue> {
    let mut ctor = target.clone();
    for key in path {
        ctor = get(&ctor, key)?;
    }
    let ctor: Function = ctor.dyn_into()?;
    Reflect::construct(&ctor, &args.iter().collect::<Array>())
}

/// Convert a serializable value through JSON.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|err| JsValue::from_str(&err.to_string()))?;
    js_sys::JSON::parse(&text)
}

/// Readable text for a thrown JS value.
pub fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Run `f` on the next task, after the current Leaflet call has returned.
pub fn defer(f: impl FnOnce() + 'static) {
    Timeout::new(0, f).forget();
}

/// Run `f` as soon as the current call stack unwinds, ahead of any queued
/// input event.
pub fn microtask(f: impl FnOnce() + 'static) {
    leptos::task::spawn_local(async move { f() });
}

fn number(target: &JsValue, key: &str) -> Result<f64, JsValue> {
    get(target, key)?
        .as_f64()
        .ok_or_else(|| JsValue::from_str(&format!("{key} is not a number")))
}

fn lat_lng(value: &JsValue) -> Result<LatLng, JsValue> {
    Ok(LatLng::new(number(value, "lat")?, number(value, "lng")?))
}

fn lat_lngs(value: &JsValue) -> Result<Vec<LatLng>, JsValue> {
    Array::from(value).iter().map(|point| lat_lng(&point)).collect()
}

fn warn_on_err(context: &str, result: Result<JsValue, JsValue>) {
    if let Err(err) = result {
        log::warn!("leaflet: {context} failed: {}", describe(&err));
    }
}

/// The global `L` namespace, once the engine scripts have run.
pub fn global() -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let leaflet = get(&window, "L")?;
    if leaflet.is_undefined() {
        return Err(JsValue::from_str("Leaflet is not loaded"));
    }
    Ok(leaflet)
}

// =============================================================
// Event listeners
// =============================================================

/// A handler bound with `target.on(event, ...)`, unbound on drop.
pub struct Listener {
    target: JsValue,
    event: &'static str,
    closure: Closure<dyn FnMut(JsValue)>,
}

impl Listener {
    pub fn on(target: &JsValue, event: &'static str, handler: impl FnMut(JsValue) + 'static) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(JsValue)>::new(handler);
        call(target, "on", &[JsValue::from_str(event), closure.as_ref().clone()])?;
        Ok(Self { target: target.clone(), event, closure })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        warn_on_err(
            self.event,
            call(&self.target, "off", &[JsValue::from_str(self.event), self.closure.as_ref().clone()]),
        );
    }
}

// =============================================================
// Map
// =============================================================

/// A live `L.map` instance.
pub struct LeafletMap {
    leaflet: JsValue,
    map: JsValue,
}

impl LeafletMap {
    pub fn create(leaflet: JsValue, container: &web_sys::HtmlElement, options: &MapOptions) -> Result<Self, JsValue> {
        let js_options = to_js(&leaflet_options::map_options(options))?;
        let map = call(&leaflet, "map", &[container.clone().into(), js_options])?;
        Ok(Self { leaflet, map })
    }

    pub fn leaflet(&self) -> &JsValue {
        &self.leaflet
    }

    pub fn raw(&self) -> &JsValue {
        &self.map
    }

    pub fn on(&self, event: &'static str, handler: impl FnMut(JsValue) + 'static) -> Result<Listener, JsValue> {
        Listener::on(&self.map, event, handler)
    }

    /// Detach the map from its container and release its DOM.
    pub fn remove(&self) {
        warn_on_err("map.remove", call(&self.map, "remove", &[]));
    }

    fn invoke(&self, method: &str, args: &[JsValue]) {
        warn_on_err(method, call(&self.map, method, args));
    }

    fn read_number(&self, method: &str) -> f64 {
        match call(&self.map, method, &[]).map(|value| value.as_f64()) {
            Ok(Some(value)) => value,
            Ok(None) => f64::NAN,
            Err(err) => {
                log::warn!("leaflet: {method} failed: {}", describe(&err));
                f64::NAN
            }
        }
    }
}

impl MapView for LeafletMap {
    fn fit_bounds(&mut self, bounds: LatLngBounds, options: &FitBoundsOptions) {
        match fit_bounds_args(&bounds, options) {
            Ok(args) => self.invoke("fitBounds", &args),
            Err(err) => log::warn!("leaflet: fitBounds arguments: {}", describe(&err)),
        }
    }

    fn zoom(&self) -> f64 {
        self.read_number("getZoom")
    }

    fn min_zoom(&self) -> f64 {
        self.read_number("getMinZoom")
    }

    fn max_zoom(&self) -> f64 {
        self.read_number("getMaxZoom")
    }

    fn zoom_in(&mut self) {
        self.invoke("zoomIn", &[]);
    }

    fn zoom_out(&mut self) {
        self.invoke("zoomOut", &[]);
    }

    fn toggle_fullscreen(&mut self) {
        self.invoke("toggleFullscreen", &[]);
    }
}

impl Geolocator for LeafletMap {
    fn locate(&mut self, options: &LocateOptions) {
        match to_js(&leaflet_options::locate_options(options)) {
            Ok(options) => self.invoke("locate", &[options]),
            Err(err) => log::warn!("leaflet: locate options: {}", describe(&err)),
        }
    }

    fn stop_locate(&mut self) {
        self.invoke("stopLocate", &[]);
    }
}

fn fit_bounds_args(bounds: &LatLngBounds, options: &FitBoundsOptions) -> Result<Vec<JsValue>, JsValue> {
    Ok(vec![
        to_js(&leaflet_options::bounds(bounds))?,
        to_js(&leaflet_options::fit_bounds_options(options))?,
    ])
}

/// Decode a `locationfound` event.
pub fn location_found(event: &JsValue) -> Result<LocationFound, JsValue> {
    Ok(LocationFound { latlng: lat_lng(&get(event, "latlng")?)?, accuracy: number(event, "accuracy")? })
}

/// Decode a `locationerror` event.
pub fn location_error(event: &JsValue) -> LocateError {
    let code = number(event, "code").unwrap_or(0.0);
    let message = get(event, "message")
        .map(|value| value.as_string().unwrap_or_default())
        .unwrap_or_default();
    LocateError { code: code as u16, message }
}

// =============================================================
// Layers
// =============================================================

/// A layer added to a map or layer group, removed from it on drop.
pub struct MapLayer {
    layer: JsValue,
    parent: JsValue,
}

impl MapLayer {
    /// Add `layer` to `parent`, which is either the map or a group.
    pub fn add(layer: JsValue, parent: &JsValue) -> Result<Self, JsValue> {
        call(parent, "addLayer", &[layer.clone()])?;
        Ok(Self { layer, parent: parent.clone() })
    }

    /// `L.tileLayer(url, options)` on the map.
    pub fn tile(map: &LeafletMap, descriptor: &TileLayerDescriptor) -> Result<Self, JsValue> {
        let options = to_js(&leaflet_options::tile_layer_options(descriptor))?;
        let layer = call(map.leaflet(), "tileLayer", &[JsValue::from_str(&descriptor.url), options])?;
        Self::add(layer, map.raw())
    }

    /// `L.circleMarker(latlng)` on the map for the located position.
    pub fn position_marker(map: &LeafletMap, position: LatLng) -> Result<Self, JsValue> {
        let options = to_js(&serde_json::json!({ "radius": 8, "className": "map-locate__marker" }))?;
        let layer = call(map.leaflet(), "circleMarker", &[to_js(&leaflet_options::lat_lng(position))?, options])?;
        Self::add(layer, map.raw())
    }

    /// `L.marker(latlng, { icon: L.divIcon(...) })` on `parent`.
    pub fn marker(leaflet: &JsValue, parent: &JsValue, marker: &MarkerOptions) -> Result<Self, JsValue> {
        let icon = div_icon(leaflet, &marker.icon)?;
        let options = to_js(&leaflet_options::marker_options(marker))?;
        Reflect::set(&options, &JsValue::from_str("icon"), &icon)?;
        let layer = call(leaflet, "marker", &[to_js(&leaflet_options::lat_lng(marker.position))?, options])?;
        Self::add(layer, parent)
    }

    /// A static circle, line, polygon or rectangle on `parent`.
    pub fn shape(leaflet: &JsValue, parent: &JsValue, options: &StaticShapeOptions) -> Result<Self, JsValue> {
        let geometry = to_js(&leaflet_options::static_shape_geometry(&options.shape))?;
        let path = to_js(&leaflet_options::static_shape_options(options))?;
        let layer = call(leaflet, options.shape.factory(), &[geometry, path])?;
        Self::add(layer, parent)
    }

    pub fn raw(&self) -> &JsValue {
        &self.layer
    }
}

impl Drop for MapLayer {
    fn drop(&mut self) {
        warn_on_err("removeLayer", call(&self.parent, "removeLayer", &[self.layer.clone()]));
    }
}

fn div_icon(leaflet: &JsValue, icon: &MarkerIcon) -> Result<JsValue, JsValue> {
    call(leaflet, "divIcon", &[to_js(&leaflet_options::div_icon_options(icon))?])
}

/// Popup showing `content` when `layer` is clicked. Leaflet takes the
/// element over; it keeps receiving reactive updates.
pub fn bind_popup(layer: &JsValue, content: &web_sys::HtmlElement, class_name: &str) -> Result<(), JsValue> {
    let options = to_js(&leaflet_options::popup_options(class_name))?;
    call(layer, "bindPopup", &[content.clone().into(), options])?;
    Ok(())
}

/// Tooltip showing `content` while `layer` is hovered.
pub fn bind_tooltip(layer: &JsValue, content: &web_sys::HtmlElement, binding: &TooltipBinding) -> Result<(), JsValue> {
    let options = to_js(&leaflet_options::tooltip_options(binding))?;
    call(layer, "bindTooltip", &[content.clone().into(), options])?;
    Ok(())
}

// =============================================================
// Marker clusters
// =============================================================

type IconClosure = Closure<dyn FnMut(JsValue) -> JsValue>;

/// An `L.markerClusterGroup` on the map. Markers join it through
/// [`MapLayer::marker`] with [`ClusterLayer::raw`] as their parent.
pub struct ClusterLayer {
    group: MapLayer,
    _icon: Option<IconClosure>,
}

impl ClusterLayer {
    pub fn create(map: &LeafletMap, options: &ClusterGroupOptions) -> Result<Self, JsValue> {
        let js_options = to_js(&leaflet_options::cluster_group_options(options))?;
        let icon = options.has_custom_icon().then(|| {
            let leaflet = map.leaflet().clone();
            let options = options.clone();
            IconClosure::new(move |cluster: JsValue| cluster_icon(&leaflet, &options, &cluster))
        });
        if let Some(icon) = &icon {
            Reflect::set(&js_options, &JsValue::from_str("iconCreateFunction"), icon.as_ref())?;
        }
        let group = call(map.leaflet(), "markerClusterGroup", &[js_options])?;
        Ok(Self { group: MapLayer::add(group, map.raw())?, _icon: icon })
    }

    pub fn raw(&self) -> &JsValue {
        self.group.raw()
    }
}

fn cluster_icon(leaflet: &JsValue, options: &ClusterGroupOptions, cluster: &JsValue) -> JsValue {
    let count = match call(cluster, "getChildCount", &[]) {
        Ok(count) => count.as_f64().map_or(0, |count| count as usize),
        Err(err) => {
            log::warn!("leaflet: cluster size: {}", describe(&err));
            0
        }
    };
    let icon = options.icon_for(count).unwrap_or_else(|| MarkerIcon::html_only(count.to_string()));
    match div_icon(leaflet, &icon) {
        Ok(icon) => icon,
        Err(err) => {
            log::warn!("leaflet: cluster icon: {}", describe(&err));
            JsValue::UNDEFINED
        }
    }
}

/// Rendered shapes of one feature collection, one Leaflet layer per feature.
///
/// [`ShapeId`] is the feature's index in the collection.
pub struct FeatureShapes {
    _group: MapLayer,
    shapes: Vec<JsValue>,
    _listeners: Vec<Listener>,
}

impl FeatureShapes {
    /// Render `collection` with per-feature styles and popups.
    ///
    /// `style` and `popup` are asked once per feature; the click handlers
    /// receive the feature's [`ShapeId`].
    pub fn render(
        map: &LeafletMap,
        collection: &FeatureCollection,
        style: impl Fn(ShapeId) -> PathStyle,
        popup: impl Fn(usize) -> Option<String>,
        on_click: impl Fn(ShapeId) + Clone + 'static,
        on_double_click: impl Fn(ShapeId) + Clone + 'static,
    ) -> Result<Self, JsValue> {
        let group = MapLayer::add(call(map.leaflet(), "featureGroup", &[])?, map.raw())?;

        let mut shapes = Vec::with_capacity(collection.len());
        let mut listeners = Vec::with_capacity(collection.len() * 2);
        for (index, feature) in collection.features.iter().enumerate() {
            let id = ShapeId(index as u64);
            let options = Object::new();
            Reflect::set(&options, &JsValue::from_str("style"), &to_js(&style(id))?)?;
            let shape = call(map.leaflet(), "geoJSON", &[to_js(feature)?, options.into()])?;
            if let Some(html) = popup(index) {
                call(&shape, "bindPopup", &[JsValue::from_str(&html)])?;
            }
            let click = on_click.clone();
            listeners.push(Listener::on(&shape, "click", move |_| click(id))?);
            let double_click = on_double_click.clone();
            listeners.push(Listener::on(&shape, "dblclick", move |_| double_click(id))?);
            call(group.raw(), "addLayer", &[shape.clone()])?;
            shapes.push(shape);
        }
        Ok(Self { _group: group, shapes, _listeners: listeners })
    }
}

impl ShapeStyler for FeatureShapes {
    fn set_style(&mut self, shape: ShapeId, style: &PathStyle) {
        let Some(layer) = usize::try_from(shape.0).map_or(None, |index| self.shapes.get(index)) else {
            log::warn!("leaflet: no rendered shape {shape:?}");
            return;
        };
        match to_js(style) {
            Ok(style) => warn_on_err("setStyle", call(layer, "setStyle", &[style])),
            Err(err) => log::warn!("leaflet: style: {}", describe(&err)),
        }
    }
}

// =============================================================
// Drawing
// =============================================================

/// Receives drawing notifications. Never called from inside a tool's
/// `enable`, `disable`, `save` or `revert`.
pub type DrawSink = Rc<dyn Fn(DrawEvent)>;

type ShapeKinds = Rc<RefCell<HashMap<ShapeId, DrawShape>>>;

/// The feature group holding drawn shapes and the `draw:*` listeners on the map.
pub struct DrawLayer {
    _group: MapLayer,
    _listeners: Vec<Listener>,
}

/// Wire leaflet-draw events on `map` to `sink` and return the drawn-shape
/// layer plus a tool factory bound to it.
pub fn attach_draw(map: &LeafletMap, sink: DrawSink) -> Result<(DrawLayer, LeafletDrawFactory), JsValue> {
    let leaflet = map.leaflet().clone();
    let layer = MapLayer::add(call(&leaflet, "featureGroup", &[])?, map.raw())?;
    let group = layer.raw().clone();
    let kinds: ShapeKinds = Rc::new(RefCell::new(HashMap::new()));
    let mut listeners = Vec::new();

    {
        let (leaflet, group, kinds, sink) = (leaflet.clone(), group.clone(), Rc::clone(&kinds), Rc::clone(&sink));
        listeners.push(map.on("draw:created", move |event| match created(&leaflet, &group, &kinds, &event) {
            Ok(created) => sink(created),
            Err(err) => sink(DrawEvent::ToolError { message: describe(&err) }),
        })?);
    }
    for name in ["draw:editvertex", "draw:editmove", "draw:editresize"] {
        let (leaflet, kinds, sink) = (leaflet.clone(), Rc::clone(&kinds), Rc::clone(&sink));
        listeners.push(map.on(name, move |event| {
            let layer = match get(&event, "poly") {
                Ok(poly) if !poly.is_undefined() => Ok(poly),
                _ => get(&event, "layer"),
            };
            let reshaped = layer.and_then(|layer| {
                let shape = stamp(&leaflet, &layer)?;
                Ok(kind_of(&kinds, shape).map(|kind| (shape, geometry(kind, &layer))))
            });
            match reshaped {
                Ok(Some((shape, Ok(geometry)))) => sink(DrawEvent::Reshaped { shape, geometry }),
                Ok(Some((_, Err(err)))) | Err(err) => log::warn!("leaflet: {name}: {}", describe(&err)),
                Ok(None) => {}
            }
        })?);
    }
    {
        let (leaflet, kinds, sink) = (leaflet.clone(), Rc::clone(&kinds), Rc::clone(&sink));
        listeners.push(map.on("draw:edited", move |event| {
            let mut shapes = Vec::new();
            for layer in layers_of(&event) {
                let Ok(shape) = stamp(&leaflet, &layer) else {
                    continue;
                };
                let Some(kind) = kind_of(&kinds, shape) else {
                    continue;
                };
                match geometry(kind, &layer) {
                    Ok(geometry) => shapes.push((shape, geometry)),
                    Err(err) => log::warn!("leaflet: edited shape {shape:?}: {}", describe(&err)),
                }
            }
            queue(&sink, DrawEvent::Edited { shapes });
        })?);
    }
    {
        let (leaflet, kinds, sink) = (leaflet.clone(), Rc::clone(&kinds), Rc::clone(&sink));
        listeners.push(map.on("draw:deleted", move |event| {
            let mut shapes = Vec::new();
            for layer in layers_of(&event) {
                match stamp(&leaflet, &layer) {
                    Ok(shape) => {
                        kinds.borrow_mut().remove(&shape);
                        shapes.push(shape);
                    }
                    Err(err) => log::warn!("leaflet: deleted shape: {}", describe(&err)),
                }
            }
            queue(&sink, DrawEvent::Deleted { shapes });
        })?);
    }
    {
        let (leaflet, sink) = (leaflet.clone(), Rc::clone(&sink));
        listeners.push(Listener::on(&group, "layerremove", move |event| {
            match get(&event, "layer").and_then(|layer| stamp(&leaflet, &layer)) {
                Ok(shape) => sink(DrawEvent::Removed { shape }),
                Err(err) => log::warn!("leaflet: layerremove: {}", describe(&err)),
            }
        })?);
    }

    let factory = LeafletDrawFactory { leaflet, map: map.raw().clone(), group: group.clone(), sink };
    Ok((DrawLayer { _group: layer, _listeners: listeners }, factory))
}

/// For events Leaflet fires from inside a tool call.
fn queue(sink: &DrawSink, event: DrawEvent) {
    let sink = Rc::clone(sink);
    microtask(move || sink(event));
}

fn stamp(leaflet: &JsValue, layer: &JsValue) -> Result<ShapeId, JsValue> {
    let id = call(leaflet, "stamp", &[layer.clone()])?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("L.stamp returned a non-number"))?;
    Ok(ShapeId(id as u64))
}

fn kind_of(kinds: &ShapeKinds, shape: ShapeId) -> Option<DrawShape> {
    kinds.borrow().get(&shape).copied()
}

fn layers_of(event: &JsValue) -> Vec<JsValue> {
    get(event, "layers")
        .and_then(|layers| call(&layers, "getLayers", &[]))
        .map(|layers| Array::from(&layers).iter().collect())
        .unwrap_or_default()
}

fn parse_kind(layer_type: &str) -> Option<DrawShape> {
    DrawShape::ALL.into_iter().find(|shape| shape.as_str() == layer_type)
}

fn created(leaflet: &JsValue, group: &JsValue, kinds: &ShapeKinds, event: &JsValue) -> Result<DrawEvent, JsValue> {
    let layer = get(event, "layer")?;
    let layer_type = get(event, "layerType")?.as_string().unwrap_or_default();
    let kind = parse_kind(&layer_type).ok_or_else(|| JsValue::from_str(&format!("unknown layer type {layer_type:?}")))?;
    let geometry = geometry(kind, &layer)?;
    let shape = stamp(leaflet, &layer)?;
    kinds.borrow_mut().insert(shape, kind);
    call(group, "addLayer", &[layer])?;
    Ok(DrawEvent::Created { shape, geometry })
}

fn geometry(kind: DrawShape, layer: &JsValue) -> Result<ShapeGeometry, JsValue> {
    Ok(match kind {
        DrawShape::Marker => ShapeGeometry::Marker { position: lat_lng(&call(layer, "getLatLng", &[])?)? },
        DrawShape::Circle => ShapeGeometry::Circle {
            center: lat_lng(&call(layer, "getLatLng", &[])?)?,
            radius_m: call(layer, "getRadius", &[])?.as_f64().unwrap_or(0.0),
        },
        DrawShape::Polyline => ShapeGeometry::Polyline { points: lat_lngs(&call(layer, "getLatLngs", &[])?)? },
        DrawShape::Polygon => {
            let rings = Array::from(&call(layer, "getLatLngs", &[])?);
            ShapeGeometry::Polygon { ring: lat_lngs(&rings.get(0))? }
        }
        DrawShape::Rectangle => {
            let bounds = call(layer, "getBounds", &[])?;
            ShapeGeometry::Rectangle {
                bounds: LatLngBounds {
                    south_west: lat_lng(&call(&bounds, "getSouthWest", &[])?)?,
                    north_east: lat_lng(&call(&bounds, "getNorthEast", &[])?)?,
                },
            }
        }
    })
}

/// Builds leaflet-draw handlers for the controller.
pub struct LeafletDrawFactory {
    leaflet: JsValue,
    map: JsValue,
    group: JsValue,
    sink: DrawSink,
}

impl LeafletDrawFactory {
    fn tool(&self, name: String, handler: Result<JsValue, JsValue>) -> Box<dyn DrawTool> {
        match handler {
            Ok(handler) => Box::new(LeafletTool { name, handler }),
            Err(err) => {
                let message = format!("cannot create {name} tool: {}", describe(&err));
                log::error!("leaflet: {message}");
                queue(&self.sink, DrawEvent::ToolError { message });
                Box::new(LeafletTool { name, handler: JsValue::UNDEFINED })
            }
        }
    }
}

impl DrawToolFactory for LeafletDrawFactory {
    fn shape_tool(&mut self, shape: DrawShape, options: &DrawOptions) -> Box<dyn DrawTool> {
        let handler = to_js(&leaflet_options::draw_options(shape, options)).and_then(|options| {
            construct(&self.leaflet, &["Draw", leaflet_options::draw_handler_class(shape)], &[self.map.clone(), options])
        });
        self.tool(shape.as_str().to_owned(), handler)
    }

    fn action_tool(&mut self, action: DrawAction) -> Box<dyn DrawTool> {
        let class = match action {
            DrawAction::Edit => "Edit",
            DrawAction::Delete => "Delete",
        };
        let options = Object::new();
        let handler = Reflect::set(&options, &JsValue::from_str("featureGroup"), &self.group)
            .and_then(|_| construct(&self.leaflet, &["EditToolbar", class], &[self.map.clone(), options.into()]));
        self.tool(action.as_str().to_owned(), handler)
    }
}

/// One leaflet-draw handler (`L.Draw.*` or `L.EditToolbar.*`).
struct LeafletTool {
    name: String,
    handler: JsValue,
}

impl LeafletTool {
    fn invoke(&self, method: &str) {
        if self.handler.is_undefined() {
            return;
        }
        warn_on_err(&format!("{} {method}", self.name), call(&self.handler, method, &[]));
    }
}

impl DrawTool for LeafletTool {
    fn enable(&mut self) {
        self.invoke("enable");
    }

    fn disable(&mut self) -> Teardown {
        self.invoke("disable");
        Teardown::Complete
    }

    fn save(&mut self) {
        self.invoke("save");
    }

    fn revert(&mut self) {
        self.invoke("revertLayers");
    }
}
