//! Collaborator traits implemented by the external rendering engine.
//!
//! The control layer never touches tiles, projections or drawing handles
//! directly. It asks the engine through these seams, which keeps every state
//! machine in this crate testable with recording fakes. The browser build
//! implements them on top of Leaflet in the `client` crate.

#[cfg(test)]
#[path = "engine_test.rs"]
pub(crate) mod engine_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FEATURE_COLOR, DEFAULT_FEATURE_FILL_OPACITY, DEFAULT_STROKE_WEIGHT};
use crate::draw::{DrawAction, DrawOptions, DrawShape};
use crate::geo::LatLngBounds;
use crate::locate::LocateOptions;

/// Engine-assigned identity of a rendered vector shape.
///
/// This is a non-owning handle: the engine owns the shape and its lifetime,
/// the control layer only remembers which one it is talking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

/// Path style applied to a vector shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl PathStyle {
    /// Stroke and fill in one colour.
    #[must_use]
    pub fn solid(color: &str, fill_opacity: f64) -> Self {
        Self {
            color: color.to_owned(),
            weight: DEFAULT_STROKE_WEIGHT,
            fill_color: color.to_owned(),
            fill_opacity,
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::solid(DEFAULT_FEATURE_COLOR, DEFAULT_FEATURE_FILL_OPACITY)
    }
}

/// Options forwarded with a viewport fit request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitBoundsOptions {
    /// Padding in pixels on each axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<(f64, f64)>,
    /// Never zoom in further than this while fitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
}

/// Viewport operations.
pub trait MapView {
    /// Pan and zoom so `bounds` is fully visible.
    fn fit_bounds(&mut self, bounds: LatLngBounds, options: &FitBoundsOptions);
    fn zoom(&self) -> f64;
    fn min_zoom(&self) -> f64;
    fn max_zoom(&self) -> f64;
    fn zoom_in(&mut self);
    fn zoom_out(&mut self);
    fn toggle_fullscreen(&mut self);
}

/// Style mutation on shapes the engine has already rendered.
pub trait ShapeStyler {
    fn set_style(&mut self, shape: ShapeId, style: &PathStyle);
}

/// Outcome of disabling a drawing tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Teardown {
    /// The tool is fully detached from the engine.
    #[default]
    Complete,
    /// The engine is still detaching handlers; it will call back when done.
    Deferred,
}

/// An engine-bound drawing, editing or deleting tool.
///
/// A tool exists only while its draw mode is active. `save` and `revert`
/// are meaningful for edit/delete tools; shape tools keep the defaults.
pub trait DrawTool {
    /// Attach handlers and start capturing input.
    fn enable(&mut self);
    /// Detach from the engine.
    fn disable(&mut self) -> Teardown;
    /// Commit in-progress edits or deletions.
    fn save(&mut self) {}
    /// Restore the geometry the tool started with.
    fn revert(&mut self) {}
}

/// Constructs drawing tools once the engine and its draw plugin are loaded.
pub trait DrawToolFactory {
    /// A single-shot tool that produces one shape of `shape`.
    fn shape_tool(&mut self, shape: DrawShape, options: &DrawOptions) -> Box<dyn DrawTool>;
    /// An edit or delete tool bound to the whole drawn-shape collection.
    fn action_tool(&mut self, action: DrawAction) -> Box<dyn DrawTool>;
}

/// Geolocation service.
pub trait Geolocator {
    /// Start a one-shot or watch-mode position request. Results come back
    /// through [`crate::locate::LocateController::on_location_found`] and
    /// [`crate::locate::LocateController::on_location_error`].
    fn locate(&mut self, options: &LocateOptions);
    /// Stop watching and drop both success and error handlers.
    fn stop_locate(&mut self);
}
