//! Recording fakes for the engine traits, shared by the state machine tests.

#![allow(clippy::float_cmp)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::geo::LatLng;

// =============================================================
// MapView / ShapeStyler
// =============================================================

pub(crate) struct RecordingView {
    pub fits: Vec<(LatLngBounds, FitBoundsOptions)>,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub fullscreen_toggles: usize,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self { fits: Vec::new(), zoom: 5.0, min_zoom: 0.0, max_zoom: 18.0, fullscreen_toggles: 0 }
    }
}

impl MapView for RecordingView {
    fn fit_bounds(&mut self, bounds: LatLngBounds, options: &FitBoundsOptions) {
        self.fits.push((bounds, options.clone()));
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1.0).min(self.max_zoom);
    }

    fn zoom_out(&mut self) {
        self.zoom = (self.zoom - 1.0).max(self.min_zoom);
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen_toggles += 1;
    }
}

#[derive(Default)]
pub(crate) struct RecordingStyler {
    pub calls: Vec<(ShapeId, PathStyle)>,
}

impl ShapeStyler for RecordingStyler {
    fn set_style(&mut self, shape: ShapeId, style: &PathStyle) {
        self.calls.push((shape, style.clone()));
    }
}

// =============================================================
// Drawing tools
// =============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ToolCall {
    Enable(&'static str),
    Disable(&'static str),
    Save(&'static str),
    Revert(&'static str),
}

pub(crate) type ToolLog = Rc<RefCell<Vec<ToolCall>>>;

struct FakeTool {
    name: &'static str,
    log: ToolLog,
    teardown: Rc<Cell<Teardown>>,
}

impl DrawTool for FakeTool {
    fn enable(&mut self) {
        self.log.borrow_mut().push(ToolCall::Enable(self.name));
    }

    fn disable(&mut self) -> Teardown {
        self.log.borrow_mut().push(ToolCall::Disable(self.name));
        self.teardown.get()
    }

    fn save(&mut self) {
        self.log.borrow_mut().push(ToolCall::Save(self.name));
    }

    fn revert(&mut self) {
        self.log.borrow_mut().push(ToolCall::Revert(self.name));
    }
}

/// Factory whose tools append to a shared log. `teardown` decides what every
/// subsequent `disable` reports.
#[derive(Default)]
pub(crate) struct FakeFactory {
    pub log: ToolLog,
    pub teardown: Rc<Cell<Teardown>>,
    pub shape_options: Rc<RefCell<Vec<(DrawShape, DrawOptions)>>>,
}

impl FakeFactory {
    fn tool(&self, name: &'static str) -> Box<dyn DrawTool> {
        Box::new(FakeTool { name, log: Rc::clone(&self.log), teardown: Rc::clone(&self.teardown) })
    }
}

impl DrawToolFactory for FakeFactory {
    fn shape_tool(&mut self, shape: DrawShape, options: &DrawOptions) -> Box<dyn DrawTool> {
        self.shape_options.borrow_mut().push((shape, options.clone()));
        self.tool(shape.as_str())
    }

    fn action_tool(&mut self, action: DrawAction) -> Box<dyn DrawTool> {
        self.tool(action.as_str())
    }
}

// =============================================================
// Geolocator
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LocateCall {
    Locate(LocateOptions),
    Stop,
}

#[derive(Default)]
pub(crate) struct RecordingGeolocator {
    pub calls: Vec<LocateCall>,
}

impl Geolocator for RecordingGeolocator {
    fn locate(&mut self, options: &LocateOptions) {
        self.calls.push(LocateCall::Locate(options.clone()));
    }

    fn stop_locate(&mut self) {
        self.calls.push(LocateCall::Stop);
    }
}

// =============================================================
// Trait defaults and value types
// =============================================================

#[test]
fn path_style_default_is_blue_outline() {
    let style = PathStyle::default();
    assert_eq!(style.color, "#60a5fa");
    assert_eq!(style.fill_color, "#60a5fa");
    assert_eq!(style.weight, 2.0);
    assert_eq!(style.fill_opacity, 0.25);
}

#[test]
fn path_style_serializes_camel_case() {
    let json = serde_json::to_value(PathStyle::solid("#22c55e", 0.2)).expect("serialize");
    assert_eq!(json["fillColor"], "#22c55e");
    assert_eq!(json["fillOpacity"], 0.2);
}

#[test]
fn fit_options_skip_unset_fields() {
    let json = serde_json::to_value(FitBoundsOptions::default()).expect("serialize");
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn shape_tool_save_and_revert_default_to_noop() {
    struct Minimal;
    impl DrawTool for Minimal {
        fn enable(&mut self) {}
        fn disable(&mut self) -> Teardown {
            Teardown::Complete
        }
    }
    let mut tool = Minimal;
    tool.save();
    tool.revert();
    assert_eq!(tool.disable(), Teardown::Complete);
}

#[test]
fn recording_view_clamps_zoom() {
    let mut view = RecordingView { zoom: 18.0, ..RecordingView::default() };
    view.zoom_in();
    assert_eq!(view.zoom(), 18.0);
    view.fit_bounds(LatLngBounds::from_point(LatLng::new(60.0, 5.0)), &FitBoundsOptions::default());
    assert_eq!(view.fits.len(), 1);
}
