//! Drawing toolbar state machine over the shared drawn-shape collection.
//!
//! DESIGN
//! ======
//! One [`DrawMode`] is active at a time. Entering a non-idle mode acquires an
//! engine tool wrapped in [`ActiveTool`]; leaving it releases the tool, and
//! dropping the guard (controller teardown, unmount) disables it too, so no
//! exit path leaves a tool attached to the engine.
//!
//! Shape tools are single-shot: the engine reports a finished shape, it is
//! appended and the mode returns to `Idle`. Edit and delete tools work on the
//! whole collection; a snapshot taken on entry backs `undo`.
//!
//! When an engine reports [`Teardown::Deferred`] from `disable`, no new tool
//! is acquired until [`DrawController::confirm_teardown`] is called. This
//! keeps two tools from ever being attached at once.
//!
//! ```text
//!            toggle_shape(s)                 toggle_action(a)
//!   ┌──────┐ ───────────────► ┌───────┐      ┌──────┐ ─────────► ┌─────────────┐
//!   │ Idle │                  │ Shape │      │ Idle │            │ Edit/Delete │
//!   └──────┘ ◄─────────────── └───────┘      └──────┘ ◄───────── └─────────────┘
//!        toggle_shape(s) / Created         toggle_action(a) [save] / undo [revert]
//! ```

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::consts::{DEFAULT_STROKE_WEIGHT, DRAW_ERROR_COLOR, DRAW_SHAPE_COLOR};
use crate::engine::{DrawTool, DrawToolFactory, ShapeId, Teardown};
use crate::error::TransitionError;
use crate::geo::{Feature, FeatureCollection, Geometry, LatLng, LatLngBounds};

// =============================================================
// Modes
// =============================================================

/// A shape the toolbar can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawShape {
    Marker,
    Polyline,
    Circle,
    Rectangle,
    Polygon,
}

impl DrawShape {
    pub const ALL: [Self; 5] = [Self::Marker, Self::Polyline, Self::Circle, Self::Rectangle, Self::Polygon];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Polyline => "polyline",
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
        }
    }

    #[must_use]
    pub fn mode(self) -> DrawMode {
        match self {
            Self::Marker => DrawMode::Marker,
            Self::Polyline => DrawMode::Polyline,
            Self::Circle => DrawMode::Circle,
            Self::Rectangle => DrawMode::Rectangle,
            Self::Polygon => DrawMode::Polygon,
        }
    }
}

/// A collection-wide action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawAction {
    Edit,
    Delete,
}

impl DrawAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    #[must_use]
    pub fn mode(self) -> DrawMode {
        match self {
            Self::Edit => DrawMode::Edit,
            Self::Delete => DrawMode::Delete,
        }
    }
}

/// The toolbar's single active mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    #[default]
    Idle,
    Marker,
    Polyline,
    Circle,
    Rectangle,
    Polygon,
    Edit,
    Delete,
}

impl DrawMode {
    #[must_use]
    pub fn shape(self) -> Option<DrawShape> {
        match self {
            Self::Marker => Some(DrawShape::Marker),
            Self::Polyline => Some(DrawShape::Polyline),
            Self::Circle => Some(DrawShape::Circle),
            Self::Rectangle => Some(DrawShape::Rectangle),
            Self::Polygon => Some(DrawShape::Polygon),
            Self::Idle | Self::Edit | Self::Delete => None,
        }
    }

    #[must_use]
    pub fn action(self) -> Option<DrawAction> {
        match self {
            Self::Edit => Some(DrawAction::Edit),
            Self::Delete => Some(DrawAction::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// A shape tool is active.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        self.shape().is_some()
    }

    /// An edit or delete tool is active.
    #[must_use]
    pub fn is_editing(self) -> bool {
        self.action().is_some()
    }
}

// =============================================================
// Tool options
// =============================================================

/// Stroke of shapes produced by a drawing tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeOptions {
    pub color: String,
    pub opacity: f64,
    pub weight: f64,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self { color: DRAW_SHAPE_COLOR.to_owned(), opacity: 1.0, weight: DEFAULT_STROKE_WEIGHT }
    }
}

/// Options forwarded to the engine when a shape tool is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOptions {
    #[serde(default)]
    pub shape_options: ShapeOptions,
    /// Polyline: show the running length while drawing.
    #[serde(default)]
    pub show_length: bool,
    /// Circle: show the radius while drawing.
    #[serde(default)]
    pub show_radius: bool,
    /// Rectangle: show the area while drawing.
    #[serde(default)]
    pub show_area: bool,
    /// Colour flashed when the engine rejects a vertex.
    #[serde(default = "default_draw_error_color")]
    pub draw_error_color: String,
}

fn default_draw_error_color() -> String {
    DRAW_ERROR_COLOR.to_owned()
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            shape_options: ShapeOptions::default(),
            show_length: false,
            show_radius: false,
            show_area: false,
            draw_error_color: default_draw_error_color(),
        }
    }
}

// =============================================================
// Drawn shapes
// =============================================================

/// Geometry of a user-drawn shape as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeGeometry {
    Marker { position: LatLng },
    Polyline { points: Vec<LatLng> },
    Circle { center: LatLng, radius_m: f64 },
    Rectangle { bounds: LatLngBounds },
    Polygon { ring: Vec<LatLng> },
}

impl ShapeGeometry {
    #[must_use]
    pub fn kind(&self) -> DrawShape {
        match self {
            Self::Marker { .. } => DrawShape::Marker,
            Self::Polyline { .. } => DrawShape::Polyline,
            Self::Circle { .. } => DrawShape::Circle,
            Self::Rectangle { .. } => DrawShape::Rectangle,
            Self::Polygon { .. } => DrawShape::Polygon,
        }
    }

    /// GeoJSON geometry. Circles export as their centre point; rings are
    /// closed.
    #[must_use]
    pub fn to_geometry(&self) -> Geometry {
        match self {
            Self::Marker { position } | Self::Circle { center: position, .. } => {
                Geometry::Point { coordinates: position.to_position() }
            }
            Self::Polyline { points } => Geometry::LineString {
                coordinates: points.iter().map(|p| p.to_position()).collect(),
            },
            Self::Rectangle { bounds } => {
                let sw = bounds.south_west;
                let ne = bounds.north_east;
                let ring = [sw, LatLng::new(sw.lat, ne.lng), ne, LatLng::new(ne.lat, sw.lng)];
                Geometry::Polygon { coordinates: vec![closed_ring(&ring)] }
            }
            Self::Polygon { ring } => Geometry::Polygon { coordinates: vec![closed_ring(ring)] },
        }
    }
}

fn closed_ring(points: &[LatLng]) -> Vec<Vec<f64>> {
    let mut ring: Vec<Vec<f64>> = points.iter().map(|p| p.to_position()).collect();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if first != last {
            ring.push(first.to_position());
        }
    }
    ring
}

/// One user-drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnShape {
    /// Stable identity for export.
    pub id: Uuid,
    /// Engine handle of the rendered shape.
    pub shape: ShapeId,
    pub geometry: ShapeGeometry,
}

impl DrawnShape {
    #[must_use]
    pub fn to_feature(&self) -> Feature {
        let mut properties = Map::new();
        properties.insert("shape".to_owned(), json!(self.geometry.kind().as_str()));
        if let ShapeGeometry::Circle { radius_m, .. } = self.geometry {
            properties.insert("radius".to_owned(), json!(radius_m));
        }
        Feature {
            id: Some(Value::String(self.id.to_string())),
            geometry: Some(self.geometry.to_geometry()),
            properties: Some(properties),
        }
    }
}

/// The live set of drawn shapes shared by every drawing tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawnShapeCollection {
    shapes: Vec<DrawnShape>,
}

impl DrawnShapeCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawnShape> {
        self.shapes.iter()
    }

    #[must_use]
    pub fn get(&self, shape: ShapeId) -> Option<&DrawnShape> {
        self.shapes.iter().find(|s| s.shape == shape)
    }

    /// Append a new shape and return its export id.
    pub fn push(&mut self, shape: ShapeId, geometry: ShapeGeometry) -> Uuid {
        let id = Uuid::new_v4();
        self.shapes.push(DrawnShape { id, shape, geometry });
        id
    }

    /// Replace a shape's geometry in place. Returns `false` for unknown ids.
    pub fn update(&mut self, shape: ShapeId, geometry: ShapeGeometry) -> bool {
        match self.shapes.iter_mut().find(|s| s.shape == shape) {
            Some(existing) => {
                existing.geometry = geometry;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, shape: ShapeId) -> Option<DrawnShape> {
        let index = self.shapes.iter().position(|s| s.shape == shape)?;
        Some(self.shapes.remove(index))
    }

    /// Export every shape as a GeoJSON feature collection.
    #[must_use]
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection { features: self.shapes.iter().map(DrawnShape::to_feature).collect() }
    }
}

// =============================================================
// Engine events
// =============================================================

/// Notifications from the engine's drawing plugin.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// A shape tool finished a shape.
    Created { shape: ShapeId, geometry: ShapeGeometry },
    /// A shape changed while the edit tool is active (not yet saved).
    Reshaped { shape: ShapeId, geometry: ShapeGeometry },
    /// A shape was removed while the delete tool is active (not yet saved).
    Removed { shape: ShapeId },
    /// Edits were saved; carries the final geometry of every edited shape.
    Edited { shapes: Vec<(ShapeId, ShapeGeometry)> },
    /// Deletions were saved.
    Deleted { shapes: Vec<ShapeId> },
    /// The active tool reported an error.
    ToolError { message: String },
}

// =============================================================
// Scoped tool acquisition
// =============================================================

/// An enabled engine tool bound to one draw mode.
///
/// Dropping the guard disables the tool unless it was already released.
pub struct ActiveTool {
    mode: DrawMode,
    tool: Box<dyn DrawTool>,
    released: bool,
}

impl ActiveTool {
    /// Enable `tool` and take ownership of it for `mode`.
    #[must_use]
    pub fn acquire(mode: DrawMode, mut tool: Box<dyn DrawTool>) -> Self {
        tool.enable();
        Self { mode, tool, released: false }
    }

    #[must_use]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn save(&mut self) {
        self.tool.save();
    }

    pub fn revert(&mut self) {
        self.tool.revert();
    }

    /// Disable the tool now and report how teardown went.
    pub fn release(mut self) -> Teardown {
        self.released = true;
        self.tool.disable()
    }
}

impl Drop for ActiveTool {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            self.tool.disable();
        }
    }
}

// =============================================================
// Toolbar view state
// =============================================================

/// Render state of one toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

// =============================================================
// Controller
// =============================================================

/// Callback invoked with the collection whenever drawn geometry changes.
pub type ShapesChanged = Box<dyn FnMut(&DrawnShapeCollection)>;

/// Owner of the drawn-shape collection and the active draw mode.
pub struct DrawController {
    factory: Option<Box<dyn DrawToolFactory>>,
    shape_options: BTreeMap<DrawShape, DrawOptions>,
    mode: DrawMode,
    tool: Option<ActiveTool>,
    teardown_pending: bool,
    shapes: DrawnShapeCollection,
    snapshot: Option<DrawnShapeCollection>,
    shape_count: usize,
    last_error: Option<String>,
    on_change: Option<ShapesChanged>,
}

impl Default for DrawController {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawController {
    /// A controller with no engine attached yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factory: None,
            shape_options: BTreeMap::new(),
            mode: DrawMode::Idle,
            tool: None,
            teardown_pending: false,
            shapes: DrawnShapeCollection::new(),
            snapshot: None,
            shape_count: 0,
            last_error: None,
            on_change: None,
        }
    }

    #[must_use]
    pub fn with_factory(factory: Box<dyn DrawToolFactory>) -> Self {
        let mut controller = Self::new();
        controller.attach_factory(factory);
        controller
    }

    /// Attach the engine once its drawing plugin has loaded.
    pub fn attach_factory(&mut self, factory: Box<dyn DrawToolFactory>) {
        self.factory = Some(factory);
    }

    #[must_use]
    pub fn has_engine(&self) -> bool {
        self.factory.is_some()
    }

    /// Register the collaborator notified after every create, edit, delete
    /// or undo.
    pub fn set_on_change(&mut self, callback: ShapesChanged) {
        self.on_change = Some(callback);
    }

    /// Override the tool options for one shape.
    pub fn set_shape_options(&mut self, shape: DrawShape, options: DrawOptions) {
        self.shape_options.insert(shape, options);
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    #[must_use]
    pub fn shapes(&self) -> &DrawnShapeCollection {
        &self.shapes
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shape_count
    }

    /// Last tool error, shown until the next activation.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_teardown_pending(&self) -> bool {
        self.teardown_pending
    }

    /// Undo is offered while editing or deleting a non-empty collection
    /// (as it was when the action started).
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.mode.is_editing() && self.snapshot.as_ref().is_some_and(|s| !s.is_empty())
    }

    // --- Transitions ---

    /// Shape button click.
    ///
    /// # Errors
    ///
    /// Rejected while editing or deleting, while a previous tool is still
    /// tearing down, or before the engine is attached.
    pub fn toggle_shape(&mut self, shape: DrawShape) -> Result<DrawMode, TransitionError> {
        let target = shape.mode();
        if self.mode == target {
            self.enter_idle();
            return Ok(self.mode);
        }
        if self.mode.is_editing() {
            log::warn!("draw: rejected {shape:?} while {:?} is active", self.mode);
            return Err(TransitionError::ShapeBlocked { shape, active: self.mode });
        }
        self.enter_idle();
        self.ensure_can_acquire()?;
        let options = self.shape_options.get(&shape).cloned().unwrap_or_default();
        let Some(factory) = self.factory.as_mut() else {
            return Err(TransitionError::EngineUnavailable);
        };
        let tool = factory.shape_tool(shape, &options);
        self.enter(target, tool);
        Ok(self.mode)
    }

    /// Edit/delete button click. A second click on the active action saves.
    ///
    /// # Errors
    ///
    /// Rejected while a shape tool is drawing, when the collection is empty,
    /// while a previous tool is still tearing down, or before the engine is
    /// attached. Switching straight from the other action discards its
    /// unsaved changes first.
    pub fn toggle_action(&mut self, action: DrawAction) -> Result<DrawMode, TransitionError> {
        let target = action.mode();
        if self.mode == target {
            if let Some(tool) = self.tool.as_mut() {
                tool.save();
            }
            self.snapshot = None;
            self.enter_idle();
            return Ok(self.mode);
        }
        if self.mode.is_drawing() {
            log::warn!("draw: rejected {action:?} while {:?} is active", self.mode);
            return Err(TransitionError::ActionBlocked { action, active: self.mode });
        }
        self.discard_uncommitted();
        self.enter_idle();
        self.recount();
        if self.shapes.is_empty() {
            log::warn!("draw: rejected {action:?} with no drawn shapes");
            return Err(TransitionError::EmptyCollection(action));
        }
        self.ensure_can_acquire()?;
        let Some(factory) = self.factory.as_mut() else {
            return Err(TransitionError::EngineUnavailable);
        };
        let tool = factory.action_tool(action);
        self.snapshot = Some(self.shapes.clone());
        self.enter(target, tool);
        Ok(self.mode)
    }

    /// Undo button click: revert the active edit/delete tool and return to
    /// `Idle` with the pre-action geometry.
    ///
    /// # Errors
    ///
    /// [`TransitionError::UndoUnavailable`] outside edit/delete.
    pub fn undo(&mut self) -> Result<(), TransitionError> {
        if !self.can_undo() {
            return Err(TransitionError::UndoUnavailable(self.mode));
        }
        if let Some(tool) = self.tool.as_mut() {
            tool.revert();
        }
        let changed = self.restore_snapshot();
        self.enter_idle();
        self.recount();
        log::debug!("draw: undo restored {} shapes", self.shape_count);
        if changed {
            self.notify();
        }
        Ok(())
    }

    /// Apply one engine notification.
    pub fn handle_event(&mut self, event: DrawEvent) {
        match event {
            DrawEvent::Created { shape, geometry } => {
                let kind = geometry.kind();
                self.shapes.push(shape, geometry);
                // Only the tool that produced the shape is finished; a late
                // event must not close a tool the user has since switched to.
                if self.mode.shape() == Some(kind) {
                    self.enter_idle();
                } else {
                    log::warn!("draw: {} created while in {:?}", kind.as_str(), self.mode);
                }
                self.recount();
                self.notify();
            }
            DrawEvent::Reshaped { shape, geometry } => {
                if !self.shapes.update(shape, geometry) {
                    log::warn!("draw: reshaped unknown shape {shape:?}");
                }
                self.recount();
            }
            DrawEvent::Removed { shape } => {
                if self.shapes.remove(shape).is_none() {
                    log::warn!("draw: removed unknown shape {shape:?}");
                }
                self.recount();
            }
            DrawEvent::Edited { shapes } => {
                for (shape, geometry) in shapes {
                    if !self.shapes.update(shape, geometry) {
                        log::warn!("draw: edited unknown shape {shape:?}");
                    }
                }
                self.snapshot = None;
                self.enter_idle();
                self.recount();
                self.notify();
            }
            DrawEvent::Deleted { shapes } => {
                for shape in shapes {
                    self.shapes.remove(shape);
                }
                self.snapshot = None;
                self.enter_idle();
                self.recount();
                self.notify();
            }
            DrawEvent::ToolError { message } => {
                log::warn!("draw: tool error in {:?}: {message}", self.mode);
                self.last_error = Some(message);
                self.discard_uncommitted();
                self.enter_idle();
                self.recount();
            }
        }
    }

    /// The engine finished detaching a tool that reported a deferred teardown.
    pub fn confirm_teardown(&mut self) {
        if self.teardown_pending {
            log::debug!("draw: teardown confirmed");
        }
        self.teardown_pending = false;
    }

    /// Owner is going away: discard uncommitted edits and release the tool.
    pub fn teardown(&mut self) {
        self.discard_uncommitted();
        self.enter_idle();
        self.recount();
    }

    // --- Toolbar view state ---

    #[must_use]
    pub fn shape_button(&self, shape: DrawShape) -> ButtonState {
        ButtonState {
            label: format!("Draw {}", shape.as_str()),
            active: self.mode == shape.mode(),
            disabled: self.mode.is_editing(),
        }
    }

    #[must_use]
    pub fn action_button(&self, action: DrawAction) -> ButtonState {
        let active = self.mode == action.mode();
        let verb = match action {
            DrawAction::Edit => "Edit",
            DrawAction::Delete => "Remove",
        };
        ButtonState {
            label: format!("{verb} shapes"),
            active,
            disabled: !active && (self.shape_count == 0 || self.mode.is_drawing()),
        }
    }

    #[must_use]
    pub fn undo_button(&self) -> ButtonState {
        let label = match self.mode.action() {
            Some(action) => format!("Undo {}", action.as_str()),
            None => "Undo".to_owned(),
        };
        ButtonState { label, active: false, disabled: !self.can_undo() }
    }

    // --- Internals ---

    fn ensure_can_acquire(&self) -> Result<(), TransitionError> {
        if self.teardown_pending {
            log::warn!("draw: previous tool teardown not confirmed");
            return Err(TransitionError::TeardownPending);
        }
        Ok(())
    }

    fn enter(&mut self, mode: DrawMode, tool: Box<dyn DrawTool>) {
        log::debug!("draw: {:?} -> {mode:?}", self.mode);
        self.last_error = None;
        self.tool = Some(ActiveTool::acquire(mode, tool));
        self.mode = mode;
    }

    fn enter_idle(&mut self) {
        if let Some(tool) = self.tool.take() {
            if tool.release() == Teardown::Deferred {
                log::debug!("draw: tool teardown deferred");
                self.teardown_pending = true;
            }
        }
        if !self.mode.is_idle() {
            log::debug!("draw: {:?} -> Idle", self.mode);
        }
        self.mode = DrawMode::Idle;
    }

    /// Roll back an in-progress edit/delete that was never saved.
    fn discard_uncommitted(&mut self) {
        if self.mode.is_editing() {
            if let Some(tool) = self.tool.as_mut() {
                tool.revert();
            }
            self.restore_snapshot();
        }
    }

    fn restore_snapshot(&mut self) -> bool {
        match self.snapshot.take() {
            Some(snapshot) => {
                let changed = snapshot != self.shapes;
                self.shapes = snapshot;
                changed
            }
            None => false,
        }
    }

    fn recount(&mut self) {
        self.shape_count = self.shapes.len();
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.shapes);
        }
    }
}
