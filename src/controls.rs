//! View models for the small map controls (zoom, fullscreen) and for the
//! tooltips and popups bound to map layers.

#[cfg(test)]
#[path = "controls_test.rs"]
mod controls_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TOOLTIP_SIDE_OFFSET, POPUP_CLASS, TOOLTIP_ARROW_CLASS, TOOLTIP_CLASS};
use crate::engine::MapView;

// =============================================================
// Zoom
// =============================================================

/// Zoom buttons, refreshed from the engine on every zoom-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomControlModel {
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl ZoomControlModel {
    #[must_use]
    pub fn from_view(view: &dyn MapView) -> Self {
        Self { zoom: view.zoom(), min_zoom: view.min_zoom(), max_zoom: view.max_zoom() }
    }

    /// Engine finished a zoom animation.
    pub fn on_zoom_end(&mut self, view: &dyn MapView) {
        *self = Self::from_view(view);
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.zoom < self.max_zoom
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.zoom > self.min_zoom
    }

    /// Returns `false` when already at the maximum.
    pub fn zoom_in(&self, view: &mut dyn MapView) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        view.zoom_in();
        true
    }

    /// Returns `false` when already at the minimum.
    pub fn zoom_out(&self, view: &mut dyn MapView) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        view.zoom_out();
        true
    }
}

// =============================================================
// Fullscreen
// =============================================================

/// Fullscreen button. Clicks go straight to [`MapView::toggle_fullscreen`];
/// the engine's enter/exit events are the source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullscreenState {
    is_fullscreen: bool,
}

impl FullscreenState {
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn on_enter(&mut self) {
        self.is_fullscreen = true;
    }

    pub fn on_exit(&mut self) {
        self.is_fullscreen = false;
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_fullscreen { "Exit fullscreen" } else { "Enter fullscreen" }
    }
}

// =============================================================
// Tooltips
// =============================================================

/// Which side of its anchor a tooltip opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipSide {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl TooltipSide {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// Pixel offset `(x, y)` pushing the tooltip `side_offset` away from its
    /// anchor. Screen y grows downwards.
    #[must_use]
    pub fn offset(self, side_offset: f64) -> (f64, f64) {
        match self {
            Self::Top => (0.0, -side_offset),
            Self::Bottom => (0.0, side_offset),
            Self::Left => (-side_offset, 0.0),
            Self::Right => (side_offset, 0.0),
        }
    }

    #[must_use]
    pub fn default_offset(self) -> (f64, f64) {
        self.offset(DEFAULT_TOOLTIP_SIDE_OFFSET)
    }
}

fn default_side_offset() -> f64 {
    DEFAULT_TOOLTIP_SIDE_OFFSET
}

/// A tooltip bound to a marker or shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipBinding {
    #[serde(default)]
    pub side: TooltipSide,
    #[serde(default = "default_side_offset")]
    pub side_offset: f64,
    /// Extra classes after the shared tooltip class.
    #[serde(default)]
    pub class_name: String,
}

impl Default for TooltipBinding {
    fn default() -> Self {
        Self { side: TooltipSide::default(), side_offset: DEFAULT_TOOLTIP_SIDE_OFFSET, class_name: String::new() }
    }
}

impl TooltipBinding {
    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        self.side.offset(self.side_offset)
    }

    #[must_use]
    pub fn class_list(&self) -> String {
        class_names(TOOLTIP_CLASS, &self.class_name)
    }

    /// Class of the arrow pointing back at the anchor.
    #[must_use]
    pub fn arrow_class(&self) -> String {
        format!("{TOOLTIP_ARROW_CLASS} {TOOLTIP_ARROW_CLASS}--{}", self.side.as_str())
    }
}

// =============================================================
// Popups
// =============================================================

/// Class list of a popup bound to a marker or shape.
#[must_use]
pub fn popup_class(extra: &str) -> String {
    class_names(POPUP_CLASS, extra)
}

/// `base` followed by the whitespace-separated classes in `extra`.
#[must_use]
pub fn class_names(base: &str, extra: &str) -> String {
    let mut out = base.to_owned();
    for class in extra.split_whitespace() {
        out.push(' ');
        out.push_str(class);
    }
    out
}
