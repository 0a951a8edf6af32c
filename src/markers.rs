//! Point markers with HTML icons, and marker clustering.
//!
//! Icons are plain HTML handed to the engine's div icon. A cluster group
//! asks [`ClusterGroupOptions::icon_for`] for the icon of each cluster it
//! draws, passing the number of markers the cluster stands for.

#[cfg(test)]
#[path = "markers_test.rs"]
mod markers_test;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::{CLUSTER_BADGE_CLASS, DEFAULT_MARKER_ICON_ANCHOR, MARKER_PIN_HTML, SHAPE_CLASS};
use crate::geo::LatLng;

/// Pixel offset `(x, y)` from an icon's top-left corner.
pub type IconPoint = (f64, f64);

// =============================================================
// Icons
// =============================================================

/// HTML icon of a marker or cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub html: String,
    /// Icon point placed on the marker's position. `None` centres the icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_anchor: Option<IconPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_pos: Option<IconPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_anchor: Option<IconPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_anchor: Option<IconPoint>,
}

impl MarkerIcon {
    /// A marker icon anchored like the default pin.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { icon_anchor: Some(DEFAULT_MARKER_ICON_ANCHOR), ..Self::html_only(html) }
    }

    /// Just the markup, every anchor left to the engine.
    #[must_use]
    pub fn html_only(html: impl Into<String>) -> Self {
        Self { html: html.into(), icon_anchor: None, bg_pos: None, popup_anchor: None, tooltip_anchor: None }
    }

    #[must_use]
    pub fn with_popup_anchor(mut self, anchor: IconPoint) -> Self {
        self.popup_anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_tooltip_anchor(mut self, anchor: IconPoint) -> Self {
        self.tooltip_anchor = Some(anchor);
        self
    }
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self::new(MARKER_PIN_HTML)
    }
}

fn default_rise_on_hover() -> bool {
    true
}

/// A marker at a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOptions {
    pub position: LatLng,
    #[serde(default)]
    pub icon: MarkerIcon,
    /// Browser tooltip text.
    #[serde(default)]
    pub title: Option<String>,
    /// Bring the marker above its neighbours while hovered.
    #[serde(default = "default_rise_on_hover")]
    pub rise_on_hover: bool,
}

impl MarkerOptions {
    #[must_use]
    pub fn at(position: LatLng) -> Self {
        Self { position, icon: MarkerIcon::default(), title: None, rise_on_hover: true }
    }
}

// =============================================================
// Clusters
// =============================================================

/// Markup of a cluster icon for the given child count.
pub type ClusterIconFn = Rc<dyn Fn(usize) -> String>;

/// How a cluster group draws its clusters.
#[derive(Clone)]
pub struct ClusterGroupOptions {
    /// Class of the outline shown while hovering a cluster.
    pub polygon_class: String,
    /// Class of the legs joining spiderfied markers to their centre.
    pub spider_leg_class: String,
    icon: Option<ClusterIconFn>,
}

impl Default for ClusterGroupOptions {
    fn default() -> Self {
        Self { polygon_class: SHAPE_CLASS.to_owned(), spider_leg_class: SHAPE_CLASS.to_owned(), icon: None }
    }
}

impl fmt::Debug for ClusterGroupOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterGroupOptions")
            .field("polygon_class", &self.polygon_class)
            .field("spider_leg_class", &self.spider_leg_class)
            .field("icon", &self.icon.as_ref().map(|_| "custom"))
            .finish()
    }
}

impl ClusterGroupOptions {
    /// Draw every cluster with `icon(child_count)`.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Fn(usize) -> String + 'static) -> Self {
        self.icon = Some(Rc::new(icon));
        self
    }

    #[must_use]
    pub fn has_custom_icon(&self) -> bool {
        self.icon.is_some()
    }

    /// Icon for a cluster of `count` markers, or `None` to keep the engine's
    /// own cluster icon.
    #[must_use]
    pub fn icon_for(&self, count: usize) -> Option<MarkerIcon> {
        self.icon.as_ref().map(|icon| MarkerIcon::html_only(icon(count)))
    }
}

/// Round badge showing a cluster's child count.
#[must_use]
pub fn count_badge(count: usize) -> String {
    let label = if count >= 1000 { format!("{}k", count / 1000) } else { count.to_string() };
    format!("<span class=\"{CLUSTER_BADGE_CLASS}\" aria-label=\"{count} markers\">{label}</span>")
}
