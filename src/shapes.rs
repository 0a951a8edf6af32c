//! Static vector shapes declared by the application.
//!
//! Unlike features and drawn shapes these are never selected or edited;
//! they are styled by class, with an optional explicit [`PathStyle`].

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use serde::{Deserialize, Serialize};

use crate::consts::SHAPE_CLASS;
use crate::controls::class_names;
use crate::engine::PathStyle;
use crate::geo::{LatLng, LatLngBounds};

/// Geometry of a static shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StaticShape {
    /// Radius in metres; scales with the map.
    Circle { center: LatLng, radius_m: f64 },
    /// Radius in pixels; constant on screen.
    CircleMarker { center: LatLng, radius_px: f64 },
    Polyline { points: Vec<LatLng> },
    Polygon { ring: Vec<LatLng> },
    Rectangle { bounds: LatLngBounds },
}

impl StaticShape {
    /// Engine factory building this shape.
    #[must_use]
    pub fn factory(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::CircleMarker { .. } => "circleMarker",
            Self::Polyline { .. } => "polyline",
            Self::Polygon { .. } => "polygon",
            Self::Rectangle { .. } => "rectangle",
        }
    }
}

/// A static shape with its presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticShapeOptions {
    pub shape: StaticShape,
    /// Extra classes after the shared shape class.
    #[serde(default)]
    pub class_name: String,
    /// Explicit colours; `None` leaves styling to the class.
    #[serde(default)]
    pub style: Option<PathStyle>,
}

impl StaticShapeOptions {
    #[must_use]
    pub fn new(shape: StaticShape) -> Self {
        Self { shape, class_name: String::new(), style: None }
    }

    #[must_use]
    pub fn class_list(&self) -> String {
        class_names(SHAPE_CLASS, &self.class_name)
    }
}
