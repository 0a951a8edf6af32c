//! Geographic primitives and GeoJSON-style feature types.
//!
//! Feature collections arrive from data-source collaborators as JSON following
//! the standard geometry + properties layout. Positions are `[lng, lat, ...]`
//! arrays as on the wire; [`LatLng`] is the engine-facing coordinate.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from a GeoJSON position (`[lng, lat, ...]`). Returns `None` for
    /// positions with fewer than two components.
    #[must_use]
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Some(Self { lat: *lat, lng: *lng }),
            _ => None,
        }
    }

    /// GeoJSON position for this coordinate.
    #[must_use]
    pub fn to_position(self) -> Position {
        vec![self.lng, self.lat]
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Bounds covering a single point.
    #[must_use]
    pub fn from_point(point: LatLng) -> Self {
        Self { south_west: point, north_east: point }
    }

    /// Grow to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Finite corners in south-west / north-east order.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.south_west.is_finite()
            && self.north_east.is_finite()
            && self.south_west.lat <= self.north_east.lat
            && self.south_west.lng <= self.north_east.lng
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south_west.lat + self.north_east.lat) * 0.5,
            lng: (self.south_west.lng + self.north_east.lng) * 0.5,
        }
    }

    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// Fold points into bounds. `None` when no finite point was seen.
#[must_use]
pub fn bounds_of<I>(points: I) -> Option<LatLngBounds>
where
    I: IntoIterator<Item = LatLng>,
{
    points
        .into_iter()
        .filter(|p| p.is_finite())
        .fold(None, |acc: Option<LatLngBounds>, p| match acc {
            None => Some(LatLngBounds::from_point(p)),
            Some(mut b) => {
                b.extend(p);
                Some(b)
            }
        })
}

/// A GeoJSON position: `[lng, lat]` or `[lng, lat, alt]`.
pub type Position = Vec<f64>;

/// Property bag attached to a feature.
pub type Properties = Map<String, Value>;

/// GeoJSON geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Every coordinate in the geometry, depth-first.
    #[must_use]
    pub fn points(&self) -> Vec<LatLng> {
        let mut out = Vec::new();
        self.collect_points(&mut out);
        out
    }

    fn collect_points(&self, out: &mut Vec<LatLng>) {
        match self {
            Self::Point { coordinates } => out.extend(LatLng::from_position(coordinates)),
            Self::MultiPoint { coordinates } | Self::LineString { coordinates } => {
                out.extend(coordinates.iter().filter_map(|p| LatLng::from_position(p)));
            }
            Self::MultiLineString { coordinates } | Self::Polygon { coordinates } => {
                for line in coordinates {
                    out.extend(line.iter().filter_map(|p| LatLng::from_position(p)));
                }
            }
            Self::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    for ring in polygon {
                        out.extend(ring.iter().filter_map(|p| LatLng::from_position(p)));
                    }
                }
            }
            Self::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.collect_points(out);
                }
            }
        }
    }
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl Feature {
    /// Look up a property. Missing property bags behave as empty.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }
}

/// An ordered GeoJSON feature collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Parse a collection from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed or non-collection input.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Bounding box of every feature geometry, or `None` when there are no
    /// finite coordinates.
    #[must_use]
    pub fn bounds(&self) -> Option<LatLngBounds> {
        bounds_of(
            self.features
                .iter()
                .filter_map(|f| f.geometry.as_ref())
                .flat_map(Geometry::points),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
