//! Serializable map and layer configuration.
//!
//! An application declares its basemaps and overlay groups once, in order,
//! and hands the result to [`crate::layers::LayerRegistry::from_config`].
//! Everything here deserializes from JSON so the declaration can live in data.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DARK_TILE_URL, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_TILE_ATTRIBUTION, DEFAULT_TILE_LAYER_NAME,
    DEFAULT_TILE_URL, DEFAULT_ZOOM,
};
use crate::geo::LatLng;
use crate::layers::{LayerGroupDescriptor, TileLayerDescriptor};

/// Colour scheme the page is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Initial viewport of the map container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: LatLng,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_max_zoom() -> f64 {
    DEFAULT_MAX_ZOOM
}

fn default_min_zoom() -> f64 {
    DEFAULT_MIN_ZOOM
}

impl MapOptions {
    /// Options centred on `center` with default zoom bounds.
    #[must_use]
    pub fn centered(center: LatLng) -> Self {
        Self {
            center,
            zoom: DEFAULT_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
        }
    }

    /// Initial zoom clamped into `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn clamped_zoom(&self) -> f64 {
        self.zoom.clamp(self.min_zoom, self.max_zoom.max(self.min_zoom))
    }
}

/// A basemap declaration before theme resolution.
///
/// Every field is optional; a bare declaration yields the default Carto
/// basemap named `"Default"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
    #[serde(default)]
    pub dark_url: Option<String>,
    #[serde(default)]
    pub dark_attribution: Option<String>,
}

impl TileLayerSpec {
    /// A named basemap with a fixed URL and attribution.
    #[must_use]
    pub fn new(name: &str, url: &str, attribution: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            url: Some(url.to_owned()),
            attribution: Some(attribution.to_owned()),
            ..Self::default()
        }
    }

    /// Resolve URL and attribution for `theme`.
    ///
    /// Dark: dark URL, else the light URL, else the default dark basemap.
    /// Light: the light URL, else the default light basemap. The dark
    /// attribution is only used when both the theme is dark and it is set.
    #[must_use]
    pub fn resolve(&self, theme: Theme) -> TileLayerDescriptor {
        let name = self.name.clone().unwrap_or_else(|| DEFAULT_TILE_LAYER_NAME.to_owned());
        let url = match theme {
            Theme::Dark => self
                .dark_url
                .as_deref()
                .or(self.url.as_deref())
                .unwrap_or(DEFAULT_DARK_TILE_URL),
            Theme::Light => self.url.as_deref().unwrap_or(DEFAULT_TILE_URL),
        };
        let attribution = match (theme, self.dark_attribution.as_deref()) {
            (Theme::Dark, Some(dark)) => dark,
            _ => self.attribution.as_deref().unwrap_or(DEFAULT_TILE_ATTRIBUTION),
        };
        TileLayerDescriptor { name, url: url.to_owned(), attribution: attribution.to_owned() }
    }
}

/// Ordered declaration of every basemap and overlay group on a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayersConfig {
    /// Basemap selected initially. Must name a declared tile layer.
    #[serde(default)]
    pub default_tile_layer: Option<String>,
    /// Groups switched on initially. Each must name a declared group.
    #[serde(default)]
    pub default_layer_groups: Vec<String>,
    #[serde(default)]
    pub tile_layers: Vec<TileLayerSpec>,
    #[serde(default)]
    pub layer_groups: Vec<LayerGroupDescriptor>,
}

impl LayersConfig {
    /// Parse a declaration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
