//! Vector feature layer: single-shape selection, highlight and fit-once.
//!
//! DESIGN
//! ======
//! The engine renders one shape per feature and owns those shapes. This layer
//! only remembers which [`ShapeId`] is selected and restyles through
//! [`ShapeStyler`]. Viewport fitting is keyed on the identity of the data
//! (`Rc::ptr_eq`), never on its contents, so re-rendering the same dataset
//! does not fight the user's panning.

#[cfg(test)]
#[path = "feature_layer_test.rs"]
mod feature_layer_test;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::{SELECTED_FEATURE_COLOR, SELECTED_FEATURE_FILL_OPACITY};
use crate::engine::{FitBoundsOptions, MapView, PathStyle, ShapeId, ShapeStyler};
use crate::geo::{Feature, FeatureCollection, LatLngBounds};
use crate::popup::{PopupConfig, build_popup_html};

/// Behaviour and styling of one vector feature layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureLayerConfig {
    /// Clicking a shape highlights it; double-clicking clears the highlight.
    #[serde(default)]
    pub selectable: bool,
    #[serde(default)]
    pub default_style: PathStyle,
    #[serde(default = "default_selected_style")]
    pub selected_style: PathStyle,
    #[serde(default)]
    pub popup: PopupConfig,
    /// Fit the viewport to the data once per distinct dataset.
    #[serde(default)]
    pub fit_bounds: bool,
    #[serde(default)]
    pub fit_bounds_options: FitBoundsOptions,
}

fn default_selected_style() -> PathStyle {
    PathStyle::solid(SELECTED_FEATURE_COLOR, SELECTED_FEATURE_FILL_OPACITY)
}

impl Default for FeatureLayerConfig {
    fn default() -> Self {
        Self {
            selectable: false,
            default_style: PathStyle::default(),
            selected_style: default_selected_style(),
            popup: PopupConfig::default(),
            fit_bounds: false,
            fit_bounds_options: FitBoundsOptions::default(),
        }
    }
}

/// Selection and fit bookkeeping for a rendered feature collection.
#[derive(Debug, Clone)]
pub struct FeatureLayer {
    config: FeatureLayerConfig,
    data: Option<Rc<FeatureCollection>>,
    last_fitted: Option<Rc<FeatureCollection>>,
    selected: Option<ShapeId>,
}

impl FeatureLayer {
    #[must_use]
    pub fn new(config: FeatureLayerConfig) -> Self {
        Self { config, data: None, last_fitted: None, selected: None }
    }

    #[must_use]
    pub fn config(&self) -> &FeatureLayerConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> Option<&Rc<FeatureCollection>> {
        self.data.as_ref()
    }

    /// The currently highlighted shape.
    #[must_use]
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Hand the layer its data on every render.
    ///
    /// A different reference means the engine re-created every shape, so the
    /// old selection handle is dropped without restyling. When fitting is
    /// enabled, the first time a reference is seen its bounds are fitted;
    /// empty or non-finite bounds are skipped. Returns `true` when a fit was
    /// requested.
    pub fn set_data(&mut self, data: Rc<FeatureCollection>, view: &mut dyn MapView) -> bool {
        let changed = self.data.as_ref().is_none_or(|current| !Rc::ptr_eq(current, &data));
        if changed {
            self.selected = None;
        }
        self.data = Some(Rc::clone(&data));

        if !self.config.fit_bounds {
            return false;
        }
        if self.last_fitted.as_ref().is_some_and(|fitted| Rc::ptr_eq(fitted, &data)) {
            return false;
        }
        self.last_fitted = Some(Rc::clone(&data));

        match data.bounds().filter(LatLngBounds::is_valid) {
            Some(bounds) => {
                log::debug!("fitting viewport to {} features", data.len());
                view.fit_bounds(bounds, &self.config.fit_bounds_options);
                true
            }
            None => {
                log::debug!("feature collection has no valid bounds; not fitting");
                false
            }
        }
    }

    /// Click on a rendered shape.
    ///
    /// Restores the previous selection (if it is another shape) to the
    /// default style before highlighting `shape`. No-op unless selectable.
    pub fn on_click(&mut self, shape: ShapeId, styler: &mut dyn ShapeStyler) -> bool {
        if !self.config.selectable {
            return false;
        }
        if let Some(previous) = self.selected.filter(|previous| *previous != shape) {
            styler.set_style(previous, &self.config.default_style);
        }
        styler.set_style(shape, &self.config.selected_style);
        self.selected = Some(shape);
        true
    }

    /// Unselect trigger: restore the default style and clear the handle.
    pub fn on_double_click(&mut self, styler: &mut dyn ShapeStyler) -> bool {
        if !self.config.selectable {
            return false;
        }
        let Some(previous) = self.selected.take() else {
            return false;
        };
        styler.set_style(previous, &self.config.default_style);
        true
    }

    /// Style a shape should currently be drawn with.
    #[must_use]
    pub fn style_for(&self, shape: ShapeId) -> &PathStyle {
        if self.selected == Some(shape) {
            &self.config.selected_style
        } else {
            &self.config.default_style
        }
    }

    /// Popup markup to bind to the shape rendered for `feature`.
    #[must_use]
    pub fn popup_html(&self, feature: &Feature) -> Option<String> {
        build_popup_html(feature, &self.config.popup)
    }
}
