//! Basemap and overlay-group registry plus the layers control view model.
//!
//! DESIGN
//! ======
//! Registration is first-wins by name and never auto-activates a group. The
//! selected basemap follows the explicit default as soon as that default is
//! registered and falls back to the first registered basemap otherwise, until
//! the user picks one. Explicit defaults that name nothing registered are
//! configuration errors returned from [`LayerRegistry::validate`].

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use serde::{Deserialize, Serialize};

use crate::config::{LayersConfig, Theme};
use crate::error::ConfigError;

/// A selectable basemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayerDescriptor {
    pub name: String,
    pub url: String,
    pub attribution: String,
}

/// An independently toggleable overlay group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerGroupDescriptor {
    pub name: String,
    /// Shown in the control but cannot be toggled.
    #[serde(default)]
    pub disabled: bool,
}

impl LayerGroupDescriptor {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_owned(), disabled: false }
    }
}

/// Registered layers and the current basemap / overlay selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerRegistry {
    tile_layers: Vec<TileLayerDescriptor>,
    layer_groups: Vec<LayerGroupDescriptor>,
    selected_tile_layer: Option<String>,
    selection_pinned: bool,
    active_layer_groups: Vec<String>,
    default_tile_layer: Option<String>,
    default_layer_groups: Vec<String>,
}

impl LayerRegistry {
    /// An empty registry with optional explicit defaults.
    ///
    /// The default groups are active from the start; they are checked against
    /// registered groups by [`Self::validate`].
    #[must_use]
    pub fn new(default_tile_layer: Option<String>, default_layer_groups: Vec<String>) -> Self {
        let default_tile_layer = default_tile_layer.filter(|name| !name.is_empty());
        let mut active = Vec::with_capacity(default_layer_groups.len());
        for name in &default_layer_groups {
            if !active.contains(name) {
                active.push(name.clone());
            }
        }
        Self {
            default_tile_layer,
            active_layer_groups: active,
            default_layer_groups,
            ..Self::default()
        }
    }

    /// Build a registry from an ordered declaration in one batch.
    ///
    /// Defaults are resolved synchronously, so the selection is final when
    /// this returns regardless of declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicit default names no declared layer.
    pub fn from_config(config: &LayersConfig, theme: Theme) -> Result<Self, ConfigError> {
        let mut registry = Self::new(config.default_tile_layer.clone(), config.default_layer_groups.clone());
        for spec in &config.tile_layers {
            registry.register_tile_layer(spec.resolve(theme));
        }
        for group in &config.layer_groups {
            registry.register_layer_group(group.clone());
        }
        registry.validate()?;
        Ok(registry)
    }

    // --- Registration ---

    /// Register a basemap. Returns `false` when the name is already taken, in
    /// which case the earlier registration is kept unchanged.
    pub fn register_tile_layer(&mut self, descriptor: TileLayerDescriptor) -> bool {
        if self.tile_layers.iter().any(|layer| layer.name == descriptor.name) {
            log::debug!("tile layer {:?} already registered; ignoring", descriptor.name);
            return false;
        }
        log::debug!("registering tile layer {:?}", descriptor.name);
        self.tile_layers.push(descriptor);
        self.resolve_selection();
        true
    }

    /// Register an overlay group without activating it. Returns `false` when
    /// the name is already taken.
    pub fn register_layer_group(&mut self, descriptor: LayerGroupDescriptor) -> bool {
        if self.layer_groups.iter().any(|group| group.name == descriptor.name) {
            log::debug!("layer group {:?} already registered; ignoring", descriptor.name);
            return false;
        }
        log::debug!("registering layer group {:?}", descriptor.name);
        self.layer_groups.push(descriptor);
        true
    }

    /// Check explicit defaults against what has been registered so far.
    ///
    /// Each check only applies once at least one layer of its kind exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDefaultTileLayer`] or
    /// [`ConfigError::UnknownDefaultLayerGroups`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(default) = &self.default_tile_layer {
            if !self.tile_layers.is_empty() && !self.has_tile_layer(default) {
                log::error!("default tile layer {default:?} matches no registered tile layer");
                return Err(ConfigError::UnknownDefaultTileLayer(default.clone()));
            }
        }
        if !self.default_layer_groups.is_empty() && !self.layer_groups.is_empty() {
            let unknown: Vec<String> = self
                .default_layer_groups
                .iter()
                .filter(|name| !self.has_layer_group(name))
                .cloned()
                .collect();
            if !unknown.is_empty() {
                log::error!("default layer groups {unknown:?} match no registered layer group");
                return Err(ConfigError::UnknownDefaultLayerGroups(unknown));
            }
        }
        Ok(())
    }

    fn resolve_selection(&mut self) {
        if self.selection_pinned {
            return;
        }
        let resolved = self
            .default_tile_layer
            .as_ref()
            .filter(|name| self.has_tile_layer(name))
            .or_else(|| self.tile_layers.first().map(|layer| &layer.name))
            .cloned();
        self.selected_tile_layer = resolved;
    }

    // --- Setters ---

    /// Select a basemap. The caller supplies a registered name.
    pub fn set_selected_tile_layer(&mut self, name: &str) {
        self.selected_tile_layer = Some(name.to_owned());
        self.selection_pinned = true;
    }

    /// Replace the active overlay set. Duplicate names collapse.
    pub fn set_active_layer_groups(&mut self, names: Vec<String>) {
        let mut active = Vec::with_capacity(names.len());
        for name in names {
            if !active.contains(&name) {
                active.push(name);
            }
        }
        self.active_layer_groups = active;
    }

    /// Check or uncheck one overlay group.
    pub fn toggle_layer_group(&mut self, name: &str, checked: bool) {
        let is_active = self.is_layer_group_active(name);
        if checked && !is_active {
            self.active_layer_groups.push(name.to_owned());
        } else if !checked && is_active {
            self.active_layer_groups.retain(|active| active != name);
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn tile_layers(&self) -> &[TileLayerDescriptor] {
        &self.tile_layers
    }

    #[must_use]
    pub fn layer_groups(&self) -> &[LayerGroupDescriptor] {
        &self.layer_groups
    }

    /// The current basemap name, if any basemap is registered or chosen.
    #[must_use]
    pub fn selected_tile_layer(&self) -> Option<&str> {
        self.selected_tile_layer.as_deref()
    }

    /// The descriptor of the current basemap.
    #[must_use]
    pub fn selected_tile_descriptor(&self) -> Option<&TileLayerDescriptor> {
        let selected = self.selected_tile_layer.as_deref()?;
        self.tile_layers.iter().find(|layer| layer.name == selected)
    }

    #[must_use]
    pub fn active_layer_groups(&self) -> &[String] {
        &self.active_layer_groups
    }

    /// Whether a basemap slot with this name should render.
    #[must_use]
    pub fn is_tile_layer_visible(&self, name: &str) -> bool {
        self.selected_tile_layer.as_deref() == Some(name)
    }

    /// Whether a group slot with this name should render.
    #[must_use]
    pub fn is_layer_group_active(&self, name: &str) -> bool {
        self.active_layer_groups.iter().any(|active| active == name)
    }

    #[must_use]
    pub fn has_tile_layer(&self, name: &str) -> bool {
        self.tile_layers.iter().any(|layer| layer.name == name)
    }

    #[must_use]
    pub fn has_layer_group(&self, name: &str) -> bool {
        self.layer_groups.iter().any(|group| group.name == name)
    }
}

/// One radio row in the basemap section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayerOption {
    pub name: String,
    pub selected: bool,
}

/// One checkbox row in the overlay section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerGroupOption {
    pub name: String,
    pub checked: bool,
    pub disabled: bool,
}

/// What the layers control shows for a given registry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayersControlModel {
    pub tile_layers: Vec<TileLayerOption>,
    pub layer_groups: Vec<LayerGroupOption>,
}

impl LayersControlModel {
    #[must_use]
    pub fn from_registry(registry: &LayerRegistry) -> Self {
        let tile_layers = registry
            .tile_layers()
            .iter()
            .map(|layer| TileLayerOption {
                name: layer.name.clone(),
                selected: registry.is_tile_layer_visible(&layer.name),
            })
            .collect();
        let layer_groups = registry
            .layer_groups()
            .iter()
            .map(|group| LayerGroupOption {
                name: group.name.clone(),
                checked: registry.is_layer_group_active(&group.name),
                disabled: group.disabled,
            })
            .collect();
        Self { tile_layers, layer_groups }
    }

    /// A single basemap offers no choice, so the radio group only appears
    /// with two or more.
    #[must_use]
    pub fn show_tile_layers(&self) -> bool {
        self.tile_layers.len() > 1
    }

    #[must_use]
    pub fn show_layer_groups(&self) -> bool {
        !self.layer_groups.is_empty()
    }

    #[must_use]
    pub fn show_separator(&self) -> bool {
        self.show_tile_layers() && self.show_layer_groups()
    }

    /// Nothing to choose: the control renders nothing.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        !self.show_tile_layers() && !self.show_layer_groups()
    }
}
