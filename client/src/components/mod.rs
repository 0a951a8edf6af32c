//! Reusable map component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `MapLayers` validates the layer configuration and wraps `MapContainer`,
//! which owns the engine instance and mounts every other component as an
//! overlay child once the map exists. State travels as explicit props
//! (`MapSignal`, registry and controller signals); there are no context
//! providers.

pub mod control_button;
pub mod dataset_banner;
pub mod draw_toolbar;
pub mod feature_layer;
pub mod fullscreen_control;
pub mod layer_slots;
pub mod layers_control;
pub mod locate_control;
pub mod map_container;
pub mod map_layers;
pub mod markers;
pub mod overlays;
pub mod search_control;
pub mod vector_shape;
pub mod zoom_control;
