//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser and engine concerns from component logic.
//! Only the pure helpers compile natively; the Leaflet bindings and network
//! code are part of the `hydrate` build.

pub mod engine_loader;
#[cfg(feature = "hydrate")]
pub mod fetch;
#[cfg(feature = "hydrate")]
pub mod leaflet;
pub mod leaflet_options;
pub mod map_handle;
pub mod theme;
