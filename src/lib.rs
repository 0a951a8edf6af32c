//! Map control layer for a browser mapping engine.
//!
//! This crate owns the interactive state that sits on top of an external map
//! renderer: which basemap and overlay groups are visible, which vector shape
//! is highlighted, what the drawing toolbar is doing, and whether the user's
//! location is being tracked. The renderer itself (tiles, projection,
//! hit-testing, drawing handles) is reached only through the traits in
//! [`engine`], so every state machine here runs and is tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`layers`] | Tile-layer / layer-group registry and the layers control model |
//! | [`feature_layer`] | Vector feature layer: selection, highlight, fit-once |
//! | [`popup`] | Escaped popup markup for feature properties |
//! | [`draw`] | Drawing/editing state machine over the drawn-shape collection |
//! | [`locate`] | Debounced geolocation tracking |
//! | [`markers`] | HTML-icon markers and marker cluster icons |
//! | [`shapes`] | Static circles, lines, polygons and rectangles |
//! | [`controls`] | Zoom, fullscreen, tooltip and popup view models |
//! | [`bridge`] | Lazy, de-duplicated engine loading shared by all consumers |
//! | [`datasets`] | Per-source outcome tracking for remote feature collections |
//! | [`engine`] | Collaborator traits implemented by the rendering engine |
//! | [`geo`] | Coordinates, bounds and GeoJSON-style feature types |
//! | [`config`] | Serializable map and layer configuration |
//! | [`error`] | Error types |
//! | [`consts`] | Shared defaults (styles, URLs, delays) |

pub mod bridge;
pub mod config;
pub mod consts;
pub mod controls;
pub mod datasets;
pub mod draw;
pub mod engine;
pub mod error;
pub mod feature_layer;
pub mod geo;
pub mod layers;
pub mod locate;
pub mod markers;
pub mod popup;
pub mod shapes;
