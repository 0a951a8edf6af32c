//! Error types for the map control layer.
//!
//! Configuration errors are integration bugs and are returned to the caller
//! unchanged. Everything else (rejected transitions, failed datasets,
//! geolocation failures) is recoverable and leaves state consistent.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::draw::{DrawAction, DrawMode, DrawShape};

/// Invalid explicit defaults supplied to the layer registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The default tile layer does not name any registered tile layer.
    #[error("invalid default tile layer \"{0}\": it must match a registered tile layer name")]
    UnknownDefaultTileLayer(String),
    /// One or more default layer groups do not name a registered group.
    #[error("invalid default layer groups {0:?}: every name must match a registered layer group")]
    UnknownDefaultLayerGroups(Vec<String>),
}

/// A drawing toolbar request that the state machine refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// A shape tool was requested while editing or deleting.
    #[error("cannot draw {shape:?} while {active:?} is active")]
    ShapeBlocked { shape: DrawShape, active: DrawMode },
    /// An edit/delete tool was requested while a shape tool is drawing.
    #[error("cannot start {action:?} while {active:?} is active")]
    ActionBlocked { action: DrawAction, active: DrawMode },
    /// Edit/delete requested with nothing drawn.
    #[error("cannot start {0:?} with no drawn shapes")]
    EmptyCollection(DrawAction),
    /// Undo requested outside edit/delete or with nothing drawn.
    #[error("nothing to undo in mode {0:?}")]
    UndoUnavailable(DrawMode),
    /// The previous tool has not confirmed its teardown yet.
    #[error("previous drawing tool is still tearing down")]
    TeardownPending,
    /// The engine has not been loaded, so no tool can be constructed.
    #[error("drawing engine is not loaded")]
    EngineUnavailable,
}

/// Failure while loading the mapping engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// Loading was requested outside a browser.
    #[error("mapping engine can only be loaded in a browser")]
    NotInBrowser,
    /// The engine or one of its plugins failed to load.
    #[error("failed to load {module}: {message}")]
    LoadFailed { module: String, message: String },
}

/// Failure reported for one remote dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    /// The request returned a non-success status.
    #[error("failed to load {url}: HTTP {status}")]
    Status { url: String, status: u16 },
    /// The request could not be sent or was interrupted.
    #[error("failed to load {url}: {message}")]
    Network { url: String, message: String },
    /// The response body is not a feature collection.
    #[error("failed to parse {url}: {message}")]
    Parse { url: String, message: String },
}

/// Failure reported by the engine's geolocation service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("geolocation error {code}: {message}")]
pub struct LocateError {
    /// Engine/browser error code (1 = denied, 2 = unavailable, 3 = timeout).
    pub code: u16,
    /// Human-readable reason.
    pub message: String,
}
