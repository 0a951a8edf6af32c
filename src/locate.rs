//! Geolocation tracking with a debounced loading indicator.
//!
//! DESIGN
//! ======
//! Every `start` and `stop` bumps a generation counter and hands the caller a
//! [`LocateToken`]. Engine callbacks and the loading-delay timer carry the
//! token back; anything carrying an old token is ignored. That covers late
//! watch-mode updates after a stop and timers that outlive a fast response.
//!
//! The loading indicator only turns on when the delay timer fires while the
//! request is still outstanding. The request itself is issued immediately.

#[cfg(test)]
#[path = "locate_test.rs"]
mod locate_test;

use serde::{Deserialize, Serialize};

use crate::consts::LOCATE_LOADING_DELAY_MS;
use crate::engine::Geolocator;
use crate::error::LocateError;
use crate::geo::LatLng;

/// Tracking lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocateState {
    #[default]
    Idle,
    Locating,
    Tracking,
}

/// Options forwarded to the engine's geolocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateOptions {
    /// Keep emitting position updates until stopped.
    #[serde(default)]
    pub watch: bool,
    /// Pan the map to the first fix.
    #[serde(default = "default_set_view")]
    pub set_view: bool,
    /// Zoom cap for `set_view`; `None` lets the engine use the map maximum.
    #[serde(default)]
    pub max_zoom: Option<f64>,
}

fn default_set_view() -> bool {
    true
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self { watch: false, set_view: true, max_zoom: None }
    }
}

/// A position fix reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFound {
    pub latlng: LatLng,
    /// Accuracy radius in metres.
    pub accuracy: f64,
}

/// Identifies one start/stop cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocateToken(u64);

pub type LocationFoundCallback = Box<dyn FnMut(&LocationFound)>;
pub type LocationErrorCallback = Box<dyn FnMut(&LocateError)>;

/// Locate button state and the live position marker.
pub struct LocateController {
    options: LocateOptions,
    loading_delay_ms: u32,
    state: LocateState,
    generation: u64,
    position: Option<LocationFound>,
    loading_visible: bool,
    on_found: Option<LocationFoundCallback>,
    on_error: Option<LocationErrorCallback>,
}

impl Default for LocateController {
    fn default() -> Self {
        Self::new(LocateOptions::default())
    }
}

impl LocateController {
    #[must_use]
    pub fn new(options: LocateOptions) -> Self {
        Self {
            options,
            loading_delay_ms: LOCATE_LOADING_DELAY_MS,
            state: LocateState::Idle,
            generation: 0,
            position: None,
            loading_visible: false,
            on_found: None,
            on_error: None,
        }
    }

    /// Override the loading indicator delay.
    #[must_use]
    pub fn with_loading_delay(mut self, delay_ms: u32) -> Self {
        self.loading_delay_ms = delay_ms;
        self
    }

    pub fn set_on_location_found(&mut self, callback: LocationFoundCallback) {
        self.on_found = Some(callback);
    }

    pub fn set_on_location_error(&mut self, callback: LocationErrorCallback) {
        self.on_error = Some(callback);
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> LocateState {
        self.state
    }

    #[must_use]
    pub fn options(&self) -> &LocateOptions {
        &self.options
    }

    /// How long the caller waits before reporting
    /// [`Self::on_loading_delay_elapsed`].
    #[must_use]
    pub fn loading_delay_ms(&self) -> u32 {
        self.loading_delay_ms
    }

    /// Where the pulsing marker goes, while tracking.
    #[must_use]
    pub fn marker_position(&self) -> Option<LatLng> {
        self.position.map(|found| found.latlng)
    }

    #[must_use]
    pub fn last_fix(&self) -> Option<&LocationFound> {
        self.position.as_ref()
    }

    /// Whether the spinner shows. Also disables the button.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading_visible
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.loading_visible {
            "Locating..."
        } else if self.position.is_some() {
            "Stop tracking"
        } else {
            "Track location"
        }
    }

    #[must_use]
    pub fn aria_label(&self) -> &'static str {
        if self.loading_visible {
            "Locating..."
        } else if self.position.is_some() {
            "Stop location tracking"
        } else {
            "Start location tracking"
        }
    }

    /// The token the next [`Self::start`] will hand out. Lets the caller bind
    /// result handlers before the request goes out, since an engine may
    /// report failure before `locate` returns.
    #[must_use]
    pub fn next_token(&self) -> LocateToken {
        LocateToken(self.generation + 1)
    }

    // --- Transitions ---

    /// Button click: start when idle, stop when tracking, ignored while a
    /// request is outstanding.
    pub fn toggle(&mut self, geolocator: &mut dyn Geolocator) -> Option<LocateToken> {
        match self.state {
            LocateState::Idle => Some(self.start(geolocator)),
            LocateState::Tracking => {
                self.stop(geolocator);
                None
            }
            LocateState::Locating => None,
        }
    }

    /// Issue a geolocation request.
    ///
    /// The caller schedules [`Self::on_loading_delay_elapsed`] with the
    /// returned token after [`Self::loading_delay_ms`].
    pub fn start(&mut self, geolocator: &mut dyn Geolocator) -> LocateToken {
        if self.state != LocateState::Idle {
            geolocator.stop_locate();
        }
        self.generation += 1;
        self.state = LocateState::Locating;
        self.loading_visible = false;
        log::debug!("locate: start (watch={})", self.options.watch);
        geolocator.locate(&self.options);
        LocateToken(self.generation)
    }

    /// Stop tracking, drop the engine handlers and clear the marker.
    pub fn stop(&mut self, geolocator: &mut dyn Geolocator) {
        geolocator.stop_locate();
        self.generation += 1;
        self.state = LocateState::Idle;
        self.position = None;
        self.loading_visible = false;
        log::debug!("locate: stopped");
    }

    /// Owner is going away.
    pub fn teardown(&mut self, geolocator: &mut dyn Geolocator) {
        if self.state != LocateState::Idle {
            self.stop(geolocator);
        }
    }

    /// The loading-delay timer fired.
    pub fn on_loading_delay_elapsed(&mut self, token: LocateToken) {
        if self.is_current(token) && self.state == LocateState::Locating {
            self.loading_visible = true;
        }
    }

    /// Engine reported a position. Returns `false` when the token is stale.
    pub fn on_location_found(&mut self, token: LocateToken, found: LocationFound) -> bool {
        if !self.is_current(token) || self.state == LocateState::Idle {
            log::warn!("locate: ignoring stale position update");
            return false;
        }
        self.state = LocateState::Tracking;
        self.position = Some(found);
        self.loading_visible = false;
        if let Some(callback) = self.on_found.as_mut() {
            callback(&found);
        }
        true
    }

    /// Engine reported a failure. The request is abandoned and the
    /// controller returns to `Idle`. Returns `false` when the token is stale.
    pub fn on_location_error(
        &mut self,
        token: LocateToken,
        error: &LocateError,
        geolocator: &mut dyn Geolocator,
    ) -> bool {
        if !self.is_current(token) || self.state == LocateState::Idle {
            log::warn!("locate: ignoring stale error: {error}");
            return false;
        }
        log::warn!("locate: {error}");
        self.stop(geolocator);
        if let Some(callback) = self.on_error.as_mut() {
            callback(error);
        }
        true
    }

    fn is_current(&self, token: LocateToken) -> bool {
        token.0 == self.generation
    }
}
