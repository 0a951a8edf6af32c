use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::engine::engine_test::{LocateCall, RecordingGeolocator};

fn fix(lat: f64, lng: f64) -> LocationFound {
    LocationFound { latlng: LatLng::new(lat, lng), accuracy: 25.0 }
}

fn denied() -> LocateError {
    LocateError { code: 1, message: "User denied Geolocation".to_owned() }
}

// =============================================================
// Start / success
// =============================================================

#[test]
fn start_issues_request_immediately() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::new(LocateOptions { watch: true, ..LocateOptions::default() });
    locate.start(&mut geo);
    assert_eq!(locate.state(), LocateState::Locating);
    assert_eq!(
        geo.calls,
        vec![LocateCall::Locate(LocateOptions { watch: true, set_view: true, max_zoom: None })]
    );
    assert!(!locate.is_loading(), "indicator waits for the delay");
    assert_eq!(locate.title(), "Track location");
}

#[test]
fn found_moves_to_tracking_with_marker_and_callback() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    locate.set_on_location_found(Box::new(move |found: &LocationFound| sink.borrow_mut().push(found.latlng)));

    let token = locate.start(&mut geo);
    assert!(locate.on_location_found(token, fix(60.39, 5.32)));
    assert_eq!(locate.state(), LocateState::Tracking);
    assert_eq!(locate.marker_position(), Some(LatLng::new(60.39, 5.32)));
    assert_eq!(*seen.borrow(), vec![LatLng::new(60.39, 5.32)]);
    assert_eq!(locate.title(), "Stop tracking");
    assert_eq!(locate.aria_label(), "Stop location tracking");
}

#[test]
fn watch_updates_move_the_marker() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::new(LocateOptions { watch: true, ..LocateOptions::default() });
    let token = locate.start(&mut geo);
    locate.on_location_found(token, fix(60.0, 5.0));
    locate.on_location_found(token, fix(60.1, 5.1));
    assert_eq!(locate.marker_position(), Some(LatLng::new(60.1, 5.1)));
    assert_eq!(locate.last_fix().map(|f| f.accuracy), Some(25.0));
}

// =============================================================
// Debounced indicator
// =============================================================

#[test]
fn indicator_shows_after_delay_while_outstanding() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    assert_eq!(locate.loading_delay_ms(), 200);
    let token = locate.start(&mut geo);
    locate.on_loading_delay_elapsed(token);
    assert!(locate.is_loading());
    assert_eq!(locate.title(), "Locating...");
    assert_eq!(locate.aria_label(), "Locating...");
    locate.on_location_found(token, fix(1.0, 2.0));
    assert!(!locate.is_loading());
}

#[test]
fn fast_response_never_shows_indicator() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    let token = locate.start(&mut geo);
    locate.on_location_found(token, fix(1.0, 2.0));
    locate.on_loading_delay_elapsed(token);
    assert!(!locate.is_loading());
}

#[test]
fn custom_delay_is_reported() {
    let locate = LocateController::default().with_loading_delay(50);
    assert_eq!(locate.loading_delay_ms(), 50);
}

// =============================================================
// Failure / stop / stale callbacks
// =============================================================

#[test]
fn error_returns_idle_and_invokes_callback() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    locate.set_on_location_error(Box::new(move |error: &LocateError| sink.borrow_mut().push(error.code)));

    let token = locate.start(&mut geo);
    assert!(locate.on_location_error(token, &denied(), &mut geo));
    assert_eq!(locate.state(), LocateState::Idle);
    assert_eq!(locate.marker_position(), None);
    assert_eq!(*errors.borrow(), vec![1]);
    assert_eq!(geo.calls.last(), Some(&LocateCall::Stop));
}

#[test]
fn stop_clears_marker_and_deregisters() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    let token = locate.start(&mut geo);
    locate.on_location_found(token, fix(1.0, 2.0));
    assert_eq!(locate.toggle(&mut geo), None);
    assert_eq!(locate.state(), LocateState::Idle);
    assert_eq!(locate.marker_position(), None);
    assert_eq!(geo.calls.last(), Some(&LocateCall::Stop));
    assert_eq!(locate.title(), "Track location");
    assert_eq!(locate.aria_label(), "Start location tracking");
}

#[test]
fn late_callbacks_after_stop_are_ignored() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    let found_calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&found_calls);
    locate.set_on_location_found(Box::new(move |_: &LocationFound| *sink.borrow_mut() += 1));

    let token = locate.start(&mut geo);
    locate.stop(&mut geo);
    assert!(!locate.on_location_found(token, fix(1.0, 2.0)));
    assert!(!locate.on_location_error(token, &denied(), &mut geo));
    locate.on_loading_delay_elapsed(token);
    assert_eq!(locate.state(), LocateState::Idle);
    assert_eq!(locate.marker_position(), None);
    assert!(!locate.is_loading());
    assert_eq!(*found_calls.borrow(), 0);
}

#[test]
fn restart_ignores_previous_generation() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    let first = locate.start(&mut geo);
    locate.stop(&mut geo);
    let second = locate.start(&mut geo);
    assert_ne!(first, second);
    assert!(!locate.on_location_found(first, fix(1.0, 1.0)));
    assert!(locate.on_location_found(second, fix(2.0, 2.0)));
    assert_eq!(locate.marker_position(), Some(LatLng::new(2.0, 2.0)));
}

/// Reports failure from inside `locate`, the way Leaflet does when the
/// browser has no geolocation API.
#[derive(Default)]
struct UnsupportedGeolocator {
    calls: Vec<LocateCall>,
    fired: Vec<LocateError>,
}

impl Geolocator for UnsupportedGeolocator {
    fn locate(&mut self, options: &LocateOptions) {
        self.calls.push(LocateCall::Locate(options.clone()));
        self.fired.push(LocateError { code: 0, message: "Geolocation not supported.".to_owned() });
    }

    fn stop_locate(&mut self) {
        self.calls.push(LocateCall::Stop);
    }
}

#[test]
fn next_token_matches_the_following_start() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    let expected = locate.next_token();
    assert_eq!(locate.toggle(&mut geo), Some(expected));
    assert_eq!(locate.next_token(), expected, "no new cycle while locating");

    locate.stop(&mut geo);
    let restarted = locate.next_token();
    assert_ne!(restarted, expected);
    assert_eq!(locate.start(&mut geo), restarted);
}

#[test]
fn error_raised_during_the_request_returns_idle() {
    let mut geo = UnsupportedGeolocator::default();
    let mut locate = LocateController::default();
    let token = locate.next_token();

    assert_eq!(locate.toggle(&mut geo), Some(token));
    let fired = std::mem::take(&mut geo.fired);
    assert_eq!(fired.len(), 1);
    assert!(locate.on_location_error(token, &fired[0], &mut geo));
    assert_eq!(locate.state(), LocateState::Idle);

    // The button works again instead of staying stuck in Locating.
    assert!(locate.toggle(&mut geo).is_some());
    assert_eq!(locate.state(), LocateState::Locating);
}

#[test]
fn toggle_ignored_while_locating() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    assert!(locate.toggle(&mut geo).is_some());
    assert_eq!(locate.toggle(&mut geo), None);
    assert_eq!(geo.calls.len(), 1);
}

#[test]
fn teardown_stops_active_request_only() {
    let mut geo = RecordingGeolocator::default();
    let mut locate = LocateController::default();
    locate.teardown(&mut geo);
    assert!(geo.calls.is_empty());
    locate.start(&mut geo);
    locate.teardown(&mut geo);
    assert_eq!(geo.calls.last(), Some(&LocateCall::Stop));
    assert_eq!(locate.state(), LocateState::Idle);
}

#[test]
fn options_parse_with_defaults() {
    let options: LocateOptions = serde_json::from_str(r#"{"watch": true}"#).expect("valid options");
    assert!(options.watch);
    assert!(options.set_view);
    assert_eq!(options.max_zoom, None);
}
