use super::*;

#[derive(Debug, PartialEq)]
struct Engine {
    version: &'static str,
}

fn failure() -> BridgeError {
    BridgeError::LoadFailed { module: "leaflet".to_owned(), message: "404".to_owned() }
}

#[test]
fn first_request_starts_load_and_later_ones_wait() {
    let mut module: LazyModule<Engine> = LazyModule::new();
    let Request::Start(first) = module.request() else {
        panic!("first consumer starts the load");
    };
    let Request::Wait(second) = module.request() else {
        panic!("second consumer waits");
    };
    assert_ne!(first, second);
    assert!(module.is_loading());
    assert!(module.get().is_none());
}

#[test]
fn resolution_is_shared_and_cached() {
    let mut module = LazyModule::new();
    let Request::Start(first) = module.request() else {
        panic!("start");
    };
    let Request::Wait(second) = module.request() else {
        panic!("wait");
    };
    let resolution = module.resolve(Ok(Engine { version: "1.9" })).expect("in flight");
    assert_eq!(resolution.consumers, vec![first, second]);
    let loaded = resolution.result.expect("loaded");

    let Request::Ready(cached) = module.request() else {
        panic!("cached after load");
    };
    assert!(Rc::ptr_eq(&loaded, &cached));
    assert_eq!(module.get().map(|engine| engine.version), Some("1.9"));
}

#[test]
fn abandoned_consumer_is_not_resolved() {
    let mut module = LazyModule::new();
    let Request::Start(first) = module.request() else {
        panic!("start");
    };
    let Request::Wait(second) = module.request() else {
        panic!("wait");
    };
    module.abandon(first);
    let resolution = module.resolve(Ok(Engine { version: "1.9" })).expect("in flight");
    assert_eq!(resolution.consumers, vec![second]);
    assert!(module.get().is_some(), "load still cached for later consumers");
}

#[test]
fn duplicate_resolution_is_ignored() {
    let mut module = LazyModule::new();
    module.request();
    module.resolve(Ok(Engine { version: "1.9" })).expect("in flight");
    assert!(module.resolve(Ok(Engine { version: "2.0" })).is_none());
    assert_eq!(module.get().map(|engine| engine.version), Some("1.9"));
}

#[test]
fn resolution_without_request_is_ignored() {
    let mut module: LazyModule<Engine> = LazyModule::default();
    assert!(module.resolve(Ok(Engine { version: "1.9" })).is_none());
    assert!(matches!(module.state(), LoadState::NotLoaded));
}

#[test]
fn failure_is_reported_and_next_request_retries() {
    let mut module: LazyModule<Engine> = LazyModule::new();
    module.request();
    let resolution = module.resolve(Err(failure())).expect("in flight");
    assert_eq!(resolution.result.err(), Some(failure()));
    assert!(matches!(module.state(), LoadState::Failed(_)));
    assert!(matches!(module.request(), Request::Start(_)));
}

#[test]
fn native_build_is_not_a_browser() {
    assert_eq!(ensure_browser(), Err(BridgeError::NotInBrowser));
}
