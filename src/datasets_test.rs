use super::*;

const EMPTY_COLLECTION: &str = r#"{"type": "FeatureCollection", "features": []}"#;

fn kommuner() -> DatasetSet {
    DatasetSet::new(vec![
        DatasetSource::new("Kommuner 1947", "/data/kommuner-1947.json"),
        DatasetSource::new("Kommuner 2019", "/data/kommuner-2019.json"),
        DatasetSource::new("Kommuner 2020", "/data/kommuner-2020.json"),
    ])
}

fn not_found(url: &str) -> DatasetError {
    DatasetError::Status { url: url.to_owned(), status: 404 }
}

#[test]
fn new_set_is_pending() {
    let set = kommuner();
    assert!(set.is_loading());
    assert!(set.data("Kommuner 1947").is_none());
    assert_eq!(set.banner(), None);
}

#[test]
fn all_loaded_has_no_banner() {
    let mut set = kommuner();
    let token = set.begin();
    for source in set.sources().to_vec() {
        assert!(set.complete(token, &source.name, Ok(FeatureCollection::default())));
    }
    assert!(!set.is_loading());
    assert!(set.data("Kommuner 2020").is_some());
    assert_eq!(set.banner(), None);
}

#[test]
fn partial_success_renders_what_loaded() {
    let mut set = kommuner();
    let token = set.begin();
    set.complete(token, "Kommuner 1947", Ok(FeatureCollection::default()));
    set.complete(token, "Kommuner 2019", Err(not_found("/data/kommuner-2019.json")));
    set.complete(token, "Kommuner 2020", Ok(FeatureCollection::default()));
    assert!(set.data("Kommuner 1947").is_some());
    assert!(set.data("Kommuner 2019").is_none());
    assert!(set.data("Kommuner 2020").is_some());
    assert_eq!(set.failed(), vec!["Kommuner 2019"]);
    assert_eq!(set.banner(), Some("Failed to load map data."));
}

#[test]
fn aborted_round_results_are_dropped() {
    let mut set = kommuner();
    let token = set.begin();
    set.abort();
    assert!(!set.complete(token, "Kommuner 1947", Ok(FeatureCollection::default())));
    assert!(set.data("Kommuner 1947").is_none());
}

#[test]
fn new_round_supersedes_old_one() {
    let mut set = kommuner();
    let old = set.begin();
    let new = set.begin();
    assert!(!set.complete(old, "Kommuner 1947", Err(not_found("/a"))));
    assert!(set.complete(new, "Kommuner 1947", Ok(FeatureCollection::default())));
    assert_eq!(set.banner(), None);
}

#[test]
fn unknown_source_is_rejected() {
    let mut set = kommuner();
    let token = set.begin();
    assert!(!set.complete(token, "Kommuner 1838", Ok(FeatureCollection::default())));
}

#[test]
fn loaded_data_keeps_its_reference() {
    let mut set = kommuner();
    let token = set.begin();
    set.complete(token, "Kommuner 1947", Ok(FeatureCollection::default()));
    let a = set.data("Kommuner 1947").expect("loaded");
    let b = set.data("Kommuner 1947").expect("loaded");
    assert!(Rc::ptr_eq(&a, &b));
}

#[test]
fn parse_response_checks_status_then_body() {
    assert!(parse_response("/ok", 200, EMPTY_COLLECTION).is_ok());
    assert_eq!(parse_response("/missing", 404, ""), Err(not_found("/missing")));
    assert!(matches!(
        parse_response("/bad", 200, r#"{"type": "Feature"}"#),
        Err(DatasetError::Parse { .. })
    ));
}
