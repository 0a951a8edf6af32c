use super::*;

#[test]
fn leaflet_loads_before_its_plugins() {
    let first_script = ENGINE_ASSETS.iter().find(|asset| asset.kind == AssetKind::Script);
    assert_eq!(first_script.map(|asset| asset.module), Some("leaflet"));
}

#[test]
fn every_module_ships_stylesheets_then_one_script() {
    let mut modules: Vec<&str> = ENGINE_ASSETS.iter().map(|asset| asset.module).collect();
    modules.dedup();
    assert_eq!(modules, ["leaflet", "leaflet-draw", "leaflet.fullscreen", "leaflet.markercluster"]);
    for module in modules {
        let kinds: Vec<AssetKind> =
            ENGINE_ASSETS.iter().filter(|asset| asset.module == module).map(|asset| asset.kind).collect();
        let (script, stylesheets) = kinds.split_last().expect("module has assets");
        assert_eq!(*script, AssetKind::Script, "{module}");
        assert!(!stylesheets.is_empty(), "{module} has no stylesheet");
        assert!(stylesheets.iter().all(|kind| *kind == AssetKind::Stylesheet), "{module}");
    }
}

#[test]
fn element_ids_are_unique_and_dom_safe() {
    let ids: Vec<String> = ENGINE_ASSETS.iter().map(element_id).collect();
    for (index, id) in ids.iter().enumerate() {
        assert!(!id.contains('.'), "{id}");
        assert!(!ids[index + 1..].contains(id), "duplicate {id}");
    }
    assert_eq!(ids[0], "mapcore-leaflet-css");
    assert_eq!(ids[5], "mapcore-control-fullscreen-js");
    assert_eq!(ids[6], "mapcore-markercluster-css");
    assert_eq!(ids[7], "mapcore-markercluster-default-css");
}
