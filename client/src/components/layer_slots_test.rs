use super::*;

use mapcore::config::{Theme, TileLayerSpec};

fn carto(theme: Theme) -> TileLayerDescriptor {
    TileLayerSpec::default().resolve(theme)
}

#[test]
fn same_descriptor_keeps_the_rendered_layer() {
    let light = carto(Theme::Light);
    assert!(!needs_swap(Some(&light), Some(&light.clone())));
    assert!(!needs_swap(None, None));
}

#[test]
fn theme_change_swaps_even_with_the_same_name() {
    let light = carto(Theme::Light);
    let dark = carto(Theme::Dark);
    assert_eq!(light.name, dark.name);
    assert!(needs_swap(Some(&light), Some(&dark)));
}

#[test]
fn first_selection_and_removal_swap() {
    let light = carto(Theme::Light);
    assert!(needs_swap(None, Some(&light)));
    assert!(needs_swap(Some(&light), None));
}
