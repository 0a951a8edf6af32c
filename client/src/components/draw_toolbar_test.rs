use super::*;

#[test]
fn shape_icons_are_keyed_by_shape_name() {
    assert_eq!(shape_icon_class(DrawShape::Rectangle), "map-draw-toolbar__icon map-draw-toolbar__icon--rectangle");
}

#[test]
fn every_shape_has_a_distinct_icon() {
    let mut classes: Vec<String> = DrawShape::ALL.into_iter().map(shape_icon_class).collect();
    classes.sort();
    classes.dedup();
    assert_eq!(classes.len(), DrawShape::ALL.len());
}

#[test]
fn delete_action_uses_delete_icon() {
    assert!(action_icon_class(DrawAction::Delete).ends_with("--delete"));
    assert!(action_icon_class(DrawAction::Edit).ends_with("--edit"));
}
