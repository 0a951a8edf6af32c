use super::*;

#[test]
fn tooltip_slot_defaults_to_fifteen_pixels() {
    let binding = tooltip_binding(TooltipSide::Top, None, "");
    assert_eq!(binding, TooltipBinding::default());
    assert_eq!(binding.offset(), (0.0, -15.0));
}

#[test]
fn tooltip_slot_keeps_explicit_offset_and_class() {
    let binding = tooltip_binding(TooltipSide::Left, Some(6.0), "city-label");
    assert_eq!(binding.offset(), (-6.0, 0.0));
    assert_eq!(binding.class_list(), "map-tooltip city-label");
}
