use super::*;

#[test]
fn container_class_appends_caller_classes() {
    assert_eq!(container_class(""), "map");
    assert_eq!(container_class("  "), "map");
    assert_eq!(container_class("h-[80vh] my-10"), "map h-[80vh] my-10");
}
