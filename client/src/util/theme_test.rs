use super::*;

#[test]
fn attribute_wins_over_system_preference() {
    assert_eq!(resolve(Some("dark"), false), Theme::Dark);
    assert_eq!(resolve(Some("light"), true), Theme::Light);
    assert_eq!(resolve(Some(" dark "), false), Theme::Dark);
}

#[test]
fn system_preference_applies_without_attribute() {
    assert_eq!(resolve(None, true), Theme::Dark);
    assert_eq!(resolve(None, false), Theme::Light);
    assert_eq!(resolve(Some("sepia"), true), Theme::Dark);
}

#[test]
fn native_build_reads_light() {
    assert_eq!(read_theme(), Theme::Light);
}
