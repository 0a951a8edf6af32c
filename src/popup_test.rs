use serde_json::json;

use super::*;

fn feature(properties: Value) -> Feature {
    serde_json::from_value(json!({
        "type": "Feature",
        "geometry": null,
        "properties": properties,
    }))
    .expect("valid feature")
}

// =============================================================
// escape_html
// =============================================================

#[test]
fn escape_html_replaces_all_five_characters() {
    assert_eq!(escape_html(r#"<a href="x">Tom & Jerry's</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;");
}

#[test]
fn escape_html_leaves_plain_text_alone() {
    assert_eq!(escape_html("Tromsø 1902"), "Tromsø 1902");
    assert_eq!(escape_html(""), "");
}

#[test]
fn escape_html_does_not_double_decode() {
    assert_eq!(escape_html("&amp;"), "&amp;amp;");
}

// =============================================================
// display_value
// =============================================================

#[test]
fn display_value_formats_scalars_and_skips_null() {
    assert_eq!(display_value(&json!(null)), None);
    assert_eq!(display_value(&json!("Bergen")), Some("Bergen".to_owned()));
    assert_eq!(display_value(&json!(1301)), Some("1301".to_owned()));
    assert_eq!(display_value(&json!(true)), Some("true".to_owned()));
    assert_eq!(display_value(&json!([1, 2])), Some("[1,2]".to_owned()));
}

// =============================================================
// build_popup_html
// =============================================================

#[test]
fn no_fields_means_no_popup() {
    let config = PopupConfig::new(Some("Kommune"), &[]);
    assert!(!config.is_enabled());
    assert_eq!(build_popup_html(&feature(json!({"Kommune": "Bergen"})), &config), None);
}

#[test]
fn null_field_is_omitted() {
    let config = PopupConfig::new(None, &["Kommune", "Opphør"]);
    let html = build_popup_html(&feature(json!({"Kommune": "Bergen", "Opphør": null})), &config)
        .expect("popup");
    assert!(html.contains("<div><strong>Kommune:</strong> Bergen</div>"));
    assert!(!html.contains("Opphør"));
    assert_eq!(html.matches("<strong>").count(), 1);
}

#[test]
fn missing_field_is_omitted() {
    let config = PopupConfig::new(None, &["Fylke", "KNR"]);
    let html = build_popup_html(&feature(json!({"KNR": 4601})), &config).expect("popup");
    assert!(html.contains("<strong>KNR:</strong> 4601"));
    assert!(!html.contains("Fylke"));
}

#[test]
fn title_rendered_before_rows() {
    let config = PopupConfig::new(Some("navn"), &["Fylke"]);
    let html = build_popup_html(&feature(json!({"navn": "Oslo", "Fylke": "Oslo"})), &config).expect("popup");
    let title = html.find("font-size:16px").expect("title");
    let rows = html.find("<strong>").expect("rows");
    assert!(title < rows);
    assert!(html.starts_with("<div style=\"background:#0b1220;"));
    assert!(html.ends_with("</div></div>"));
}

#[test]
fn empty_or_null_title_is_omitted() {
    let config = PopupConfig::new(Some("navn"), &["Fylke"]);
    for properties in [json!({"navn": "", "Fylke": "Viken"}), json!({"navn": null, "Fylke": "Viken"}), json!({"Fylke": "Viken"})] {
        let html = build_popup_html(&feature(properties), &config).expect("popup");
        assert!(!html.contains("font-size:16px"));
    }
}

#[test]
fn missing_property_bag_renders_empty_rows() {
    let config = PopupConfig::new(Some("navn"), &["Fylke"]);
    let html = build_popup_html(&feature(Value::Null), &config).expect("popup");
    assert!(!html.contains("<strong>"));
}

#[test]
fn markup_in_title_and_values_is_escaped() {
    let config = PopupConfig::new(Some("navn"), &["note"]);
    let html = build_popup_html(
        &feature(json!({
            "navn": "<script>alert('x')</script>",
            "note": "\"quoted\" & <b>bold</b>",
        })),
        &config,
    )
    .expect("popup");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
    assert!(html.contains("&quot;quoted&quot; &amp; &lt;b&gt;bold&lt;/b&gt;"));
}

#[test]
fn markup_in_field_name_is_escaped() {
    let config = PopupConfig::new(None, &["<i>"]);
    let html = build_popup_html(&feature(json!({"<i>": "v"})), &config).expect("popup");
    assert!(html.contains("<strong>&lt;i&gt;:</strong> v"));
}

#[test]
fn popup_config_parses_camel_case() {
    let config: PopupConfig =
        serde_json::from_value(json!({"titleField": "Kommune", "fields": ["Fylke", "KNR"]})).expect("valid");
    assert_eq!(config, PopupConfig::new(Some("Kommune"), &["Fylke", "KNR"]));
}
