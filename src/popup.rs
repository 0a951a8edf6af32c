//! Popup markup for vector features.
//!
//! Feature properties come from untrusted datasets, so every string that
//! reaches the markup (title, field names, values) goes through
//! [`escape_html`] first.

#[cfg(test)]
#[path = "popup_test.rs"]
mod popup_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::Feature;

const CARD_STYLE: &str =
    "background:#0b1220;color:#e5e7eb;padding:12px;border-radius:8px;border:1px solid #1f2937;min-width:220px;";
const TITLE_STYLE: &str = "font-size:16px;font-weight:600;color:#f3f4f6;";
const ROWS_STYLE: &str = "margin-top:8px;display:grid;gap:4px;color:#cbd5f5;";

/// Which properties a feature popup shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupConfig {
    /// Property rendered as the heading.
    #[serde(default)]
    pub title_field: Option<String>,
    /// Properties rendered as `name: value` rows, in order.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl PopupConfig {
    #[must_use]
    pub fn new(title_field: Option<&str>, fields: &[&str]) -> Self {
        Self {
            title_field: title_field.map(str::to_owned),
            fields: fields.iter().map(|f| (*f).to_owned()).collect(),
        }
    }

    /// A popup is only bound when at least one field row is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// Replace the five HTML-significant characters with entities.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Display text for a property value. `None` for null.
///
/// Strings render raw, scalars through their JSON text, arrays and objects as
/// compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Heading text for a feature, if the title property is present and non-empty.
#[must_use]
pub fn popup_title(feature: &Feature, config: &PopupConfig) -> Option<String> {
    let field = config.title_field.as_deref()?;
    feature
        .property(field)
        .and_then(display_value)
        .filter(|title| !title.is_empty())
}

/// `(field, value)` pairs for every configured field with a non-null value.
#[must_use]
pub fn popup_rows(feature: &Feature, config: &PopupConfig) -> Vec<(String, String)> {
    config
        .fields
        .iter()
        .filter_map(|field| {
            let value = feature.property(field).and_then(display_value)?;
            Some((field.clone(), value))
        })
        .collect()
}

/// Render the popup card for `feature`, or `None` when no fields are
/// configured.
#[must_use]
pub fn build_popup_html(feature: &Feature, config: &PopupConfig) -> Option<String> {
    if !config.is_enabled() {
        return None;
    }
    let mut html = format!("<div style=\"{CARD_STYLE}\">");
    if let Some(title) = popup_title(feature, config) {
        html.push_str(&format!("<div style=\"{TITLE_STYLE}\">{}</div>", escape_html(&title)));
    }
    html.push_str(&format!("<div style=\"{ROWS_STYLE}\">"));
    for (field, value) in popup_rows(feature, config) {
        html.push_str(&format!(
            "<div><strong>{}:</strong> {}</div>",
            escape_html(&field),
            escape_html(&value)
        ));
    }
    html.push_str("</div></div>");
    Some(html)
}
