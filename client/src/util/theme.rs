//! Page theme detection for basemap URL resolution.
//!
//! An explicit `data-theme` attribute on `<html>` wins; otherwise the
//! system colour-scheme preference decides. Requires a browser environment.
//!
//! TRADE-OFFS
//! ==========
//! Detection runs once when the layers are built. Switching theme later does
//! not re-resolve tile URLs; SSR always renders the light basemap.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use mapcore::config::Theme;

/// Resolve the theme from the `data-theme` attribute and the system preference.
pub fn resolve(attribute: Option<&str>, prefers_dark: bool) -> Theme {
    match attribute.map(str::trim) {
        Some("dark") => Theme::Dark,
        Some("light") => Theme::Light,
        _ if prefers_dark => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Read the current page theme.
pub fn read_theme() -> Theme {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return Theme::Light;
        };
        let attribute = window
            .document()
            .and_then(|doc| doc.document_element())
            .and_then(|el| el.get_attribute("data-theme"));
        let prefers_dark = match window.match_media("(prefers-color-scheme: dark)") {
            Ok(Some(query)) => query.matches(),
            _ => false,
        };
        resolve(attribute.as_deref(), prefers_dark)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Theme::Light
    }
}
