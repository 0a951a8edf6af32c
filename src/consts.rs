//! Shared defaults for the map control crate.

// ── Map ─────────────────────────────────────────────────────────

/// Initial zoom level when none is configured.
pub const DEFAULT_ZOOM: f64 = 15.0;

/// Upper zoom bound when none is configured.
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// Lower zoom bound when none is configured.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;

// ── Tile layers ─────────────────────────────────────────────────

/// Name used by a tile layer declared without one.
pub const DEFAULT_TILE_LAYER_NAME: &str = "Default";

/// Light basemap used when a tile layer has no URL.
pub const DEFAULT_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png";

/// Dark basemap used under a dark theme when a tile layer has no dark URL.
pub const DEFAULT_DARK_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png";

/// Attribution shown for the default basemaps.
pub const DEFAULT_TILE_ATTRIBUTION: &str = "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>, &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

// ── Layers control ──────────────────────────────────────────────

/// Heading above the tile-layer radio group.
pub const TILE_LAYERS_LABEL: &str = "Map Type";

/// Heading above the layer-group checkboxes.
pub const LAYER_GROUPS_LABEL: &str = "Layers";

// ── Vector styles ───────────────────────────────────────────────

/// Stroke/fill colour of an unselected feature.
pub const DEFAULT_FEATURE_COLOR: &str = "#60a5fa";

/// Stroke/fill colour of the selected feature.
pub const SELECTED_FEATURE_COLOR: &str = "#f59e0b";

/// Fill opacity of an unselected feature.
pub const DEFAULT_FEATURE_FILL_OPACITY: f64 = 0.25;

/// Fill opacity of the selected feature.
pub const SELECTED_FEATURE_FILL_OPACITY: f64 = 0.35;

/// Stroke width shared by feature styles and drawing tools.
pub const DEFAULT_STROKE_WEIGHT: f64 = 2.0;

// ── Drawing ─────────────────────────────────────────────────────

/// Stroke colour of shapes produced by the drawing tools.
pub const DRAW_SHAPE_COLOR: &str = "var(--color-primary)";

/// Colour flashed by a drawing tool when the engine rejects a vertex.
pub const DRAW_ERROR_COLOR: &str = "var(--color-destructive)";

// ── Locate ──────────────────────────────────────────────────────

/// Delay before the locate button shows its loading spinner.
pub const LOCATE_LOADING_DELAY_MS: u32 = 200;

// ── Tooltips ────────────────────────────────────────────────────

/// Gap in pixels between a tooltip and its anchor.
pub const DEFAULT_TOOLTIP_SIDE_OFFSET: f64 = 15.0;

// ── Markers and static shapes ───────────────────────────────────

/// Map-pin glyph used when a marker has no icon of its own.
pub const MARKER_PIN_HTML: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\" class=\"map-marker__pin\"><path d=\"M20 10c0 4.993-5.539 10.193-7.399 11.799a1 1 0 0 1-1.202 0C9.539 20.193 4 14.993 4 10a8 8 0 0 1 16 0\"/><circle cx=\"12\" cy=\"10\" r=\"3\"/></svg>";

/// Point of a marker icon placed on the marker's position: the centre of
/// the 24px pin.
pub const DEFAULT_MARKER_ICON_ANCHOR: (f64, f64) = (12.0, 12.0);

/// Class shared by static shapes, cluster polygons and spider legs.
pub const SHAPE_CLASS: &str = "map-shape";

/// Class of the default cluster count badge.
pub const CLUSTER_BADGE_CLASS: &str = "map-cluster__badge";

/// Class of every popup bound to a marker or shape.
pub const POPUP_CLASS: &str = "map-popup";

/// Class of every tooltip bound to a marker or shape.
pub const TOOLTIP_CLASS: &str = "map-tooltip";

/// Class of the arrow inside a bound tooltip.
pub const TOOLTIP_ARROW_CLASS: &str = "map-tooltip__arrow";

// ── Datasets ────────────────────────────────────────────────────

/// Banner text shown when at least one dataset failed to load.
pub const DATASET_FAILURE_MESSAGE: &str = "Failed to load map data.";
