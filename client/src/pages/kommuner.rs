//! Norwegian municipality boundaries for 1947, 2019 and 2020.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads the three boundary datasets concurrently, one overlay group each,
//! over three switchable basemaps. A failed dataset leaves its group empty
//! and raises the shared banner; the others still render. Leaving the page
//! aborts outstanding requests and discards their late results. A fourth
//! overlay shows the largest cities as clustered markers along with the
//! length of the country.

#[cfg(test)]
#[path = "kommuner_test.rs"]
mod kommuner_test;

use leptos::prelude::*;

use mapcore::config::{LayersConfig, MapOptions, TileLayerSpec};
use mapcore::controls::TooltipSide;
use mapcore::datasets::{DatasetSet, DatasetSource};
use mapcore::draw::{DrawController, DrawnShapeCollection};
use mapcore::engine::PathStyle;
use mapcore::feature_layer::FeatureLayerConfig;
use mapcore::geo::LatLng;
use mapcore::layers::{LayerGroupDescriptor, LayerRegistry};
use mapcore::markers::{ClusterGroupOptions, count_badge};
use mapcore::popup::PopupConfig;
use mapcore::shapes::StaticShape;

use crate::components::dataset_banner::DatasetBanner;
use crate::components::draw_toolbar::{DrawToolbar, draw_signal};
use crate::components::feature_layer::{FeatureData, GeoJsonLayer};
use crate::components::fullscreen_control::FullscreenControl;
use crate::components::layer_slots::{LayerGroupSlot, TileLayers};
use crate::components::layers_control::LayersControl;
use crate::components::locate_control::LocateControl;
use crate::components::map_container::MapContainer;
use crate::components::map_layers::MapLayers;
use crate::components::markers::{Marker, MarkerClusterGroup, cluster_signal};
use crate::components::overlays::{Popup, Tooltip};
use crate::components::search_control::SearchControl;
use crate::components::vector_shape::VectorShape;
use crate::components::zoom_control::ZoomControl;
use crate::util::map_handle::map_signal;

pub const KOMMUNER_1947: &str = "Kommuner 1947";
pub const KOMMUNER_2019: &str = "Kommuner 2019";
pub const KOMMUNER_2020: &str = "Kommuner 2020";
pub const BYER: &str = "Byer";

const NATGEO: &str = "National Geographic";
const NATGEO_URL: &str = "https://server.arcgisonline.com/ArcGIS/rest/services/NatGeo_World_Map/MapServer/tile/{z}/{y}/{x}";
const NATGEO_ATTRIBUTION: &str = "Tiles &copy; Esri &mdash; National Geographic, Esri, DeLorme, NAVTEQ, UNEP-WCMC, USGS, NASA, ESA, METI, NRCAN, GEBCO, NOAA, iPC";
const SATELLITE: &str = "Satellite";
const SATELLITE_URL: &str = "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const SATELLITE_ATTRIBUTION: &str = "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community";
const DATA_ATTRIBUTION: &str = "&copy; credits due...";

const POPUP_FIELDS: [&str; 4] = ["Fylke", "KNR", "Opprettet", "Opphør"];

const CITIES: [(&str, f64, f64); 7] = [
    ("Oslo", 59.913_9, 10.752_2),
    ("Bergen", 60.391_3, 5.322_1),
    ("Trondheim", 63.430_5, 10.395_1),
    ("Stavanger", 58.970_0, 5.733_1),
    ("Kristiansand", 58.146_7, 7.995_6),
    ("Bodø", 67.280_4, 14.404_9),
    ("Tromsø", 69.649_2, 18.955_3),
];

const LINDESNES: LatLng = LatLng { lat: 57.982_6, lng: 7.047_8 };
const NORDKAPP: LatLng = LatLng { lat: 71.168_5, lng: 25.783_8 };

/// Initial viewport: all of mainland Norway.
pub fn map_options() -> MapOptions {
    MapOptions { zoom: 5.0, ..MapOptions::centered(LatLng::new(65.382_159_705_004_28, 12.796_135_827_352_643)) }
}

pub fn layers_config() -> LayersConfig {
    LayersConfig {
        default_tile_layer: Some(NATGEO.to_owned()),
        default_layer_groups: vec![KOMMUNER_2020.to_owned()],
        tile_layers: vec![
            TileLayerSpec::default(),
            TileLayerSpec::new(NATGEO, NATGEO_URL, NATGEO_ATTRIBUTION),
            TileLayerSpec::new(SATELLITE, SATELLITE_URL, SATELLITE_ATTRIBUTION),
        ],
        layer_groups: [KOMMUNER_1947, KOMMUNER_2019, KOMMUNER_2020, BYER]
            .into_iter()
            .map(LayerGroupDescriptor::new)
            .collect(),
    }
}

/// One source per overlay group, named after the group.
pub fn dataset_sources() -> Vec<DatasetSource> {
    vec![
        DatasetSource::new(KOMMUNER_1947, "/data/kommuner-1947.json"),
        DatasetSource::new(KOMMUNER_2019, "/data/kommuner-2019.json"),
        DatasetSource::new(KOMMUNER_2020, "/data/kommuner-2020.json"),
    ]
}

/// Styling and popups for the overlay named `group`.
///
/// Only the 1947 boundaries fit the viewport: they cover the widest area.
pub fn feature_config(group: &str) -> FeatureLayerConfig {
    let (default_style, title_field) = match group {
        KOMMUNER_1947 => (
            PathStyle { fill_color: "#60a5fa".to_owned(), ..PathStyle::solid("#2563eb", 0.25) },
            "Kommune",
        ),
        KOMMUNER_2019 => (PathStyle::solid("#22c55e", 0.2), "navn"),
        _ => (PathStyle::solid("#a855f7", 0.2), "navn"),
    };
    FeatureLayerConfig {
        selectable: true,
        default_style,
        popup: PopupConfig::new(Some(title_field), &POPUP_FIELDS),
        fit_bounds: group == KOMMUNER_1947,
        ..FeatureLayerConfig::default()
    }
}

/// Marker positions for the cities overlay.
pub fn cities() -> Vec<(&'static str, LatLng)> {
    CITIES.iter().map(|(name, lat, lng)| (*name, LatLng::new(*lat, *lng))).collect()
}

/// City clusters show how many cities they hold.
pub fn city_clusters() -> ClusterGroupOptions {
    ClusterGroupOptions::default().with_icon(count_badge)
}

/// Southernmost to northernmost mainland point.
pub fn country_length() -> StaticShape {
    StaticShape::Polyline { points: vec![LINDESNES, NORDKAPP] }
}

/// Text under the map summarising the drawn collection.
pub fn drawn_summary(count: usize) -> String {
    match count {
        0 => "No shapes drawn".to_owned(),
        1 => "1 shape drawn".to_owned(),
        n => format!("{n} shapes drawn"),
    }
}

#[component]
pub fn KommunerPage() -> impl IntoView {
    let map = map_signal();
    let city_cluster = cluster_signal();
    let registry = RwSignal::new(LayerRegistry::default());
    let datasets = RwSignal::new_local(DatasetSet::new(dataset_sources()));
    let drawn = RwSignal::new(drawn_summary(0));

    let mut draw = DrawController::new();
    draw.set_on_change(Box::new(move |shapes: &DrawnShapeCollection| drawn.set(drawn_summary(shapes.len()))));
    let draw = draw_signal(draw);

    let data_for = move |group: &'static str| -> FeatureData {
        Signal::derive_local(move || datasets.with(|set| set.data(group)))
    };

    #[cfg(feature = "hydrate")]
    {
        use crate::util::fetch::fetch_collection;

        let abort = match web_sys::AbortController::new() {
            Ok(abort) => Some(abort),
            Err(err) => {
                leptos::logging::warn!("kommuner: no AbortController: {}", crate::util::leaflet::describe(&err));
                None
            }
        };
        let signal = abort.as_ref().map(web_sys::AbortController::signal);
        let abort = StoredValue::new_local(abort);

        let token = datasets.write().begin();
        for source in dataset_sources() {
            let signal = signal.clone();
            leptos::task::spawn_local(async move {
                let result = fetch_collection(&source.url, signal.as_ref()).await;
                datasets.try_update(|set| set.complete(token, &source.name, result));
            });
        }

        on_cleanup(move || {
            abort.try_with_value(|abort| {
                if let Some(abort) = abort {
                    abort.abort();
                }
            });
            datasets.try_update(DatasetSet::abort);
        });
    }

    let on_search = Callback::new(move |query: String| {
        leptos::logging::log!("kommuner: search {query:?}");
    });

    view! {
        <section class="kommuner-page">
            <h1 class="kommuner-page__title">"Kommuner"</h1>
            <MapLayers config=layers_config() registry=registry>
                <MapContainer options=map_options() map=map class="kommuner-page__map">
                    <LayersControl registry=registry id="kommuner-layers"/>
                    <TileLayers map=map registry=registry/>
                    <LayerGroupSlot name=KOMMUNER_1947 registry=registry>
                        <GeoJsonLayer map=map data=data_for(KOMMUNER_1947) config=feature_config(KOMMUNER_1947)/>
                    </LayerGroupSlot>
                    <LayerGroupSlot name=KOMMUNER_2019 registry=registry>
                        <GeoJsonLayer map=map data=data_for(KOMMUNER_2019) config=feature_config(KOMMUNER_2019)/>
                    </LayerGroupSlot>
                    <LayerGroupSlot name=KOMMUNER_2020 registry=registry>
                        <GeoJsonLayer map=map data=data_for(KOMMUNER_2020) config=feature_config(KOMMUNER_2020)/>
                    </LayerGroupSlot>
                    <LayerGroupSlot name=BYER registry=registry>
                        <MarkerClusterGroup map=map cluster=city_cluster options=city_clusters()>
                            {cities()
                                .into_iter()
                                .map(|(name, position)| {
                                    view! {
                                        <Marker map=map cluster=city_cluster position=position title=name>
                                            <Tooltip slot side=TooltipSide::Top>
                                                {name}
                                            </Tooltip>
                                            <Popup slot class="kommuner-page__city">
                                                <strong>{name}</strong>
                                            </Popup>
                                        </Marker>
                                    }
                                })
                                .collect_view()}
                        </MarkerClusterGroup>
                        <VectorShape map=map shape=country_length() class="kommuner-page__length">
                            <Tooltip slot side=TooltipSide::Right>
                                "Lindesnes - Nordkapp"
                            </Tooltip>
                        </VectorShape>
                    </LayerGroupSlot>
                    <div class="map__controls map__controls--top-left">
                        <SearchControl on_search=on_search placeholder="Søk etter kommune"/>
                    </div>
                    <div class="map__controls map__controls--top-right">
                        <ZoomControl map=map/>
                        <FullscreenControl map=map side=TooltipSide::Left/>
                        <LocateControl map=map side=TooltipSide::Left/>
                        <DrawToolbar map=map controller=draw side=TooltipSide::Left/>
                    </div>
                    <div class="map__controls map__controls--bottom-left">
                        <DatasetBanner datasets=datasets/>
                    </div>
                </MapContainer>
            </MapLayers>
            <p class="kommuner-page__summary" aria-live="polite">
                {move || drawn.get()}
            </p>
            <p class="kommuner-page__credits" inner_html=DATA_ATTRIBUTION></p>
        </section>
    }
}
