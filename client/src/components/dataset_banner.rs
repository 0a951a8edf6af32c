//! Non-fatal notice shown when some map data failed to load.

use leptos::prelude::*;

use mapcore::datasets::DatasetSet;

#[component]
pub fn DatasetBanner(datasets: RwSignal<DatasetSet, LocalStorage>) -> impl IntoView {
    let banner = move || datasets.with(DatasetSet::banner);
    let loading = move || datasets.with(DatasetSet::is_loading);

    view! {
        <Show when=loading>
            <div class="map-banner map-banner--loading" aria-busy="true">
                "Loading map data..."
            </div>
        </Show>
        {move || {
            banner()
                .map(|message| {
                    view! {
                        <div class="map-banner map-banner--error" role="alert">
                            {message}
                        </div>
                    }
                })
        }}
    }
}
