//! Search box that hands the query to the host application.
//!
//! No geocoding happens here; `on_search` decides what a query means.

#[cfg(test)]
#[path = "search_control_test.rs"]
mod search_control_test;

use leptos::prelude::*;

/// Trimmed query, or `None` when there is nothing to search for.
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if query.is_empty() { None } else { Some(query) }
}

#[component]
pub fn SearchControl(
    on_search: Callback<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let query = RwSignal::new(String::new());
    let placeholder = placeholder.unwrap_or_else(|| "Search".to_owned());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(query) = query.with_untracked(|raw| normalize_query(raw)) {
            on_search.run(query);
        }
    };

    view! {
        <form class="map-control map-search-control" role="search" on:submit=submit>
            <input
                class="map-search-control__input"
                type="search"
                aria-label=placeholder.clone()
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <button class="map-search-control__submit" type="submit" aria-label="Search">
                <span class="map-search-control__icon" aria-hidden="true"></span>
            </button>
        </form>
    }
}
