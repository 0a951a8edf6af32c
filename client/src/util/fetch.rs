//! Remote feature collection loading.
//!
//! Fetches are cancelled through an `AbortController` when the page that
//! started them unmounts; whatever still arrives is dropped by the
//! `mapcore::datasets::DatasetSet` generation check.

use gloo_net::http::Request;
use web_sys::AbortSignal;

use mapcore::datasets::parse_response;
use mapcore::error::DatasetError;
use mapcore::geo::FeatureCollection;

/// GET `url` and parse the body as a feature collection.
pub async fn fetch_collection(url: &str, signal: Option<&AbortSignal>) -> Result<FeatureCollection, DatasetError> {
    let network = |err: gloo_net::Error| DatasetError::Network { url: url.to_owned(), message: err.to_string() };
    let response = Request::get(url).abort_signal(signal).send().await.map_err(network)?;
    let status = response.status();
    let body = response.text().await.map_err(network)?;
    parse_response(url, status, &body)
}
