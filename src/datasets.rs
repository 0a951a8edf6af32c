//! Outcome tracking for remote feature collections.
//!
//! Fetching is the caller's job. This module records what came back for each
//! named source so a map can render whatever loaded, leave failed layers out
//! and show a single non-fatal banner. Every load round carries a
//! [`DatasetToken`]; results from an aborted round are dropped.

#[cfg(test)]
#[path = "datasets_test.rs"]
mod datasets_test;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::DATASET_FAILURE_MESSAGE;
use crate::error::DatasetError;
use crate::geo::FeatureCollection;

/// A named remote feature collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub name: String,
    pub url: String,
}

impl DatasetSource {
    #[must_use]
    pub fn new(name: &str, url: &str) -> Self {
        Self { name: name.to_owned(), url: url.to_owned() }
    }
}

/// Load outcome of one source.
#[derive(Debug, Clone)]
pub enum DatasetStatus {
    Pending,
    Loaded(Rc<FeatureCollection>),
    Failed(DatasetError),
}

/// Identifies one load round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetToken(u64);

/// Per-source load state for a fixed list of sources.
#[derive(Debug, Clone)]
pub struct DatasetSet {
    sources: Vec<DatasetSource>,
    statuses: Vec<DatasetStatus>,
    generation: u64,
}

impl DatasetSet {
    #[must_use]
    pub fn new(sources: Vec<DatasetSource>) -> Self {
        let statuses = sources.iter().map(|_| DatasetStatus::Pending).collect();
        Self { sources, statuses, generation: 0 }
    }

    #[must_use]
    pub fn sources(&self) -> &[DatasetSource] {
        &self.sources
    }

    /// Start a round: every source goes back to pending.
    pub fn begin(&mut self) -> DatasetToken {
        self.generation += 1;
        for status in &mut self.statuses {
            *status = DatasetStatus::Pending;
        }
        DatasetToken(self.generation)
    }

    /// Abandon the current round. Its results will be ignored.
    pub fn abort(&mut self) {
        self.generation += 1;
    }

    /// Record the outcome for `name`. Returns `false` when the round was
    /// aborted or the source is unknown.
    pub fn complete(
        &mut self,
        token: DatasetToken,
        name: &str,
        result: Result<FeatureCollection, DatasetError>,
    ) -> bool {
        if token.0 != self.generation {
            log::debug!("datasets: dropping result for {name:?} from an aborted load");
            return false;
        }
        let Some(index) = self.sources.iter().position(|source| source.name == name) else {
            log::warn!("datasets: result for unknown source {name:?}");
            return false;
        };
        self.statuses[index] = match result {
            Ok(collection) => {
                log::debug!("datasets: {name:?} loaded {} features", collection.len());
                DatasetStatus::Loaded(Rc::new(collection))
            }
            Err(err) => {
                log::warn!("datasets: {err}");
                DatasetStatus::Failed(err)
            }
        };
        true
    }

    #[must_use]
    pub fn status(&self, name: &str) -> Option<&DatasetStatus> {
        let index = self.sources.iter().position(|source| source.name == name)?;
        self.statuses.get(index)
    }

    /// Loaded data for `name`; `None` while pending or after a failure.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<Rc<FeatureCollection>> {
        match self.status(name)? {
            DatasetStatus::Loaded(collection) => Some(Rc::clone(collection)),
            DatasetStatus::Pending | DatasetStatus::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.statuses.iter().any(|status| matches!(status, DatasetStatus::Pending))
    }

    /// Names of the sources that failed, in declaration order.
    #[must_use]
    pub fn failed(&self) -> Vec<&str> {
        self.sources
            .iter()
            .zip(&self.statuses)
            .filter(|(_, status)| matches!(status, DatasetStatus::Failed(_)))
            .map(|(source, _)| source.name.as_str())
            .collect()
    }

    /// Non-fatal banner text, shown when any source failed.
    #[must_use]
    pub fn banner(&self) -> Option<&'static str> {
        if self.failed().is_empty() { None } else { Some(DATASET_FAILURE_MESSAGE) }
    }
}

/// Turn an HTTP response into a feature collection.
///
/// # Errors
///
/// [`DatasetError::Status`] for non-2xx responses, [`DatasetError::Parse`]
/// when the body is not a feature collection.
pub fn parse_response(url: &str, status: u16, body: &str) -> Result<FeatureCollection, DatasetError> {
    if !(200..300).contains(&status) {
        return Err(DatasetError::Status { url: url.to_owned(), status });
    }
    FeatureCollection::from_json(body)
        .map_err(|err| DatasetError::Parse { url: url.to_owned(), message: err.to_string() })
}
