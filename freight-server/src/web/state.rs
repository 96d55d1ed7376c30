//! Application state for the web layer.

use std::sync::Arc;

use crate::dataset::Datasets;
use crate::korail::{ChromeLauncher, KorailScraper};
use crate::live::TrainInfoResolver;
use crate::nxlogis::NxLogisClient;

/// Shared application state.
///
/// Generic over the two live-status sources so the router can be
/// exercised with test doubles.
pub struct AppState<P, S> {
    /// Reference tables, possibly still loading
    pub datasets: Datasets,

    /// Live status resolver
    pub resolver: Arc<TrainInfoResolver<P, S>>,
}

/// State wired to the production sources.
pub type LiveAppState = AppState<KorailScraper<ChromeLauncher>, NxLogisClient>;

impl<P, S> AppState<P, S> {
    /// Create a new app state.
    pub fn new(datasets: Datasets, resolver: TrainInfoResolver<P, S>) -> Self {
        Self {
            datasets,
            resolver: Arc::new(resolver),
        }
    }
}

impl<P, S> Clone for AppState<P, S> {
    fn clone(&self) -> Self {
        Self {
            datasets: self.datasets.clone(),
            resolver: Arc::clone(&self.resolver),
        }
    }
}
