//! Application state for the HTTP server.

use std::sync::Arc;

use crate::client::PredictionService;
use crate::services::DatasetStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Model service used for predictions and evaluation
    pub predictor: Arc<dyn PredictionService>,
    /// Prediction sets uploaded during this process lifetime
    pub datasets: DatasetStore,
    /// Sample size used when an upload does not specify one
    pub default_sample_size: u32,
}

impl AppState {
    pub fn new(predictor: Arc<dyn PredictionService>, datasets: DatasetStore) -> Self {
        Self {
            predictor,
            datasets,
            default_sample_size: 3000,
        }
    }

    pub fn with_default_sample_size(mut self, sample_size: u32) -> Self {
        self.default_sample_size = sample_size;
        self
    }
}
