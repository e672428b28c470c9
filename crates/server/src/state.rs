use std::sync::Arc;
use htr_core::{Config, RecognitionPipeline};

/// Shared application state
pub struct AppState {
    config: Config,
    pipeline: Arc<RecognitionPipeline>,
}

impl AppState {
    pub fn new(config: Config, pipeline: Arc<RecognitionPipeline>) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> &RecognitionPipeline {
        self.pipeline.as_ref()
    }
}
