//! Recognition pipeline implementation.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::fetcher::ImageFetcher;
use crate::metrics::{
    BATCHES_TOTAL, BATCH_DURATION, BATCH_SIZE, CLEANUP_FAILURES, ITEMS_TRANSCRIBED,
    RECOGNIZER_DURATION, STAGE_FAILURES,
};
use crate::normalizer::Normalizer;
use crate::recognizer::Recognizer;

use super::correlator::correlate;
use super::error::PipelineError;
use super::manifest::ManifestWriter;
use super::types::{BatchItem, ImageRequest, PipelineConfig, RecognitionResult};

/// Runs batches through fetch, normalize, decode, correlate and cleanup.
///
/// Each stage must succeed for every item before the next one starts. The
/// recognizer sees the whole batch in a single invocation.
pub struct RecognitionPipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn ImageFetcher>,
    normalizer: Arc<dyn Normalizer>,
    recognizer: Arc<dyn Recognizer>,
    manifest: ManifestWriter,
    /// Held from manifest write until the recognizer returns.
    decode_lock: Mutex<()>,
}

impl RecognitionPipeline {
    /// Creates a new pipeline over the given collaborators.
    pub fn new(
        config: PipelineConfig,
        fetcher: Arc<dyn ImageFetcher>,
        normalizer: Arc<dyn Normalizer>,
        recognizer: Arc<dyn Recognizer>,
    ) -> Self {
        let manifest = ManifestWriter::new(config.manifest_path());
        Self {
            config,
            fetcher,
            normalizer,
            recognizer,
            manifest,
            decode_lock: Mutex::new(()),
        }
    }

    /// Returns the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Recognizes a batch of images.
    ///
    /// Results come back in request order, one per request. Any stage failure
    /// fails the whole batch; no partial results are returned.
    pub async fn process(
        &self,
        requests: Vec<ImageRequest>,
    ) -> Result<Vec<RecognitionResult>, PipelineError> {
        let start = Instant::now();
        let result = self.run(requests).await;
        let elapsed = start.elapsed().as_secs_f64();

        match &result {
            Ok(results) => {
                BATCHES_TOTAL.with_label_values(&["success"]).inc();
                BATCH_DURATION.with_label_values(&["success"]).observe(elapsed);
                ITEMS_TRANSCRIBED.inc_by(results.len() as u64);
            }
            Err(e) => {
                BATCHES_TOTAL.with_label_values(&["failed"]).inc();
                BATCH_DURATION.with_label_values(&["failed"]).observe(elapsed);
                STAGE_FAILURES.with_label_values(&[e.stage()]).inc();
            }
        }

        result
    }

    async fn run(
        &self,
        requests: Vec<ImageRequest>,
    ) -> Result<Vec<RecognitionResult>, PipelineError> {
        if requests.is_empty() {
            return Err(PipelineError::EmptyBatch);
        }

        let batch_id = Uuid::new_v4().simple().to_string();
        let mut items = requests
            .into_iter()
            .enumerate()
            .map(|(ordinal, request)| {
                BatchItem::new(&batch_id, ordinal, request, &self.config.data_dir)
            })
            .collect::<Result<Vec<_>, _>>()?;

        BATCH_SIZE.with_label_values(&[]).observe(items.len() as f64);
        info!(batch_id = %batch_id, images = items.len(), "Processing batch");

        for item in &items {
            self.prepare(&batch_id, item).await?;
        }
        info!(batch_id = %batch_id, "Images downloaded and resized");

        let decoded = self.decode(&batch_id, &mut items).await;

        self.cleanup(&batch_id, &items).await;

        decoded?;

        info!(batch_id = %batch_id, images = items.len(), "Batch recognized");
        Ok(items.into_iter().map(RecognitionResult::from).collect())
    }

    /// Fetches and normalizes one item. Files from earlier items stay on disk
    /// if this fails.
    async fn prepare(&self, batch_id: &str, item: &BatchItem) -> Result<(), PipelineError> {
        let bytes = self
            .fetcher
            .fetch(&item.source_url, &item.local_path)
            .await
            .map_err(|source| {
                error!(batch_id = %batch_id, item_id = %item.id, url = %item.source_url, error = %source, "Failed downloading image");
                PipelineError::FetchFailed {
                    id: item.id.clone(),
                    source,
                }
            })?;
        debug!(batch_id = %batch_id, item_id = %item.id, bytes, "Image downloaded");

        self.normalizer
            .normalize(&item.local_path)
            .await
            .map_err(|source| {
                error!(batch_id = %batch_id, item_id = %item.id, path = %item.local_path.display(), error = %source, "Failed resizing image");
                PipelineError::NormalizeFailed {
                    id: item.id.clone(),
                    source,
                }
            })?;
        debug!(batch_id = %batch_id, item_id = %item.id, "Image resized");

        Ok(())
    }

    /// Writes the manifest, runs the recognizer and correlates its output.
    async fn decode(&self, batch_id: &str, items: &mut [BatchItem]) -> Result<(), PipelineError> {
        let raw_output = {
            let _guard = self.decode_lock.lock().await;

            let paths: Vec<_> = items.iter().map(|item| &item.local_path).collect();
            self.manifest.write(&paths).await.map_err(|e| {
                error!(batch_id = %batch_id, error = %e, "Failed writing manifest");
                PipelineError::from(e)
            })?;
            debug!(batch_id = %batch_id, manifest = %self.manifest.path().display(), "Manifest written");

            let start = Instant::now();
            let result = self.recognizer.recognize(self.manifest.path()).await;
            let label = if result.is_ok() { "success" } else { "failed" };
            RECOGNIZER_DURATION
                .with_label_values(&[label])
                .observe(start.elapsed().as_secs_f64());

            result.map_err(|e| {
                error!(
                    batch_id = %batch_id,
                    error = %e,
                    output = e.output().unwrap_or_default(),
                    "Recognizer failed"
                );
                PipelineError::from(e)
            })?
        };

        correlate(&raw_output, items).map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "Recognizer output does not match batch");
            PipelineError::from(e)
        })?;

        for item in items.iter() {
            debug!(
                batch_id = %batch_id,
                item_id = %item.id,
                transcription = item.transcription.as_deref().unwrap_or_default(),
                "Image transcribed"
            );
        }

        Ok(())
    }

    /// Deletes every item's local file. Failures are logged, never returned.
    async fn cleanup(&self, batch_id: &str, items: &[BatchItem]) {
        for item in items {
            if let Err(e) = tokio::fs::remove_file(&item.local_path).await {
                CLEANUP_FAILURES.inc();
                warn!(
                    batch_id = %batch_id,
                    item_id = %item.id,
                    path = %item.local_path.display(),
                    error = %e,
                    "Failed deleting image after decoding"
                );
            }
        }
    }
}
