//! Prometheus metrics for the recognition pipeline.
//!
//! The server registers these through [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::{core::Collector, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Batch Metrics
// =============================================================================

/// Batches processed total by result.
pub static BATCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("htr_batches_total", "Total recognition batches processed"),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

/// Batch duration in seconds.
pub static BATCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "htr_batch_duration_seconds",
            "End-to-end duration of a recognition batch",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["result"],
    )
    .unwrap()
});

/// Images per batch.
pub static BATCH_SIZE: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("htr_batch_size", "Number of images per batch")
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
        &[],
    )
    .unwrap()
});

/// Batch failures by stage.
pub static STAGE_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "htr_stage_failures_total",
            "Batch failures by pipeline stage",
        ),
        &["stage"], // "request", "fetch", "normalize", "manifest", "recognize", "correlate"
    )
    .unwrap()
});

/// Images successfully transcribed.
pub static ITEMS_TRANSCRIBED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "htr_items_transcribed_total",
        "Total images transcribed successfully",
    )
    .unwrap()
});

// =============================================================================
// Recognizer Metrics
// =============================================================================

/// Recognizer invocation duration in seconds.
pub static RECOGNIZER_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "htr_recognizer_duration_seconds",
            "Duration of one recognizer invocation",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Cleanup Metrics
// =============================================================================

/// Image files that could not be deleted after a batch.
pub static CLEANUP_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "htr_cleanup_failures_total",
        "Total image files that could not be deleted after decoding",
    )
    .unwrap()
});

/// Returns every core collector for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(BATCHES_TOTAL.clone()),
        Box::new(BATCH_DURATION.clone()),
        Box::new(BATCH_SIZE.clone()),
        Box::new(STAGE_FAILURES.clone()),
        Box::new(ITEMS_TRANSCRIBED.clone()),
        Box::new(RECOGNIZER_DURATION.clone()),
        Box::new(CLEANUP_FAILURES.clone()),
    ]
}
