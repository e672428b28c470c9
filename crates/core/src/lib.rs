pub mod config;
pub mod fetcher;
pub mod metrics;
pub mod normalizer;
pub mod pipeline;
mod process;
pub mod recognizer;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, FetcherConfig,
    NormalizerConfig, RecognizerConfig, ServerConfig, StorageConfig,
};
pub use fetcher::{FetchError, HttpFetcher, ImageFetcher};
pub use normalizer::{ImageMagickNormalizer, NormalizeError, Normalizer};
pub use pipeline::{
    BatchItem, BatchRequest, ImageRequest, PipelineConfig, PipelineError, RecognitionPipeline,
    RecognitionResult,
};
pub use recognizer::{LaiaRecognizer, Recognizer, RecognizerError};
