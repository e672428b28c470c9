use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::pipeline::PipelineConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

impl Config {
    /// Projects the storage section into the value the pipeline is built with.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            data_dir: self.storage.data_dir.clone(),
            manifest_name: self.storage.manifest_name.clone(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    12191
}

/// Local storage for downloaded images and the decode manifest
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding transient images and the manifest
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// File name of the manifest inside `data_dir`
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            manifest_name: default_manifest_name(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_manifest_name() -> String {
    "imgs2decode.txt".to_string()
}

/// Image download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherConfig {
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    30
}

/// ImageMagick resize configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizerConfig {
    /// Path to the `convert` binary
    #[serde(default = "default_convert_path")]
    pub convert_path: PathBuf,
    /// Pixel height expected by the model; width scales with it
    #[serde(default = "default_img_height")]
    pub img_height: u32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            convert_path: default_convert_path(),
            img_height: default_img_height(),
        }
    }
}

fn default_convert_path() -> PathBuf {
    PathBuf::from("convert")
}

fn default_img_height() -> u32 {
    64
}

/// Laia recognizer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecognizerConfig {
    /// Path to the `laia-docker` launcher
    #[serde(default = "default_laia_path")]
    pub laia_path: PathBuf,
    /// Trained model file
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Table of symbols the model can emit
    #[serde(default = "default_symbols_path")]
    pub symbols_path: PathBuf,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            laia_path: default_laia_path(),
            model_path: default_model_path(),
            symbols_path: default_symbols_path(),
        }
    }
}

fn default_laia_path() -> PathBuf {
    PathBuf::from("laia-docker")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.t7")
}

fn default_symbols_path() -> PathBuf {
    PathBuf::from("symbs.txt")
}
