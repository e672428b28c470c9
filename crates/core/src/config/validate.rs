use std::path::Path;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Image height is positive
/// - Manifest name is a plain file name
/// - Storage directory, model and symbols table exist on disk
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.normalizer.img_height == 0 {
        return Err(ConfigError::ValidationError(
            "normalizer.img_height must be greater than 0".to_string(),
        ));
    }

    let manifest = Path::new(&config.storage.manifest_name);
    if config.storage.manifest_name.is_empty()
        || manifest.file_name().map(|n| n != manifest.as_os_str()).unwrap_or(true)
    {
        return Err(ConfigError::ValidationError(format!(
            "storage.manifest_name must be a plain file name, got `{}`",
            config.storage.manifest_name
        )));
    }

    if !config.storage.data_dir.is_dir() {
        return Err(ConfigError::ValidationError(format!(
            "storage.data_dir `{}` does not exist or is not a directory",
            config.storage.data_dir.display()
        )));
    }

    if !config.recognizer.model_path.is_file() {
        return Err(ConfigError::ValidationError(format!(
            "recognizer.model_path `{}` does not exist",
            config.recognizer.model_path.display()
        )));
    }

    if !config.recognizer.symbols_path.is_file() {
        return Err(ConfigError::ValidationError(format!(
            "recognizer.symbols_path `{}` does not exist",
            config.recognizer.symbols_path.display()
        )));
    }

    Ok(())
}
