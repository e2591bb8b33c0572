use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Storage path is not empty
/// - View timings are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Storage validation
    if config.storage.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.path cannot be empty".to_string(),
        ));
    }

    // View validation
    if config.view.search_debounce_ms == 0 {
        return Err(ConfigError::ValidationError(
            "view.search_debounce_ms cannot be 0".to_string(),
        ));
    }
    if config.view.refresh_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "view.refresh_interval_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
