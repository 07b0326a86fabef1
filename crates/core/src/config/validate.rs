use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - At least one destination root unless renaming in place
/// - Copy buffer size is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let placement = &config.placement;
    if !placement.in_place && placement.movies.is_none() && placement.tv.is_none() {
        return Err(ConfigError::ValidationError(
            "a movies or tv destination is required unless renaming in place".to_string(),
        ));
    }

    if config.reconciler.buffer_size == 0 {
        return Err(ConfigError::ValidationError(
            "reconciler.buffer_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}
