use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Tool paths are not empty
/// - Progress poll interval is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tools.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "tools.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if config.tools.ffprobe_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "tools.ffprobe_path cannot be empty".to_string(),
        ));
    }

    if config.progress.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "progress.poll_interval_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}
