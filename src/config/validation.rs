use crate::config::types::{Config, HttpConfig, ReportConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_report_config(&config.report)?;
    Ok(())
}

/// Validates HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.max_redirects > 50 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 50, got {}",
            config.max_redirects
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    // Header values must be visible ASCII
    if !config
        .user_agent
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control())
    {
        return Err(ConfigError::Validation(format!(
            "user-agent must be printable ASCII, got '{}'",
            config.user_agent
        )));
    }

    Ok(())
}

/// Validates report configuration
fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.min_image_bytes == 0 {
        return Err(ConfigError::Validation(
            "min-image-bytes must be greater than 0".to_string(),
        ));
    }

    if config.image_report.trim().is_empty() {
        return Err(ConfigError::Validation(
            "image-report path cannot be empty".to_string(),
        ));
    }

    if config.failed_websites.trim().is_empty() {
        return Err(ConfigError::Validation(
            "failed-websites path cannot be empty".to_string(),
        ));
    }

    if config.image_report == config.failed_websites {
        return Err(ConfigError::Validation(format!(
            "image-report and failed-websites must differ, both are '{}'",
            config.image_report
        )));
    }

    Ok(())
}
