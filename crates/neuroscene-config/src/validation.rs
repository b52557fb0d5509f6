// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module checks that configuration values are within valid ranges and
//! name known levels, device classes and log settings.

use crate::types::{DETAIL_LEVELS, DEVICE_CLASSES, LOG_FORMATS, LOG_LEVELS};
use crate::{ConfigError, ConfigResult, NeuroSceneConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    OutOfRange { field: String, reason: String },
    UnknownName { field: String, value: String, allowed: &'static [&'static str] },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::UnknownName {
                field,
                value,
                allowed,
            } => {
                write!(
                    f,
                    "Unknown value '{}' for {} (expected one of: {})",
                    value,
                    field,
                    allowed.join(", ")
                )
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Non-zero chunk sizes and sample window
/// - Consistent frame-rate thresholds
/// - Known detail levels, device classes, log levels and formats
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &NeuroSceneConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_pipeline(config, &mut errors);
    validate_detail(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_pipeline(config: &NeuroSceneConfig, errors: &mut Vec<ConfigValidationError>) {
    for (field, size) in [
        ("pipeline.region_chunk_size", config.pipeline.region_chunk_size),
        ("pipeline.connection_chunk_size", config.pipeline.connection_chunk_size),
    ] {
        if size == 0 {
            errors.push(ConfigValidationError::OutOfRange {
                field: field.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
    }
}

fn validate_detail(config: &NeuroSceneConfig, errors: &mut Vec<ConfigValidationError>) {
    let detail = &config.detail;

    check_name(errors, "detail.default_level", &detail.default_level, DETAIL_LEVELS);
    if let Some(level) = &detail.forced_level {
        check_name(errors, "detail.forced_level", level, DETAIL_LEVELS);
    }
    if let Some(class) = &detail.device_class {
        check_name(errors, "detail.device_class", class, DEVICE_CLASSES);
    }

    if !(detail.medium_fps_threshold > 0.0) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "detail.medium_fps_threshold".to_string(),
            reason: format!("must be positive, got {}", detail.medium_fps_threshold),
        });
    }
    if !(detail.high_fps_threshold > detail.medium_fps_threshold) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "detail.high_fps_threshold".to_string(),
            reason: format!(
                "must exceed medium_fps_threshold ({}), got {}",
                detail.medium_fps_threshold, detail.high_fps_threshold
            ),
        });
    }
    if detail.sample_window == 0 {
        errors.push(ConfigValidationError::OutOfRange {
            field: "detail.sample_window".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
}

fn validate_logging(config: &NeuroSceneConfig, errors: &mut Vec<ConfigValidationError>) {
    check_name(
        errors,
        "logging.level",
        &config.logging.level.to_lowercase(),
        LOG_LEVELS,
    );
    check_name(errors, "logging.format", &config.logging.format, LOG_FORMATS);
}

fn check_name(
    errors: &mut Vec<ConfigValidationError>,
    field: &str,
    value: &str,
    allowed: &'static [&'static str],
) {
    if !allowed.contains(&value) {
        errors.push(ConfigValidationError::UnknownName {
            field: field.to_string(),
            value: value.to_string(),
            allowed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&NeuroSceneConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut config = NeuroSceneConfig::default();
        config.pipeline.region_chunk_size = 0;
        config.detail.forced_level = Some("ultra".to_string());
        config.detail.high_fps_threshold = 30.0;
        config.logging.format = "xml".to_string();

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("pipeline.region_chunk_size"));
        assert!(message.contains("'ultra' for detail.forced_level"));
        assert!(message.contains("detail.high_fps_threshold"));
        assert!(message.contains("logging.format"));
        assert_eq!(message.matches("  - ").count(), 4);
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = NeuroSceneConfig::default();
        config.logging.level = "WARN".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
