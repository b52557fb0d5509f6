// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neuroscene.toml`. Every section and field is optional in the file; missing
//! values take the defaults below.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuroSceneConfig {
    pub pipeline: PipelineSettings,
    pub detail: DetailSettings,
    pub logging: LoggingSettings,
}

/// Progressive loader configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub region_chunk_size: usize,
    pub connection_chunk_size: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            region_chunk_size: 20,
            connection_chunk_size: 50,
        }
    }
}

/// Adaptive detail controller configuration.
///
/// Levels and device classes are kept as strings here; the detail crate parses
/// them. `validate_config` rejects unknown names early.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetailSettings {
    /// "low", "medium", "high" or "dynamic"
    pub default_level: String,
    pub forced_level: Option<String>,
    /// "low", "medium" or "high"; unset means unknown
    pub device_class: Option<String>,
    pub high_fps_threshold: f64,
    pub medium_fps_threshold: f64,
    pub recovery_delay_ms: u64,
    pub sample_window: usize,
    pub adaptive: bool,
}

impl Default for DetailSettings {
    fn default() -> Self {
        Self {
            default_level: "medium".to_string(),
            forced_level: None,
            device_class: None,
            high_fps_threshold: 55.0,
            medium_fps_threshold: 35.0,
            recovery_delay_ms: 2000,
            sample_window: 30,
            adaptive: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level for every neuroscene crate ("trace" .. "error")
    pub level: String,
    /// "pretty", "compact" or "json"
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

pub const DETAIL_LEVELS: &[&str] = &["low", "medium", "high", "dynamic"];
pub const DEVICE_CLASSES: &[&str] = &["low", "medium", "high"];
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
pub const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: NeuroSceneConfig = toml::from_str("").unwrap();
        assert_eq!(config, NeuroSceneConfig::default());
    }

    #[test]
    fn test_partial_section() {
        let config: NeuroSceneConfig = toml::from_str(
            r#"
            [detail]
            forced_level = "low"
            sample_window = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.detail.forced_level.as_deref(), Some("low"));
        assert_eq!(config.detail.sample_window, 10);
        assert_eq!(config.detail.high_fps_threshold, 55.0);
        assert_eq!(config.pipeline.region_chunk_size, 20);
    }

    #[test]
    fn test_serializes_as_json() {
        let json = serde_json::to_value(NeuroSceneConfig::default()).unwrap();
        assert_eq!(json["pipeline"]["connection_chunk_size"], 50);
        assert_eq!(json["logging"]["format"], "pretty");
    }
}
