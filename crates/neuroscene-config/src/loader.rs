// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)
//!
//! Override values that fail to parse are ignored and the previous value is
//! kept.

use crate::{ConfigError, ConfigResult, NeuroSceneConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "neuroscene.toml";
pub const CONFIG_PATH_ENV: &str = "NEUROSCENE_CONFIG_PATH";

/// Find the neuroscene configuration file
///
/// Search order:
/// 1. `NEUROSCENE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neuroscene.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "neuroscene configuration file '{}' not found in any of these locations:\n{}\n\nSet {} environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Returns
///
/// Complete `NeuroSceneConfig` with all overrides applied
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroSceneConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NeuroSceneConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Like `load_config` without an explicit path, but falls back to built-in
/// defaults (plus overrides) when no file exists anywhere
///
/// # Errors
///
/// A file that exists but cannot be read or parsed is still an error.
pub fn load_config_or_default(
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroSceneConfig> {
    match find_config_file() {
        Ok(path) => load_config(Some(&path), cli_args),
        Err(ConfigError::FileNotFound(_)) if env::var(CONFIG_PATH_ENV).is_err() => {
            let mut config = NeuroSceneConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEUROSCENE_REGION_CHUNK_SIZE` -> `pipeline.region_chunk_size`
/// - `NEUROSCENE_CONNECTION_CHUNK_SIZE` -> `pipeline.connection_chunk_size`
/// - `NEUROSCENE_DETAIL_LEVEL` -> `detail.default_level`
/// - `NEUROSCENE_FORCED_DETAIL_LEVEL` -> `detail.forced_level`
/// - `NEUROSCENE_DEVICE_CLASS` -> `detail.device_class`
/// - `NEUROSCENE_ADAPTIVE_DETAIL` -> `detail.adaptive`
/// - `NEUROSCENE_LOG_LEVEL` -> `logging.level`
/// - `NEUROSCENE_LOG_FORMAT` -> `logging.format`
pub fn apply_environment_overrides(config: &mut NeuroSceneConfig) {
    // Pipeline settings
    if let Ok(value) = env::var("NEUROSCENE_REGION_CHUNK_SIZE") {
        if let Ok(size) = value.parse::<usize>() {
            config.pipeline.region_chunk_size = size;
        }
    }
    if let Ok(value) = env::var("NEUROSCENE_CONNECTION_CHUNK_SIZE") {
        if let Ok(size) = value.parse::<usize>() {
            config.pipeline.connection_chunk_size = size;
        }
    }

    // Detail settings
    if let Ok(value) = env::var("NEUROSCENE_DETAIL_LEVEL") {
        config.detail.default_level = value;
    }
    if let Ok(value) = env::var("NEUROSCENE_FORCED_DETAIL_LEVEL") {
        config.detail.forced_level = Some(value);
    }
    if let Ok(value) = env::var("NEUROSCENE_DEVICE_CLASS") {
        config.detail.device_class = Some(value);
    }
    if let Ok(value) = env::var("NEUROSCENE_ADAPTIVE_DETAIL") {
        config.detail.adaptive = parse_flag(&value);
    }

    // Logging settings
    if let Ok(value) = env::var("NEUROSCENE_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("NEUROSCENE_LOG_FORMAT") {
        config.logging.format = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"forced_level": "low", "region_chunk_size": "40"}`)
pub fn apply_cli_overrides(config: &mut NeuroSceneConfig, cli_args: &HashMap<String, String>) {
    // Pipeline settings
    if let Some(value) = cli_args.get("region_chunk_size") {
        if let Ok(size) = value.parse::<usize>() {
            config.pipeline.region_chunk_size = size;
        }
    }
    if let Some(value) = cli_args.get("connection_chunk_size") {
        if let Ok(size) = value.parse::<usize>() {
            config.pipeline.connection_chunk_size = size;
        }
    }

    // Detail settings
    if let Some(value) = cli_args.get("detail_level") {
        config.detail.default_level = value.clone();
    }
    if let Some(value) = cli_args.get("forced_level") {
        config.detail.forced_level = Some(value.clone());
    }
    if let Some(value) = cli_args.get("device_class") {
        config.detail.device_class = Some(value.clone());
    }
    if let Some(value) = cli_args.get("adaptive") {
        config.detail.adaptive = parse_flag(value);
    }

    // Logging settings
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        File::create(&config_path).unwrap();

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_missing_env_path_is_an_error() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nowhere.toml");

        env::set_var(CONFIG_PATH_ENV, missing.to_str().unwrap());
        let found = find_config_file();
        let loaded = load_config_or_default(None);
        env::remove_var(CONFIG_PATH_ENV);

        assert!(matches!(found, Err(ConfigError::FileNotFound(_))));
        // An explicit path that does not exist never falls back to defaults
        assert!(loaded.is_err());
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let saved = env::var("NEUROSCENE_REGION_CHUNK_SIZE").ok();
        env::remove_var("NEUROSCENE_REGION_CHUNK_SIZE");

        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[pipeline]").unwrap();
        writeln!(file, "region_chunk_size = 64").unwrap();
        writeln!(file, "[detail]").unwrap();
        writeln!(file, "device_class = \"low\"").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.pipeline.region_chunk_size, 64);
        assert_eq!(config.pipeline.connection_chunk_size, 50);
        assert_eq!(config.detail.device_class.as_deref(), Some("low"));

        if let Some(value) = saved {
            env::set_var("NEUROSCENE_REGION_CHUNK_SIZE", value);
        }
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = NeuroSceneConfig::default();

        env::set_var("NEUROSCENE_CONNECTION_CHUNK_SIZE", "125");
        env::set_var("NEUROSCENE_ADAPTIVE_DETAIL", "no");
        env::set_var("NEUROSCENE_REGION_CHUNK_SIZE", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("NEUROSCENE_CONNECTION_CHUNK_SIZE");
        env::remove_var("NEUROSCENE_ADAPTIVE_DETAIL");
        env::remove_var("NEUROSCENE_REGION_CHUNK_SIZE");

        assert_eq!(config.pipeline.connection_chunk_size, 125);
        assert!(!config.detail.adaptive);
        assert_eq!(config.pipeline.region_chunk_size, 20);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = NeuroSceneConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("forced_level".to_string(), "high".to_string());
        cli_args.insert("log_format".to_string(), "json".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.detail.forced_level.as_deref(), Some("high"));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"warn\"").unwrap();
        writeln!(file, "format = \"compact\"").unwrap();

        env::set_var("NEUROSCENE_LOG_LEVEL", "debug");
        env::set_var("NEUROSCENE_LOG_FORMAT", "json");

        let mut cli_args = HashMap::new();
        cli_args.insert("log_level".to_string(), "trace".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("NEUROSCENE_LOG_LEVEL");
        env::remove_var("NEUROSCENE_LOG_FORMAT");

        // CLI wins for level, env wins for format (no CLI override)
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "json");
    }
}
