// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Installs a global `tracing` subscriber built from a `Registry`, one
//! console layer in the requested format and, with the `file-logging`
//! feature, a daily-rotated JSON file per run.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Guard that keeps file writers flushing until dropped
///
/// Hold it for the lifetime of the program. Without the `file-logging`
/// feature it carries nothing.
#[derive(Default)]
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Directory of the current run's log files, if file logging is active
    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.log_dir.as_ref()
    }
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard")
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

/// Initialize console logging at `info` with per-crate debug overrides
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(flags: &CrateDebugFlags, format: LogFormat) -> Result<LoggingGuard> {
    let config = LoggingConfig {
        format,
        ..LoggingConfig::default()
    };
    init_logging_with_config(flags, &config)
}

/// Initialize logging from a full [`LoggingConfig`]
///
/// `RUST_LOG`, when set, takes precedence over the configured level and
/// debug flags.
pub fn init_logging_with_config(
    flags: &CrateDebugFlags,
    config: &LoggingConfig,
) -> Result<LoggingGuard> {
    let filter_string = flags.to_filter_string(&config.level);
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_filter = build_filter(&filter_string)?;
    let console_layer: BoxedLayer = match config.format {
        LogFormat::Pretty => fmt::layer().with_target(true).with_filter(console_filter).boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_filter(console_filter)
            .boxed(),
    };
    layers.push(console_layer);

    #[allow(unused_mut)]
    let mut guard = LoggingGuard::default();

    #[cfg(feature = "file-logging")]
    if let Some(base_dir) = &config.file_dir {
        let run_dir = file::prepare_run_dir(base_dir, config.retention_runs)?;
        let appender = tracing_appender::rolling::daily(&run_dir, "neuroscene.log");
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(build_filter(&filter_string)?)
                .boxed(),
        );
        guard._file_guards.push(file_guard);
        guard.log_dir = Some(run_dir);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logging subscriber: {}", e))?;

    tracing::debug!(
        target: "neuroscene_observability",
        "Logging initialized (filter: {}, format: {})",
        filter_string,
        config.format
    );
    Ok(guard)
}

/// Initialize with debug flags from process arguments and `NEUROSCENE_DEBUG`
pub fn init_logging_default() -> Result<LoggingGuard> {
    init_logging(&crate::cli::parse_debug_flags(), LogFormat::Pretty)
}

fn build_filter(filter_string: &str) -> Result<EnvFilter> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return EnvFilter::try_from_default_env()
            .map_err(|e| anyhow!("Invalid {}: {}", EnvFilter::DEFAULT_ENV, e));
    }
    EnvFilter::try_new(filter_string)
        .map_err(|e| anyhow!("Invalid log filter '{}': {}", filter_string, e))
}

#[cfg(feature = "file-logging")]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};

    const RUN_PREFIX: &str = "run_";

    /// Create `base/run_<timestamp>` and prune all but the newest runs
    pub(super) fn prepare_run_dir(base: &Path, retention_runs: usize) -> Result<PathBuf> {
        fs::create_dir_all(base)
            .with_context(|| format!("Failed to create log directory {}", base.display()))?;
        cleanup_old_runs(base, retention_runs.saturating_sub(1))?;

        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let run_dir = base.join(format!("{}{}", RUN_PREFIX, stamp));
        fs::create_dir_all(&run_dir)
            .with_context(|| format!("Failed to create run directory {}", run_dir.display()))?;
        Ok(run_dir)
    }

    /// Remove older run folders, keeping the `keep` most recent
    pub(super) fn cleanup_old_runs(base: &Path, keep: usize) -> Result<()> {
        let mut runs: Vec<PathBuf> = fs::read_dir(base)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_dir()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(RUN_PREFIX))
            })
            .collect();

        // Timestamped names sort chronologically
        runs.sort();
        let excess = runs.len().saturating_sub(keep);
        for old in runs.into_iter().take(excess) {
            if let Err(e) = fs::remove_dir_all(&old) {
                eprintln!("Failed to remove old log run {}: {}", old.display(), e);
            }
        }
        Ok(())
    }

}
