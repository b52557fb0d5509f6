// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroscene Observability
//!
//! Logging setup shared by every neuroscene binary:
//!
//! - Per-crate debug flags (`--debug-neuroscene-pipeline`, `--debug-all`)
//! - Console output as pretty, compact or JSON lines
//! - Rotated JSON log files per run (`file-logging` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroscene_observability::{init_logging, parse_debug_flags, LogFormat};
//!
//! let flags = parse_debug_flags();
//! let _guard = init_logging(&flags, LogFormat::Pretty).expect("logging");
//! tracing::info!("ready");
//! ```

pub mod cli;
pub mod config;
pub mod init;

pub use cli::{debug_flags_help, parse_debug_flags, CrateDebugFlags, DEBUG_ENV};
pub use config::{LogFormat, LoggingConfig};
pub use init::{init_logging, init_logging_default, init_logging_with_config, LoggingGuard};

/// Crates that accept `--debug-<name>` flags
pub const KNOWN_CRATES: &[&str] = &[
    "neuroscene",
    "neuroscene-structures",
    "neuroscene-pipeline",
    "neuroscene-detail",
    "neuroscene-services",
    "neuroscene-config",
    "neuroscene-observability",
];

/// Observability setup errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Unknown log format '{0}' (expected pretty, compact or json)")]
    UnknownFormat(String),
}
