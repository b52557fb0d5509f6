// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for detail control

use thiserror::Error;

/// Result type for detail control operations
pub type DetailResult<T> = Result<T, DetailError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetailError {
    #[error("Unknown detail level: {0}")]
    UnknownLevel(String),

    #[error("Unknown device class: {0}")]
    UnknownDeviceClass(String),

    #[error("Invalid adaptation policy: {0}")]
    InvalidPolicy(String),
}
