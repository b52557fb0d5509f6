// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service layer error types.

Transport-agnostic errors; hosts map them to HTTP status codes, UI messages
or exit codes as they see fit.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use thiserror::Error;

use neuroscene_detail::DetailError;
use neuroscene_pipeline::PipelineError;

/// Service layer errors (transport-agnostic)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Resource not found (404 in HTTP)
    #[error("Not found: {resource} with id '{id}'")]
    NotFound { resource: String, id: String },

    /// Invalid input (400 in HTTP): malformed payloads, bad ids
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backend failure (chunk processing, render surface)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Filesystem or other I/O failure
    #[error("I/O error: {0}")]
    Io(String),

    /// Loading was cancelled by the caller
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn model_not_found(id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            resource: "BrainModel".to_string(),
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}

// ============================================================================
// ERROR CONVERSIONS FROM BACKEND
// ============================================================================

impl From<PipelineError> for ServiceError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(e) => ServiceError::InvalidInput(e.to_string()),
            PipelineError::ChunkProcessing(_) => ServiceError::Backend(err.to_string()),
            PipelineError::Cancelled { .. } => ServiceError::Cancelled(err.to_string()),
        }
    }
}

impl From<DetailError> for ServiceError {
    fn from(err: DetailError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidInput(format!("Malformed JSON: {}", err))
    }
}
