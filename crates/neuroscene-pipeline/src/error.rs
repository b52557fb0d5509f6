// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core error type for the brain model pipeline.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use neuroscene_structures::ValidationError;
use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error types for pipeline operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Validator rejection, passed through with its original message
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unexpected failure while processing a chunk of the progressive loader
    #[error("Chunk processing failed: {0}")]
    ChunkProcessing(String),

    /// Cancellation flag observed at a yield point
    #[error("Progressive load cancelled after {processed} of {total} items")]
    Cancelled { processed: usize, total: usize },
}

impl PipelineError {
    /// The underlying validation error, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            PipelineError::Validation(err) => Some(err),
            _ => None,
        }
    }
}
