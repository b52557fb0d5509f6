// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Brain model source trait.

A source hands out raw, untrusted payloads. Validation happens downstream in
the pipeline, never in the source.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use async_trait::async_trait;
use serde_json::Value;

use crate::types::*;

/// Origin of brain model payloads (API client, file store, fixture)
#[async_trait]
pub trait BrainModelSource: Send + Sync {
    /// Fetch the raw payload of one model
    ///
    /// # Arguments
    /// * `id` - Model identifier
    ///
    /// # Returns
    /// * `Value` - The payload exactly as the source holds it
    ///
    /// # Errors
    /// * `ServiceError::NotFound` - No model with this id
    /// * `ServiceError::InvalidInput` - The id is unusable, or the stored payload is not JSON
    /// * `ServiceError::Io` - The backing store could not be read
    ///
    async fn get_model(&self, id: &str) -> ServiceResult<Value>;

    /// Search stored models
    ///
    /// # Arguments
    /// * `query` - Filters and paging
    ///
    /// # Returns
    /// * `ModelSearchResults` - One page of matching payloads plus the total match count
    ///
    async fn search_models(&self, query: &ModelQuery) -> ServiceResult<ModelSearchResults>;
}
