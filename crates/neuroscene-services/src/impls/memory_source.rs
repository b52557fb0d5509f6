// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
In-memory model source, for fixtures and hosts that already hold payloads.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use ahash::AHashMap;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::trace;

use crate::traits::BrainModelSource;
use crate::types::*;

#[derive(Debug, Default)]
pub struct InMemoryModelSource {
    models: RwLock<AHashMap<String, Value>>,
}

impl InMemoryModelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store payloads under their own `id` field; payloads without a string
    /// `id` are skipped
    pub fn with_models<I>(models: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let source = Self::new();
        for model in models {
            if let Some(id) = model.get("id").and_then(Value::as_str).map(str::to_string) {
                source.insert(id, model);
            }
        }
        source
    }

    /// Store `model` under `id`, returning the payload it replaced
    pub fn insert(&self, id: impl Into<String>, model: Value) -> Option<Value> {
        self.models.write().insert(id.into(), model)
    }

    pub fn remove(&self, id: &str) -> Option<Value> {
        self.models.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }
}

#[async_trait]
impl BrainModelSource for InMemoryModelSource {
    async fn get_model(&self, id: &str) -> ServiceResult<Value> {
        trace!("In-memory lookup of model '{}'", id);
        self.models
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::model_not_found(id))
    }

    async fn search_models(&self, query: &ModelQuery) -> ServiceResult<ModelSearchResults> {
        let mut candidates: Vec<(String, Value)> = self
            .models
            .read()
            .iter()
            .map(|(id, model)| (id.clone(), model.clone()))
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(query.select(candidates.into_iter().map(|(_, model)| model)))
    }
}
