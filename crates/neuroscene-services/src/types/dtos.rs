// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Data transfer objects for the service layer.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use neuroscene_detail::DetailConfig;
use neuroscene_structures::{BrainRegion, NeuralConnection, ScanType, Vector3};

/// Filter for `BrainModelSource::search_models`.
///
/// Matching reads the raw payload leniently: a payload missing a filtered
/// field simply does not match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelQuery {
    pub patient_id: Option<String>,
    pub scan_type: Option<ScanType>,
    /// Case-insensitive substring of the model id or patient id
    pub text: Option<String>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl ModelQuery {
    pub fn for_patient(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, raw: &Value) -> bool {
        let id = raw.get("id").and_then(Value::as_str);
        let patient = raw.get("patientId").and_then(Value::as_str);

        if let Some(wanted) = &self.patient_id {
            if patient != Some(wanted.as_str()) {
                return false;
            }
        }

        if let Some(wanted) = self.scan_type {
            let scan_type = raw
                .get("scan")
                .and_then(|scan| scan.get("scanType"))
                .and_then(Value::as_str);
            if scan_type != Some(wanted.as_str()) {
                return false;
            }
        }

        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let hit = |field: Option<&str>| field.is_some_and(|s| s.to_lowercase().contains(&needle));
            if !hit(id) && !hit(patient) {
                return false;
            }
        }

        true
    }

    /// Apply matching and paging to payloads already in a stable order
    pub(crate) fn select<I>(&self, candidates: I) -> ModelSearchResults
    where
        I: IntoIterator<Item = Value>,
    {
        let matched: Vec<Value> = candidates.into_iter().filter(|m| self.matches(m)).collect();
        let total = matched.len();
        let models = matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();
        ModelSearchResults { models, total }
    }
}

/// One page of search results. `total` counts all matches before paging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSearchResults {
    pub models: Vec<Value>,
    pub total: usize,
}

/// Everything a render surface needs for one frame of a model
#[derive(Debug, Clone)]
pub struct RenderScene {
    pub model_id: String,
    pub patient_id: String,
    /// Active regions first, cut to the detail bundle's region budget
    pub regions: Vec<BrainRegion>,
    /// Connections between visible regions, filtered by the bundle
    pub connections: Vec<NeuralConnection>,
    /// Region id → position of every visible region
    pub positions: AHashMap<String, Vector3>,
    /// Detail bundle active when the scene was assembled
    pub detail: Arc<DetailConfig>,
    /// Region count of the source model, before the budget was applied
    pub total_regions: usize,
    pub total_connections: usize,
}

impl RenderScene {
    pub fn is_truncated(&self) -> bool {
        self.regions.len() < self.total_regions || self.connections.len() < self.total_connections
    }
}
