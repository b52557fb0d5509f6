// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Selection helpers built on validated models: active-region and
//! active-connection filters, and the id → position lookup used to draw
//! connection endpoints.

use ahash::{AHashMap, AHashSet};
use serde_json::Value;

use neuroscene_structures::{BrainRegion, NeuralConnection, Vector3};

use crate::error::PipelineResult;
use crate::validators::{validate_brain_model, validate_id_list, validate_regions};

/// Active regions of a raw model.
///
/// Without an id list (absent or `null`) this returns the regions flagged
/// `isActive`; with one it returns exactly the listed regions. Either way the
/// result keeps the model's region order.
pub fn get_active_regions(model: &Value, ids: Option<&Value>) -> PipelineResult<Vec<BrainRegion>> {
    let model = validate_brain_model(model)?;
    let ids = match ids {
        None | Some(Value::Null) => None,
        Some(raw) => Some(validate_id_list(raw)?),
    };
    Ok(select_active_regions(&model.regions, ids.as_deref()))
}

pub fn select_active_regions(regions: &[BrainRegion], ids: Option<&[String]>) -> Vec<BrainRegion> {
    match ids {
        None => regions.iter().filter(|r| r.is_active).cloned().collect(),
        Some(ids) => {
            let wanted: AHashSet<&str> = ids.iter().map(String::as_str).collect();
            regions
                .iter()
                .filter(|r| wanted.contains(r.id.as_str()))
                .cloned()
                .collect()
        }
    }
}

/// Connections whose source *and* target are both in `ids`
pub fn get_active_connections(model: &Value, ids: &Value) -> PipelineResult<Vec<NeuralConnection>> {
    let model = validate_brain_model(model)?;
    let ids = validate_id_list(ids)?;
    Ok(select_active_connections(&model.connections, &ids))
}

pub fn select_active_connections(
    connections: &[NeuralConnection],
    ids: &[String],
) -> Vec<NeuralConnection> {
    let wanted: AHashSet<&str> = ids.iter().map(String::as_str).collect();
    connections
        .iter()
        .filter(|c| wanted.contains(c.source_id.as_str()) && wanted.contains(c.target_id.as_str()))
        .cloned()
        .collect()
}

/// Region id → position for O(1) endpoint lookup
pub fn generate_position_map(regions: &Value) -> PipelineResult<AHashMap<String, Vector3>> {
    let regions = validate_regions(regions)?;
    Ok(position_map(&regions))
}

/// On duplicate ids the last region wins
pub fn position_map(regions: &[BrainRegion]) -> AHashMap<String, Vector3> {
    regions
        .iter()
        .map(|r| (r.id.clone(), r.position))
        .collect()
}
