// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Priority ordering for incremental reveal: active regions first.

use serde_json::Value;

use neuroscene_structures::BrainRegion;

use crate::error::PipelineResult;
use crate::validators::validate_regions;

/// Validate `regions` and return a new vector with active regions first.
///
/// The sort is stable: regions of equal priority keep their input order.
pub fn build_priority_queue(regions: &Value) -> PipelineResult<Vec<BrainRegion>> {
    let regions = validate_regions(regions)?;
    Ok(prioritize_regions(&regions))
}

pub fn prioritize_regions(regions: &[BrainRegion]) -> Vec<BrainRegion> {
    let mut queue = regions.to_vec();
    // `sort_by_key` is stable
    queue.sort_by_key(|r| !r.is_active);
    queue
}
