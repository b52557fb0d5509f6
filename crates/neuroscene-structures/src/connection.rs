// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neural connection types

use serde::{Deserialize, Serialize};

define_wire_enum! {
    /// Synaptic effect of a connection
    pub enum ConnectionType {
        Excitatory => "excitatory",
        Inhibitory => "inhibitory",
    }
}

define_wire_enum! {
    pub enum Directionality {
        Unidirectional => "unidirectional",
        Bidirectional => "bidirectional",
    }
}

/// Connection between two regions.
///
/// `source_id`/`target_id` should name regions of the same model, but that is
/// not enforced here; consumers filter by the ids they actually hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeuralConnection {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub strength: f64,
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,
    pub directionality: Directionality,
    pub activity_level: f64,
    pub data_confidence: f64,
}

impl NeuralConnection {
    /// True when `id` is either endpoint of this connection
    pub fn touches(&self, region_id: &str) -> bool {
        self.source_id == region_id || self.target_id == region_id
    }
}
