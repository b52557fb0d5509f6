// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Visualization and theme settings supplied by the host UI

use serde::{Deserialize, Serialize};

define_wire_enum! {
    /// Visualization mode selecting the region color rule
    pub enum RenderMode {
        Anatomical => "anatomical",
        Functional => "functional",
        Connectivity => "connectivity",
        Risk => "risk",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationSettings {
    pub render_mode: RenderMode,
    pub show_labels: bool,
    pub show_connections: bool,
    /// Connections weaker than this are hidden
    pub connection_threshold: f64,
    pub region_opacity: f64,
    pub highlight_active_regions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_visible_regions: Option<u64>,
}

/// Color palette used by the styling rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub name: String,
    pub background: String,
    /// Base color; every inactive region uses it regardless of render mode
    pub region_base: String,
    pub region_active: String,
    pub connection_excitatory: String,
    pub connection_inhibitory: String,
    pub highlight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_intensity: Option<f64>,
}
