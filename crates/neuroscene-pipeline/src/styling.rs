// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Visualization-mode styling.
//!
//! | isActive | renderMode   | color                    |
//! |----------|--------------|--------------------------|
//! | false    | any          | `theme.regionBase`       |
//! | true     | anatomical   | the region's own `color` |
//! | true     | functional   | `theme.regionActive`     |
//! | true     | connectivity | `theme.connectionExcitatory` |
//! | true     | risk         | `theme.highlight`        |

use serde::{Deserialize, Serialize};
use serde_json::Value;

use neuroscene_structures::{
    BrainRegion, ConnectionType, NeuralConnection, RenderMode, ThemeSettings,
};

use crate::error::PipelineResult;
use crate::validators::{validate_regions, validate_render_mode, validate_theme_settings};

/// Glow multiplier when the theme does not set one
pub const DEFAULT_GLOW_INTENSITY: f64 = 1.0;

/// Display style computed for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStyle {
    pub region_id: String,
    pub color: String,
    /// Emissive strength; always 0 for inactive regions
    pub emissive: f64,
}

/// Validate all three inputs, then style every region in input order
pub fn apply_visualization_mode(
    regions: &Value,
    render_mode: &Value,
    theme: &Value,
) -> PipelineResult<Vec<RegionStyle>> {
    let regions = validate_regions(regions)?;
    let mode = validate_render_mode(render_mode)?;
    let theme = validate_theme_settings(theme)?;
    Ok(style_regions(&regions, mode, &theme))
}

pub fn style_regions(regions: &[BrainRegion], mode: RenderMode, theme: &ThemeSettings) -> Vec<RegionStyle> {
    let glow = theme.glow_intensity.unwrap_or(DEFAULT_GLOW_INTENSITY);
    regions
        .iter()
        .map(|region| RegionStyle {
            region_id: region.id.clone(),
            color: region_color(region, mode, theme).to_string(),
            emissive: if region.is_active {
                region.activity_level.clamp(0.0, 1.0) * glow
            } else {
                0.0
            },
        })
        .collect()
}

pub fn region_color<'a>(region: &'a BrainRegion, mode: RenderMode, theme: &'a ThemeSettings) -> &'a str {
    match (region.is_active, mode) {
        (false, _) => &theme.region_base,
        (true, RenderMode::Anatomical) => &region.color,
        (true, RenderMode::Functional) => &theme.region_active,
        (true, RenderMode::Connectivity) => &theme.connection_excitatory,
        (true, RenderMode::Risk) => &theme.highlight,
    }
}

pub fn connection_color<'a>(connection: &NeuralConnection, theme: &'a ThemeSettings) -> &'a str {
    match connection.connection_type {
        ConnectionType::Excitatory => &theme.connection_excitatory,
        ConnectionType::Inhibitory => &theme.connection_inhibitory,
    }
}
