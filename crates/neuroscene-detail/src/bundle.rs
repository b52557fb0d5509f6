// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Detail bundles: the rendering-cost knobs attached to each level.

Bundles are built once, when a controller is created:

1. start from the built-in preset of each level
2. merge the caller's partial overrides
3. apply the device pass (`LOW_DEVICE_PENALTY` / `HIGH_DEVICE_BONUS`)

After that they are frozen behind `Arc`; switching level swaps which bundle
is active and never edits one in place.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use neuroscene_structures::{BrainRegion, NeuralConnection};

use crate::level::{DetailLevel, DeviceClass};

/// Budget multiplier applied to every preset on low-performance devices
pub const LOW_DEVICE_PENALTY: f64 = 0.5;

/// Region budget multiplier for the `high` and `medium` presets on
/// high-performance devices
pub const HIGH_DEVICE_BONUS: f64 = 1.5;

/// Rendering-cost knobs for one detail level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailConfig {
    pub level: DetailLevel,
    /// Geometry segments per region mesh
    pub segments: u32,
    pub max_visible_regions: usize,
    pub max_visible_connections: usize,
    pub texture_resolution: u32,
    pub draw_distance: f64,
    pub use_shadows: bool,
    pub use_bloom: bool,
    pub use_reflections: bool,
    pub use_antialiasing: bool,
    /// Fraction of labels drawn, 0..=1
    pub label_density: f64,
    /// Fraction of full physics simulation steps, 0..=1
    pub physics_fidelity: f64,
    /// Connections weaker than this are not drawn
    pub min_connection_strength: f64,
}

impl DetailConfig {
    /// Built-in preset for `level`
    pub fn preset(level: DetailLevel) -> Self {
        match level {
            DetailLevel::Low => Self {
                level,
                segments: 8,
                max_visible_regions: 100,
                max_visible_connections: 200,
                texture_resolution: 512,
                draw_distance: 50.0,
                use_shadows: false,
                use_bloom: false,
                use_reflections: false,
                use_antialiasing: false,
                label_density: 0.25,
                physics_fidelity: 0.25,
                min_connection_strength: 0.5,
            },
            DetailLevel::Medium => Self {
                level,
                segments: 16,
                max_visible_regions: 500,
                max_visible_connections: 1000,
                texture_resolution: 1024,
                draw_distance: 100.0,
                use_shadows: true,
                use_bloom: false,
                use_reflections: false,
                use_antialiasing: true,
                label_density: 0.5,
                physics_fidelity: 0.5,
                min_connection_strength: 0.3,
            },
            DetailLevel::High => Self {
                level,
                segments: 32,
                max_visible_regions: 2000,
                max_visible_connections: 5000,
                texture_resolution: 2048,
                draw_distance: 200.0,
                use_shadows: true,
                use_bloom: true,
                use_reflections: true,
                use_antialiasing: true,
                label_density: 1.0,
                physics_fidelity: 1.0,
                min_connection_strength: 0.1,
            },
            DetailLevel::Dynamic => Self {
                level,
                ..Self::preset(DetailLevel::Medium)
            },
        }
    }

    /// Leading slice of `regions` within the region budget.
    ///
    /// Callers pass regions already in priority order, so the budget keeps
    /// active regions first.
    pub fn visible_regions<'a>(&self, regions: &'a [BrainRegion]) -> &'a [BrainRegion] {
        &regions[..regions.len().min(self.max_visible_regions)]
    }

    pub fn is_connection_visible(&self, connection: &NeuralConnection) -> bool {
        connection.strength >= self.min_connection_strength
    }

    /// Connections at or above the strength floor, capped at the connection
    /// budget, in input order
    pub fn visible_connections(&self, connections: &[NeuralConnection]) -> Vec<NeuralConnection> {
        connections
            .iter()
            .filter(|c| self.is_connection_visible(c))
            .take(self.max_visible_connections)
            .cloned()
            .collect()
    }

    fn apply_low_device_penalty(&mut self) {
        self.segments = scale_u32(self.segments, LOW_DEVICE_PENALTY);
        self.max_visible_regions = scale_usize(self.max_visible_regions, LOW_DEVICE_PENALTY);
        self.max_visible_connections =
            scale_usize(self.max_visible_connections, LOW_DEVICE_PENALTY);
        self.use_shadows = false;
        self.use_bloom = false;
        self.use_reflections = false;
    }
}

/// Partial per-level override; `None` keeps the preset value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailOverride {
    pub segments: Option<u32>,
    pub max_visible_regions: Option<usize>,
    pub max_visible_connections: Option<usize>,
    pub texture_resolution: Option<u32>,
    pub draw_distance: Option<f64>,
    pub use_shadows: Option<bool>,
    pub use_bloom: Option<bool>,
    pub use_reflections: Option<bool>,
    pub use_antialiasing: Option<bool>,
    pub label_density: Option<f64>,
    pub physics_fidelity: Option<f64>,
    pub min_connection_strength: Option<f64>,
}

impl DetailOverride {
    /// `base` with every set field replaced. The level tag is never overridden.
    pub fn merge_into(&self, base: &DetailConfig) -> DetailConfig {
        DetailConfig {
            level: base.level,
            segments: self.segments.unwrap_or(base.segments),
            max_visible_regions: self.max_visible_regions.unwrap_or(base.max_visible_regions),
            max_visible_connections: self
                .max_visible_connections
                .unwrap_or(base.max_visible_connections),
            texture_resolution: self.texture_resolution.unwrap_or(base.texture_resolution),
            draw_distance: self.draw_distance.unwrap_or(base.draw_distance),
            use_shadows: self.use_shadows.unwrap_or(base.use_shadows),
            use_bloom: self.use_bloom.unwrap_or(base.use_bloom),
            use_reflections: self.use_reflections.unwrap_or(base.use_reflections),
            use_antialiasing: self.use_antialiasing.unwrap_or(base.use_antialiasing),
            label_density: self.label_density.unwrap_or(base.label_density),
            physics_fidelity: self.physics_fidelity.unwrap_or(base.physics_fidelity),
            min_connection_strength: self
                .min_connection_strength
                .unwrap_or(base.min_connection_strength),
        }
    }
}

/// The four frozen bundles of one controller
#[derive(Debug, Clone)]
pub struct DetailPresets {
    low: Arc<DetailConfig>,
    medium: Arc<DetailConfig>,
    high: Arc<DetailConfig>,
    dynamic: Arc<DetailConfig>,
}

impl DetailPresets {
    pub fn build(overrides: &AHashMap<DetailLevel, DetailOverride>, device: Option<DeviceClass>) -> Self {
        let bundle = |level: DetailLevel| {
            let preset = DetailConfig::preset(level);
            let mut merged = match overrides.get(&level) {
                Some(partial) => partial.merge_into(&preset),
                None => preset,
            };
            match device {
                Some(DeviceClass::Low) => merged.apply_low_device_penalty(),
                Some(DeviceClass::High)
                    if matches!(level, DetailLevel::High | DetailLevel::Medium) =>
                {
                    merged.max_visible_regions =
                        scale_usize(merged.max_visible_regions, HIGH_DEVICE_BONUS);
                }
                _ => {}
            }
            Arc::new(merged)
        };

        Self {
            low: bundle(DetailLevel::Low),
            medium: bundle(DetailLevel::Medium),
            high: bundle(DetailLevel::High),
            dynamic: bundle(DetailLevel::Dynamic),
        }
    }

    pub fn get(&self, level: DetailLevel) -> &Arc<DetailConfig> {
        match level {
            DetailLevel::Low => &self.low,
            DetailLevel::Medium => &self.medium,
            DetailLevel::High => &self.high,
            DetailLevel::Dynamic => &self.dynamic,
        }
    }
}

impl Default for DetailPresets {
    fn default() -> Self {
        Self::build(&AHashMap::new(), None)
    }
}

fn scale_usize(value: usize, factor: f64) -> usize {
    ((value as f64) * factor).floor().max(1.0) as usize
}

fn scale_u32(value: u32, factor: f64) -> u32 {
    ((value as f64) * factor).floor().max(1.0) as u32
}
