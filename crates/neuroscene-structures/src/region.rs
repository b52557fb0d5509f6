// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Brain region types

use serde::{Deserialize, Serialize};

use crate::spatial::Vector3;

define_wire_enum! {
    /// Anatomical hemisphere a region belongs to
    pub enum Hemisphere {
        Left => "left",
        Right => "right",
        Central => "central",
    }
}

define_wire_enum! {
    /// Clinical significance grading attached by the analysis backend
    pub enum ClinicalSignificance {
        Unremarkable => "none",
        Mild => "mild",
        Moderate => "moderate",
        Severe => "severe",
        Critical => "critical",
    }
}

/// A brain region as rendered in the scene.
///
/// `id` is unique within a model. `activity_level` is expected in `[0, 1]`
/// but callers are not trusted to respect that; consumers clamp separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrainRegion {
    pub id: String,
    pub name: String,
    pub position: Vector3,
    /// Display color (CSS-style string encoding)
    pub color: String,
    /// Ids of connected regions (may be empty)
    pub connections: Vec<String>,
    pub activity_level: f64,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hemisphere: Option<Hemisphere>,
    /// Volume in mm³
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_significance: Option<ClinicalSignificance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_confidence: Option<f64>,
}

impl BrainRegion {
    /// Minimal region with every optional field unset
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Vector3) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            color: "#ffffff".to_string(),
            connections: Vec::new(),
            activity_level: 0.0,
            is_active: false,
            hemisphere: None,
            volume: None,
            clinical_significance: None,
            data_confidence: None,
        }
    }
}
