// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Vector, region and connection validators

use serde_json::Value;

use neuroscene_structures::{
    BrainRegion, ConnectionType, Directionality, NeuralConnection, ValidationResult, Vector3,
};

use super::fields::Fields;
use super::validate_array_of;

/// `{x, y, z}` with finite numeric components
pub fn validate_vector3(raw: &Value) -> ValidationResult<Vector3> {
    let fields = Fields::of(raw, "Vector3")?;
    Ok(Vector3 {
        x: fields.number("x")?,
        y: fields.number("y")?,
        z: fields.number("z")?,
    })
}

/// Validate a single brain region.
///
/// Required: `id`, `name`, `position`, `color`, `connections`,
/// `activityLevel`, `isActive`. Optional: `hemisphere`, `volume`,
/// `clinicalSignificance`, `dataConfidence`.
pub fn validate_region(raw: &Value) -> ValidationResult<BrainRegion> {
    let fields = Fields::of(raw, "BrainRegion")?;

    Ok(BrainRegion {
        id: fields.string("id")?,
        name: fields.string("name")?,
        position: validate_vector3(fields.value("position")?)?,
        color: fields.string("color")?,
        connections: fields.string_list("connections")?,
        activity_level: fields.number("activityLevel")?,
        is_active: fields.boolean("isActive")?,
        hemisphere: fields.optional_enumeration("hemisphere")?,
        volume: fields.optional_number("volume")?,
        clinical_significance: fields.optional_enumeration("clinicalSignificance")?,
        data_confidence: fields.optional_number("dataConfidence")?,
    })
}

pub fn validate_regions(raw: &Value) -> ValidationResult<Vec<BrainRegion>> {
    validate_array_of(raw, "regions", validate_region)
}

/// Validate a single neural connection.
///
/// Endpoint ids are only type-checked; whether they name existing regions is
/// left to consumers.
pub fn validate_connection(raw: &Value) -> ValidationResult<NeuralConnection> {
    let fields = Fields::of(raw, "NeuralConnection")?;

    Ok(NeuralConnection {
        id: fields.string("id")?,
        source_id: fields.string("sourceId")?,
        target_id: fields.string("targetId")?,
        strength: fields.number("strength")?,
        connection_type: fields.enumeration::<ConnectionType>("type")?,
        directionality: fields.enumeration::<Directionality>("directionality")?,
        activity_level: fields.number("activityLevel")?,
        data_confidence: fields.number("dataConfidence")?,
    })
}

pub fn validate_connections(raw: &Value) -> ValidationResult<Vec<NeuralConnection>> {
    validate_array_of(raw, "connections", validate_connection)
}
