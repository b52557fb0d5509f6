// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Brain model transformation.

Turns a validated model into a render-ready one:

- positions clamped into the visualization cube `[-10, 10]³`
- malformed positions relocated to the origin (with a warning) instead of
  propagating garbage coordinates into the renderer
- activity fields defaulted when absent (lenient path only)

Transformation always builds new values; the validated input is never
mutated, and no element is ever dropped (index-based consumers depend on the
array lengths).

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use serde_json::{Map, Value};
use tracing::{debug, warn};

use neuroscene_structures::{
    BrainModel, BrainRegion, NeuralConnection, ValidationError, Vector3, POSITION_BOUND,
};

use crate::error::PipelineResult;
use crate::validators::{validate_brain_model, validate_vector3};

/// Validate a raw payload and transform it into a render-ready model.
///
/// Validation errors are returned unchanged.
pub fn transform_brain_model(raw: &Value) -> PipelineResult<BrainModel> {
    let validated = validate_brain_model(raw)?;
    let transformed = transform_model(&validated);
    debug!(
        "Transformed brain model '{}': {} regions, {} connections",
        transformed.id,
        transformed.regions.len(),
        transformed.connections.len()
    );
    Ok(transformed)
}

/// Typed core of the transformer. Idempotent.
pub fn transform_model(model: &BrainModel) -> BrainModel {
    BrainModel {
        id: model.id.clone(),
        patient_id: model.patient_id.clone(),
        scan: model.scan.clone(),
        regions: model.regions.iter().map(transform_region).collect(),
        connections: model.connections.iter().map(transform_connection).collect(),
        timestamp: model.timestamp.clone(),
        version: model.version.clone(),
        processing_level: model.processing_level,
    }
}

/// Produce the render-ready copy of one region.
///
/// A region failing the shape check is passed through unchanged.
pub fn transform_region(region: &BrainRegion) -> BrainRegion {
    if let Err(reason) = check_region_shape(region) {
        warn!("Region '{}' is malformed ({}), passing through unchanged", region.id, reason);
        return region.clone();
    }

    BrainRegion {
        position: clamp_position(&region.position, &region.id),
        ..region.clone()
    }
}

/// Connections carry no coordinates; valid ones are copied through unchanged.
pub fn transform_connection(connection: &NeuralConnection) -> NeuralConnection {
    if let Err(reason) = check_connection_shape(connection) {
        warn!("Connection '{}' is malformed ({})", connection.id, reason);
    }
    connection.clone()
}

fn check_region_shape(region: &BrainRegion) -> Result<(), &'static str> {
    if region.id.is_empty() {
        return Err("empty id");
    }
    if !region.activity_level.is_finite() {
        return Err("non-finite activity level");
    }
    Ok(())
}

fn check_connection_shape(connection: &NeuralConnection) -> Result<(), &'static str> {
    if connection.id.is_empty() {
        return Err("empty id");
    }
    if !connection.strength.is_finite() || !connection.activity_level.is_finite() {
        return Err("non-finite strength or activity level");
    }
    Ok(())
}

fn clamp_position(position: &Vector3, region_id: &str) -> Vector3 {
    position.clamped(POSITION_BOUND).unwrap_or_else(|| {
        warn!(
            "Region '{}' has non-finite position {:?}, relocating to origin",
            region_id, position
        );
        Vector3::ORIGIN
    })
}

/// Normalize an untyped position.
///
/// A well-formed `{x, y, z}` triple is clamped into the visualization cube;
/// anything else becomes the origin.
pub fn normalize_position(raw: Option<&Value>) -> Vector3 {
    match raw.map(validate_vector3) {
        Some(Ok(position)) => position.clamped(POSITION_BOUND).unwrap_or(Vector3::ORIGIN),
        Some(Err(err)) => {
            warn!("Malformed position ({}), substituting origin", err);
            Vector3::ORIGIN
        }
        None => {
            warn!("Missing position, substituting origin");
            Vector3::ORIGIN
        }
    }
}

/// Lenient entry point for payloads from less careful producers.
///
/// Before strict validation this fills absent `regions`/`connections` with
/// empty arrays, absent `activityLevel`/`isActive` with `0`/`false`, and
/// replaces malformed positions with the origin. Everything else must still
/// satisfy the strict validator.
pub fn normalize_brain_model(raw: &Value) -> PipelineResult<BrainModel> {
    let object = raw
        .as_object()
        .ok_or_else(|| ValidationError::not_an_object("BrainModel"))?;

    let mut defaulted = object.clone();
    for field in ["regions", "connections"] {
        if is_absent(defaulted.get(field)) {
            defaulted.insert(field.to_string(), Value::Array(Vec::new()));
        }
    }
    if let Some(Value::Array(regions)) = defaulted.get_mut("regions") {
        for region in regions.iter_mut() {
            if let Value::Object(fields) = region {
                default_region_fields(fields);
            }
        }
    }

    transform_brain_model(&Value::Object(defaulted))
}

fn default_region_fields(fields: &mut Map<String, Value>) {
    if is_absent(fields.get("activityLevel")) {
        fields.insert("activityLevel".to_string(), Value::from(0.0));
    }
    if is_absent(fields.get("isActive")) {
        fields.insert("isActive".to_string(), Value::Bool(false));
    }
    let position = normalize_position(fields.get("position"));
    fields.insert(
        "position".to_string(),
        serde_json::json!({ "x": position.x, "y": position.y, "z": position.z }),
    );
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "id": "m1",
            "patientId": "p1",
            "scan": { "id": "s1", "patientId": "p1", "scanDate": "2025-01-01", "scanType": "MRI" },
            "regions": [
                {
                    "id": "r1", "name": "A", "position": { "x": 42.0, "y": -3.0, "z": -11.0 },
                    "color": "#fff", "connections": [], "activityLevel": 0.5, "isActive": true
                },
                {
                    "id": "r2", "name": "B", "position": { "x": 1.0, "y": 2.0, "z": 3.0 },
                    "color": "#000", "connections": ["r1"], "activityLevel": 0.0, "isActive": false
                }
            ],
            "connections": [{
                "id": "c1", "sourceId": "r1", "targetId": "r2", "strength": 0.7,
                "type": "excitatory", "directionality": "unidirectional",
                "activityLevel": 0.3, "dataConfidence": 0.9
            }],
            "timestamp": "2025-01-01T00:00:00Z",
            "version": "1",
            "processingLevel": "normalized"
        })
    }

    #[test]
    fn test_positions_are_clamped() {
        let model = transform_brain_model(&payload()).unwrap();
        assert_eq!(model.regions[0].position, Vector3::new(10.0, -3.0, -10.0));
        assert_eq!(model.regions[1].position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(model.connections.len(), 1);
    }

    #[test]
    fn test_validation_error_propagates_unchanged() {
        let mut raw = payload();
        raw["processingLevel"] = json!("cooked");
        let expected = validate_brain_model(&raw).unwrap_err();
        let err = transform_brain_model(&raw).unwrap_err();
        assert_eq!(err.as_validation(), Some(&expected));
        assert_eq!(err.to_string(), expected.to_string());
    }

    #[test]
    fn test_transform_is_idempotent() {
        let once = transform_brain_model(&payload()).unwrap();
        let twice = transform_model(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_finite_typed_position_goes_to_origin() {
        let mut region = BrainRegion::new("r9", "Z", Vector3::new(f64::NAN, 1.0, 1.0));
        region.is_active = true;
        let out = transform_region(&region);
        assert_eq!(out.position, Vector3::ORIGIN);
        assert_eq!(out.id, "r9");
    }

    #[test]
    fn test_malformed_region_passes_through() {
        let mut region = BrainRegion::new("", "nameless", Vector3::new(50.0, 0.0, 0.0));
        region.activity_level = 0.2;
        let out = transform_region(&region);
        assert_eq!(out, region);
    }

    #[test]
    fn test_normalize_position_substitutes_origin() {
        assert_eq!(normalize_position(None), Vector3::ORIGIN);
        assert_eq!(normalize_position(Some(&json!("here"))), Vector3::ORIGIN);
        assert_eq!(normalize_position(Some(&json!({ "x": 1, "y": 2 }))), Vector3::ORIGIN);
        assert_eq!(
            normalize_position(Some(&json!({ "x": -20, "y": 2, "z": 0.5 }))),
            Vector3::new(-10.0, 2.0, 0.5)
        );
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let raw = json!({
            "id": "m2",
            "patientId": "p1",
            "scan": { "id": "s1", "patientId": "p1", "scanDate": "2025-01-01", "scanType": "PET" },
            "regions": [
                { "id": "r1", "name": "A", "position": "bogus", "color": "#fff", "connections": [] }
            ],
            "timestamp": "t",
            "version": "1",
            "processingLevel": "raw"
        });
        assert!(transform_brain_model(&raw).is_err());

        let model = normalize_brain_model(&raw).unwrap();
        assert!(model.connections.is_empty());
        assert_eq!(model.regions.len(), 1);
        assert_eq!(model.regions[0].position, Vector3::ORIGIN);
        assert_eq!(model.regions[0].activity_level, 0.0);
        assert!(!model.regions[0].is_active);
    }

    #[test]
    fn test_normalize_rejects_non_object() {
        let err = normalize_brain_model(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::not_an_object("BrainModel"))
        );
    }
}
