// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scan metadata and full brain model validators

use serde_json::Value;

use neuroscene_structures::{BrainModel, ProcessingLevel, ScanMetadata, ScanType, ValidationResult};

use super::entities::{validate_connections, validate_regions};
use super::fields::Fields;

pub fn validate_scan_metadata(raw: &Value) -> ValidationResult<ScanMetadata> {
    let fields = Fields::of(raw, "ScanMetadata")?;

    Ok(ScanMetadata {
        id: fields.string("id")?,
        patient_id: fields.string("patientId")?,
        scan_date: fields.string("scanDate")?,
        scan_type: fields.enumeration::<ScanType>("scanType")?,
        resolution: fields.optional_number("resolution")?,
        notes: fields.optional_string("notes")?,
        data_quality_score: fields.optional_number("dataQualityScore")?,
    })
}

/// Validate a complete brain model.
///
/// `regions` and `connections` are required here; filling them with empty
/// arrays is the job of the lenient normalization helper, not this validator.
pub fn validate_brain_model(raw: &Value) -> ValidationResult<BrainModel> {
    let fields = Fields::of(raw, "BrainModel")?;

    Ok(BrainModel {
        id: fields.string("id")?,
        patient_id: fields.string("patientId")?,
        scan: validate_scan_metadata(fields.value("scan")?)?,
        regions: validate_regions(fields.value("regions")?)?,
        connections: validate_connections(fields.value("connections")?)?,
        timestamp: fields.string("timestamp")?,
        version: fields.string("version")?,
        processing_level: fields.enumeration::<ProcessingLevel>("processingLevel")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroscene_structures::ValidationError;
    use serde_json::json;

    fn model() -> Value {
        json!({
            "id": "m1",
            "patientId": "p1",
            "scan": {
                "id": "s1",
                "patientId": "p1",
                "scanDate": "2025-03-01",
                "scanType": "fMRI"
            },
            "regions": [],
            "connections": [],
            "timestamp": "2025-03-01T10:00:00Z",
            "version": "1.0",
            "processingLevel": "analyzed"
        })
    }

    #[test]
    fn test_minimal_model_validates() {
        let model = validate_brain_model(&model()).unwrap();
        assert_eq!(model.scan.scan_type, ScanType::Fmri);
        assert!(model.regions.is_empty());
        assert_eq!(model.processing_level, ProcessingLevel::Analyzed);
    }

    #[test]
    fn test_strict_validator_requires_arrays() {
        let mut raw = model();
        raw.as_object_mut().unwrap().remove("regions");
        assert_eq!(
            validate_brain_model(&raw),
            Err(ValidationError::missing("regions"))
        );
    }

    #[test]
    fn test_invalid_region_fails_with_aggregate_error() {
        let mut raw = model();
        raw["regions"] = json!([{ "id": "r1" }]);
        assert_eq!(
            validate_brain_model(&raw),
            Err(ValidationError::invalid_items("regions"))
        );
    }

    #[test]
    fn test_scan_type_allow_list() {
        let mut raw = model();
        raw["scan"]["scanType"] = json!("xray");
        assert!(matches!(
            validate_brain_model(&raw),
            Err(ValidationError::InvalidEnum { .. })
        ));
    }
}
