// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Brain model and scan metadata.

```json
{
  "id": "model-1",
  "patientId": "patient-7",
  "scan": { "id": "scan-1", "patientId": "patient-7", "scanDate": "...", "scanType": "fMRI" },
  "regions": [ ... ],
  "connections": [ ... ],
  "timestamp": "2025-01-01T00:00:00Z",
  "version": "1.0",
  "processingLevel": "analyzed"
}
```
*/

use serde::{Deserialize, Serialize};

use crate::connection::NeuralConnection;
use crate::region::BrainRegion;

define_wire_enum! {
    /// Imaging modality of the source scan
    pub enum ScanType {
        Fmri => "fMRI",
        Mri => "MRI",
        Dti => "DTI",
        Pet => "PET",
        Eeg => "EEG",
        Meg => "MEG",
    }
}

define_wire_enum! {
    /// How far the backend has processed the model
    pub enum ProcessingLevel {
        Raw => "raw",
        Filtered => "filtered",
        Normalized => "normalized",
        Analyzed => "analyzed",
    }
}

/// Scan metadata value object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    pub id: String,
    pub patient_id: String,
    pub scan_date: String,
    pub scan_type: ScanType,
    /// Voxel resolution in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality_score: Option<f64>,
}

/// Complete brain model as delivered to the rendering surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrainModel {
    pub id: String,
    pub patient_id: String,
    pub scan: ScanMetadata,
    pub regions: Vec<BrainRegion>,
    pub connections: Vec<NeuralConnection>,
    pub timestamp: String,
    pub version: String,
    pub processing_level: ProcessingLevel,
}

impl BrainModel {
    /// Look up a region by id
    pub fn region(&self, id: &str) -> Option<&BrainRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Number of regions flagged active
    pub fn active_region_count(&self) -> usize {
        self.regions.iter().filter(|r| r.is_active).count()
    }
}
