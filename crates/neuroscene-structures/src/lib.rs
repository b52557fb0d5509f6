// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The core crate for neuroscene. Defines the brain model data types shared by
//! the validation pipeline, the detail controller and the service layer.
//!
//! Every type here is an *owned* copy of external data: validators build these
//! values from untyped JSON and never hand out references into the caller's
//! payload.
//!
//! Wire keys are camelCase (the payloads originate from a JSON API) while Rust
//! fields are snake_case.

#[macro_use]
mod wire_enum;

mod connection;
mod error;
mod model;
mod region;
mod settings;
mod spatial;

pub use wire_enum::WireEnum;

pub use connection::{ConnectionType, Directionality, NeuralConnection};
pub use error::{ValidationError, ValidationResult, NON_CONFORMING_ITEMS};
pub use model::{BrainModel, ProcessingLevel, ScanMetadata, ScanType};
pub use region::{BrainRegion, ClinicalSignificance, Hemisphere};
pub use settings::{RenderMode, ThemeSettings, VisualizationSettings};
pub use spatial::{Vector3, POSITION_BOUND};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
