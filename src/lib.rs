// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroscene - brain-model scene preparation
//!
//! neuroscene turns loosely-typed brain-model payloads (scan metadata,
//! anatomical regions, connections between them) into validated, renderable
//! scenes, and keeps the rendering cost matched to the host device.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neuroscene = "0.1"  # Default: services + config + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`services`** (default): model sources, render surface, scene assembly
//! - **`config`** (default): `neuroscene.toml` loader with env/CLI overrides
//! - **`observability`** (default): logging initialization and debug flags
//! - **`file-logging`**: rotated JSON log files per run
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroscene::prelude::*;
//!
//! let raw: serde_json::Value = serde_json::from_str(r#"{"id": "m1"}"#)?;
//! match validate_brain_model(&raw) {
//!     Ok(_) => {
//!         let model = transform_brain_model(&raw)?;
//!         let detail = DetailController::new(DetailOptions::default())?;
//!         let visible = detail.current().visible_regions(&model.regions).len();
//!         println!("{} of {} regions visible", visible, model.regions.len());
//!     }
//!     Err(e) => eprintln!("rejected: {}", e),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: neuroscene-structures                      │
//! │  (BrainModel, BrainRegion, NeuralConnection, Vector3)   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: neuroscene-pipeline, neuroscene-detail     │
//! │  (validation, transformation, chunked loading, LOD)     │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Services: neuroscene-services                          │
//! │  (model sources, scene assembly, render surface)        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export foundation
pub use neuroscene_structures as structures;

// Re-export algorithms
pub use neuroscene_detail as detail;
pub use neuroscene_pipeline as pipeline;

// Re-export infrastructure
#[cfg(feature = "services")]
pub use neuroscene_services as services;

#[cfg(feature = "config")]
pub use neuroscene_config as config;

#[cfg(feature = "observability")]
pub use neuroscene_observability as observability;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::structures::*;

    pub use crate::pipeline::{
        get_active_connections, get_active_regions, generate_position_map,
        load_brain_data_progressively, load_connections_progressively,
        load_regions_progressively, prioritize_regions, transform_brain_model,
        validate_brain_model, validate_connection, validate_region,
        validate_visualization_settings, LoadPhase, LoaderConfig, PipelineError,
        ProgressiveLoader,
    };

    pub use crate::detail::{
        DetailConfig, DetailController, DetailLevel, DetailOptions, DeviceClass,
    };

    #[cfg(feature = "services")]
    pub use crate::services::{
        BrainModelSource, FileSystemModelSource, InMemoryModelSource, RenderScene,
        RenderSurface, SceneService, ServiceError,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, NeuroSceneConfig};
}
