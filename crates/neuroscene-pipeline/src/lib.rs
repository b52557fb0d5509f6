// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# neuroscene Pipeline

Everything between an untrusted payload and the render surface:

- Runtime validation (JSON ↔ Rust structs)
- Transformation into render-ready models
- Progressive (chunked, cooperatively yielding) loading
- Priority ordering and selection helpers
- Visualization-mode styling

## Data Flow

```text
raw payload ─→ validators ─→ transformer ──────────┐
                        └──→ progressive loader ───┼─→ priority queue ─→ render surface
                                                    │
                               detail controller ───┘ (current DetailConfig)
```

Validators, the transformer and the priority queue are synchronous; only the
progressive loader suspends, and only between chunks.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod error;
pub mod loader;
pub mod priority;
pub mod queries;
pub mod styling;
pub mod transformer;
pub mod validators;

// Re-export commonly used types
pub use error::{PipelineError, PipelineResult};
pub use loader::{
    load_brain_data_progressively, load_connections_progressively, load_in_chunks,
    load_regions_progressively, progress_percent, LoadPhase, LoaderConfig, PhasedProgressCallback,
    ProgressCallback, ProgressiveLoader, DEFAULT_CONNECTION_CHUNK_SIZE, DEFAULT_REGION_CHUNK_SIZE,
};
pub use priority::{build_priority_queue, prioritize_regions};
pub use queries::{
    generate_position_map, get_active_connections, get_active_regions, position_map,
    select_active_connections, select_active_regions,
};
pub use styling::{apply_visualization_mode, connection_color, region_color, style_regions, RegionStyle};
pub use transformer::{
    normalize_brain_model, normalize_position, transform_brain_model, transform_connection,
    transform_model, transform_region,
};
pub use validators::{
    validate_array_of, validate_brain_model, validate_connection, validate_connections,
    validate_id_list, validate_region, validate_regions, validate_render_mode,
    validate_scan_metadata, validate_theme_settings, validate_vector3,
    validate_visualization_settings,
};
