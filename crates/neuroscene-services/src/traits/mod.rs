// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service trait definitions.

These traits are the seams between the pipeline and its collaborators: where
model payloads come from, and what finally draws them.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod model_source;
pub mod render_surface;

// Re-export for convenience
pub use model_source::BrainModelSource;
pub use render_surface::RenderSurface;
