// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# neuroscene Service Layer

The application boundary of neuroscene: where model payloads come from, how a
scene is assembled from them, and the seam to whatever draws it.

## Architecture

```text
┌─────────────────────────────────────────────────────────────────┐
│                    HOSTS                                         │
│  Desktop viewer, web bridge, inspect_model tool                 │
└────────────────────────────┬────────────────────────────────────┘
                             ↓
┌─────────────────────────────────────────────────────────────────┐
│              SERVICE LAYER (This Crate)                          │
│  • BrainModelSource  - in-memory / filesystem payload stores    │
│  • SceneService      - fetch → pipeline → detail budget         │
│  • RenderSurface     - implemented by the host                  │
└────────────────────────────┬────────────────────────────────────┘
                             ↓
┌─────────────────────────────────────────────────────────────────┐
│                   DOMAIN LAYER                                   │
│  neuroscene-pipeline, neuroscene-detail, neuroscene-structures  │
└─────────────────────────────────────────────────────────────────┘
```

## Design Principles

1. **Sources stay dumb**: they return raw payloads; validation is the
   pipeline's job
2. **Error Translation**: pipeline and I/O errors become `ServiceError`
3. **Injected state**: the detail controller is passed in, never global

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod impls;
pub mod traits;
pub mod types;

// Re-export main API
pub use traits::{BrainModelSource, RenderSurface};

pub use types::{
    // DTOs
    ModelQuery, ModelSearchResults, RenderScene,
    // Errors
    ServiceError, ServiceResult,
};

pub use impls::{FileSystemModelSource, InMemoryModelSource, SceneService};
