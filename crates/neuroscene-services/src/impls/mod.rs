// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service implementations.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod file_source;
pub mod memory_source;
pub mod scene_service;

// Re-export for convenience
pub use file_source::FileSystemModelSource;
pub use memory_source::InMemoryModelSource;
pub use scene_service::SceneService;
