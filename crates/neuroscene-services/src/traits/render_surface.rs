// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Render surface seam. The pipeline feeds surfaces; it never implements one.

use crate::types::{RenderScene, ServiceResult};

pub trait RenderSurface: Send {
    /// Draw `scene`. Called with a fully assembled scene only.
    fn render(&mut self, scene: &RenderScene) -> ServiceResult<()>;
}
