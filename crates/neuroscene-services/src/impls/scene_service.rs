// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Scene assembly: source → pipeline → detail budget → render surface.

```text
get_model ─→ transform / progressive load ─→ prioritize ─→ detail budget ─→ RenderScene
```

The detail bundle is read once per scene, so a scene is always assembled
against one complete bundle even if the level changes mid-load.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::sync::Arc;

use tracing::{debug, info};

use neuroscene_detail::DetailController;
use neuroscene_pipeline::{
    position_map, prioritize_regions, select_active_connections, transform_brain_model,
    LoaderConfig, PhasedProgressCallback, ProgressiveLoader,
};
use neuroscene_structures::BrainModel;

use crate::traits::{BrainModelSource, RenderSurface};
use crate::types::*;

pub struct SceneService {
    source: Arc<dyn BrainModelSource>,
    detail: Arc<DetailController>,
    loader: ProgressiveLoader,
}

impl SceneService {
    pub fn new(source: Arc<dyn BrainModelSource>, detail: Arc<DetailController>) -> Self {
        Self {
            source,
            detail,
            loader: ProgressiveLoader::default(),
        }
    }

    /// Use a custom loader (chunk sizes, cancellation flag)
    pub fn with_loader(mut self, loader: ProgressiveLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_loader_config(self, config: LoaderConfig) -> Self {
        self.with_loader(ProgressiveLoader::new(config))
    }

    pub fn detail(&self) -> &Arc<DetailController> {
        &self.detail
    }

    pub fn source(&self) -> &Arc<dyn BrainModelSource> {
        &self.source
    }

    /// Fetch, validate and transform a model in one synchronous pass
    ///
    /// # Errors
    /// * `ServiceError::NotFound` - The source has no model with this id
    /// * `ServiceError::InvalidInput` - The payload failed validation
    ///
    pub async fn load_scene(&self, id: &str) -> ServiceResult<RenderScene> {
        let raw = self.source.get_model(id).await?;
        let model = transform_brain_model(&raw)?;
        Ok(self.assemble(model))
    }

    /// Like `load_scene`, but regions and connections go through the
    /// progressive loader so the host stays responsive
    pub async fn load_scene_progressively(
        &self,
        id: &str,
        on_progress: Option<PhasedProgressCallback<'_>>,
    ) -> ServiceResult<RenderScene> {
        let raw = self.source.get_model(id).await?;
        let model = self.loader.load_brain_data(&raw, on_progress).await?;
        Ok(self.assemble(model))
    }

    /// Load a scene and hand it to `surface`
    pub async fn present(
        &self,
        id: &str,
        surface: &mut dyn RenderSurface,
    ) -> ServiceResult<RenderScene> {
        let scene = self.load_scene_progressively(id, None).await?;
        surface.render(&scene)?;
        info!(
            "Presented model '{}' at detail '{}' ({}/{} regions, {}/{} connections)",
            scene.model_id,
            scene.detail.level,
            scene.regions.len(),
            scene.total_regions,
            scene.connections.len(),
            scene.total_connections
        );
        Ok(scene)
    }

    /// Cut a transformed model down to what the active bundle allows
    pub fn assemble(&self, model: BrainModel) -> RenderScene {
        let detail = self.detail.current();

        let prioritized = prioritize_regions(&model.regions);
        let regions = detail.visible_regions(&prioritized).to_vec();

        let visible_ids: Vec<String> = regions.iter().map(|r| r.id.clone()).collect();
        let between_visible = select_active_connections(&model.connections, &visible_ids);
        let connections = detail.visible_connections(&between_visible);

        let positions = position_map(&regions);

        debug!(
            "Assembled scene for '{}': {} regions, {} connections (detail '{}')",
            model.id,
            regions.len(),
            connections.len(),
            detail.level
        );

        RenderScene {
            model_id: model.id,
            patient_id: model.patient_id,
            total_regions: model.regions.len(),
            total_connections: model.connections.len(),
            regions,
            connections,
            positions,
            detail,
        }
    }
}
