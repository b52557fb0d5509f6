// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Progressive loading of large region/connection collections.

Input is validated up front; then the collection is processed in bounded
chunks and control is handed back to the scheduler between chunks
(`tokio::task::yield_now`). Those yields are the only suspension points, so
a host running on a single-threaded runtime keeps rendering and handling
input while thousands of elements are processed.

## Progress

After each chunk the callback receives
`round(min(100, processed / total * 100))`, capped at `99` until the last
chunk is done. Values never decrease and only the last one is `100`. An
empty collection reports `100` once.

## Failure

A panic inside chunk processing is caught at the chunk boundary and returned
as `PipelineError::ChunkProcessing`. Loading is all-or-nothing: on failure no
partially processed elements are returned.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use neuroscene_structures::{BrainModel, BrainRegion, NeuralConnection, ValidationError};

use crate::error::{PipelineError, PipelineResult};
use crate::transformer::{transform_connection, transform_region};
use crate::validators::{validate_brain_model, validate_connections, validate_regions};

pub const DEFAULT_REGION_CHUNK_SIZE: usize = 20;
pub const DEFAULT_CONNECTION_CHUNK_SIZE: usize = 50;

/// Message used when a panic payload carries no text
const GENERIC_CHUNK_FAILURE: &str = "Unknown error while processing chunk";

/// Percent-complete callback, invoked synchronously inside the loading loop
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(u8) + Send);

/// Progress callback of the composite loader, tagged with the running phase
pub type PhasedProgressCallback<'a> = &'a mut (dyn FnMut(LoadPhase, u8) + Send);

/// Phase of `load_brain_data_progressively`. Regions always run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadPhase {
    Regions,
    Connections,
}

/// Chunk sizes for the progressive loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    pub region_chunk_size: usize,
    pub connection_chunk_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            region_chunk_size: DEFAULT_REGION_CHUNK_SIZE,
            connection_chunk_size: DEFAULT_CONNECTION_CHUNK_SIZE,
        }
    }
}

/// Progressive loader with an optional cancellation flag.
///
/// The flag is checked at every yield point; once set, the load stops with
/// `PipelineError::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct ProgressiveLoader {
    config: LoaderConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl ProgressiveLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Validate and progressively normalize a raw region array
    pub async fn load_regions(
        &self,
        regions: &Value,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> PipelineResult<Vec<BrainRegion>> {
        let regions = validate_regions(regions)?;
        self.load_region_list(regions, on_progress).await
    }

    /// Validate and progressively copy a raw connection array
    pub async fn load_connections(
        &self,
        connections: &Value,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> PipelineResult<Vec<NeuralConnection>> {
        let connections = validate_connections(connections)?;
        self.load_connection_list(connections, on_progress).await
    }

    /// Validate a whole model, then load its regions and its connections
    /// one after the other (never concurrently).
    pub async fn load_brain_data(
        &self,
        model: &Value,
        mut on_progress: Option<PhasedProgressCallback<'_>>,
    ) -> PipelineResult<BrainModel> {
        let model = validate_brain_model(model)?;
        info!(
            "Progressively loading brain model '{}' ({} regions, {} connections)",
            model.id,
            model.regions.len(),
            model.connections.len()
        );

        let regions = {
            let mut report = |progress: u8| {
                if let Some(cb) = on_progress.as_deref_mut() {
                    cb(LoadPhase::Regions, progress);
                }
            };
            self.load_region_list(model.regions, Some(&mut report)).await?
        };

        let connections = {
            let mut report = |progress: u8| {
                if let Some(cb) = on_progress.as_deref_mut() {
                    cb(LoadPhase::Connections, progress);
                }
            };
            self.load_connection_list(model.connections, Some(&mut report))
                .await?
        };

        Ok(BrainModel {
            id: model.id,
            patient_id: model.patient_id,
            scan: model.scan,
            regions,
            connections,
            timestamp: model.timestamp,
            version: model.version,
            processing_level: model.processing_level,
        })
    }

    async fn load_region_list(
        &self,
        regions: Vec<BrainRegion>,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> PipelineResult<Vec<BrainRegion>> {
        load_in_chunks(
            regions,
            self.config.region_chunk_size,
            transform_region,
            on_progress,
            self.cancel.as_deref(),
        )
        .await
    }

    async fn load_connection_list(
        &self,
        connections: Vec<NeuralConnection>,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> PipelineResult<Vec<NeuralConnection>> {
        load_in_chunks(
            connections,
            self.config.connection_chunk_size,
            transform_connection,
            on_progress,
            self.cancel.as_deref(),
        )
        .await
    }
}

/// Load regions in chunks of `chunk_size` (default 20)
pub async fn load_regions_progressively(
    regions: &Value,
    chunk_size: Option<usize>,
    on_progress: Option<ProgressCallback<'_>>,
) -> PipelineResult<Vec<BrainRegion>> {
    let config = LoaderConfig {
        region_chunk_size: chunk_size.unwrap_or(DEFAULT_REGION_CHUNK_SIZE),
        ..LoaderConfig::default()
    };
    ProgressiveLoader::new(config)
        .load_regions(regions, on_progress)
        .await
}

/// Load connections in chunks of `chunk_size` (default 50)
pub async fn load_connections_progressively(
    connections: &Value,
    chunk_size: Option<usize>,
    on_progress: Option<ProgressCallback<'_>>,
) -> PipelineResult<Vec<NeuralConnection>> {
    let config = LoaderConfig {
        connection_chunk_size: chunk_size.unwrap_or(DEFAULT_CONNECTION_CHUNK_SIZE),
        ..LoaderConfig::default()
    };
    ProgressiveLoader::new(config)
        .load_connections(connections, on_progress)
        .await
}

/// Validate a model and load regions then connections with default chunk sizes
pub async fn load_brain_data_progressively(
    model: &Value,
    on_progress: Option<PhasedProgressCallback<'_>>,
) -> PipelineResult<BrainModel> {
    ProgressiveLoader::default()
        .load_brain_data(model, on_progress)
        .await
}

/// Chunked processing loop shared by every loader.
///
/// Applies `transform` to every item, reports progress after each chunk and
/// yields to the scheduler before the next one. Output order equals input
/// order.
pub async fn load_in_chunks<T, F>(
    items: Vec<T>,
    chunk_size: usize,
    transform: F,
    mut on_progress: Option<ProgressCallback<'_>>,
    cancel: Option<&AtomicBool>,
) -> PipelineResult<Vec<T>>
where
    F: Fn(&T) -> T,
{
    if chunk_size == 0 {
        return Err(ValidationError::invalid_value("chunkSize", "must be greater than zero").into());
    }

    let total = items.len();
    let mut loaded = Vec::with_capacity(total);

    if total == 0 {
        if let Some(cb) = on_progress.as_deref_mut() {
            cb(100);
        }
        return Ok(loaded);
    }

    for chunk in items.chunks(chunk_size) {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            debug!("Progressive load cancelled at {}/{}", loaded.len(), total);
            return Err(PipelineError::Cancelled {
                processed: loaded.len(),
                total,
            });
        }

        let processed = catch_unwind(AssertUnwindSafe(|| {
            chunk.iter().map(&transform).collect::<Vec<T>>()
        }))
        .map_err(|payload| PipelineError::ChunkProcessing(panic_message(payload.as_ref())))?;
        loaded.extend(processed);

        // 100 is reserved for the final chunk
        let mut progress = progress_percent(loaded.len(), total);
        if loaded.len() < total {
            progress = progress.min(99);
        }
        if let Some(cb) = on_progress.as_deref_mut() {
            cb(progress);
        }

        tokio::task::yield_now().await;
    }

    Ok(loaded)
}

/// `round(min(100, processed / total * 100))`
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (processed as f64 / total as f64) * 100.0;
    percent.min(100.0).round() as u8
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        GENERIC_CHUNK_FAILURE.to_string()
    }
}
