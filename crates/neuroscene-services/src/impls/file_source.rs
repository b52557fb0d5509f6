// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Filesystem model source: one `<id>.json` payload per model in a directory.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::traits::BrainModelSource;
use crate::types::*;

const MODEL_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileSystemModelSource {
    root: PathBuf,
}

impl FileSystemModelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the payload file for `id`. Ids that could escape the root
    /// directory are rejected.
    pub fn model_path(&self, id: &str) -> ServiceResult<PathBuf> {
        let escapes = id.is_empty()
            || id == "."
            || id.contains("..")
            || id.contains('/')
            || id.contains('\\');
        if escapes {
            return Err(ServiceError::InvalidInput(format!(
                "Model id '{}' is not a plain file name",
                id
            )));
        }
        Ok(self.root.join(format!("{}.{}", id, MODEL_EXTENSION)))
    }

    async fn read_payload(path: &Path) -> ServiceResult<Value> {
        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[async_trait]
impl BrainModelSource for FileSystemModelSource {
    async fn get_model(&self, id: &str) -> ServiceResult<Value> {
        let path = self.model_path(id)?;
        debug!("Reading model '{}' from {}", id, path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ServiceError::model_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn search_models(&self, query: &ModelQuery) -> ServiceResult<ModelSearchResults> {
        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(MODEL_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut payloads = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::read_payload(&path).await {
                Ok(payload) => payloads.push(payload),
                Err(e) => warn!("Skipping unreadable model file {}: {}", path.display(), e),
            }
        }

        Ok(query.select(payloads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path_rejects_escaping_ids() {
        let source = FileSystemModelSource::new("/data/models");
        assert_eq!(
            source.model_path("scan-01").unwrap(),
            PathBuf::from("/data/models/scan-01.json")
        );
        for bad in ["", ".", "../etc/passwd", "a/b", "a\\b"] {
            assert!(
                matches!(source.model_path(bad), Err(ServiceError::InvalidInput(_))),
                "id {:?} should be rejected",
                bad
            );
        }
    }
}
