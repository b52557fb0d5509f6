// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Full path from `neuroscene.toml` and a model file on disk to a rendered scene.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use neuroscene::config::{load_config, validate_config};
use neuroscene::prelude::*;
use neuroscene::services::ServiceResult;
use serde_json::{json, Value};
use tempfile::TempDir;

const REGIONS: usize = 150;

fn chain_model(id: &str) -> Value {
    let regions: Vec<Value> = (0..REGIONS)
        .map(|i| {
            json!({
                "id": format!("r{}", i),
                "name": format!("Region {}", i),
                "position": { "x": i as f64 * 0.5 - 40.0, "y": 1.0, "z": 0.0 },
                "color": "#3366ff",
                "connections": [],
                "activityLevel": 0.3,
                "isActive": i % 10 == 0
            })
        })
        .collect();
    let connections: Vec<Value> = (0..REGIONS - 1)
        .map(|i| {
            json!({
                "id": format!("c{}", i),
                "sourceId": format!("r{}", i),
                "targetId": format!("r{}", i + 1),
                "strength": if i % 2 == 0 { 0.3 } else { 0.8 },
                "type": "excitatory",
                "directionality": "unidirectional",
                "activityLevel": 0.5,
                "dataConfidence": 0.9
            })
        })
        .collect();
    json!({
        "id": id,
        "patientId": "patient-17",
        "scan": { "id": "scan-1", "patientId": "patient-17", "scanDate": "2025-05-02", "scanType": "DTI" },
        "regions": regions,
        "connections": connections,
        "timestamp": "2025-05-02T09:30:00Z",
        "version": "2.0",
        "processingLevel": "analyzed"
    })
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(config_toml: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("neuroscene.toml"), config_toml).unwrap();
        std::fs::write(
            dir.path().join("scan-17.json"),
            serde_json::to_string(&chain_model("scan-17")).unwrap(),
        )
        .unwrap();
        Workspace { dir }
    }

    fn service(&self, cli: Option<&HashMap<String, String>>) -> (NeuroSceneConfig, SceneService) {
        let config = load_config(Some(&self.dir.path().join("neuroscene.toml")), cli).unwrap();
        validate_config(&config).unwrap();

        let detail = Arc::new(DetailController::from_config(&config.detail).unwrap());
        let service = SceneService::new(Arc::new(FileSystemModelSource::new(self.dir.path())), detail)
            .with_loader_config(LoaderConfig {
                region_chunk_size: config.pipeline.region_chunk_size,
                connection_chunk_size: config.pipeline.connection_chunk_size,
            });
        (config, service)
    }
}

#[derive(Default)]
struct CountingSurface {
    scenes: usize,
}

impl RenderSurface for CountingSurface {
    fn render(&mut self, scene: &RenderScene) -> ServiceResult<()> {
        assert_eq!(scene.regions.len(), scene.positions.len());
        self.scenes += 1;
        Ok(())
    }
}

#[tokio::test]
async fn test_forced_low_detail_scene_from_config() {
    let workspace = Workspace::new(
        r#"
[pipeline]
region_chunk_size = 50
connection_chunk_size = 100

[detail]
forced_level = "low"
"#,
    );
    let (_, service) = workspace.service(None);

    let mut phases = Vec::new();
    let mut record = |phase: LoadPhase, percent: u8| phases.push((phase, percent));
    let scene = service
        .load_scene_progressively("scan-17", Some(&mut record))
        .await
        .unwrap();

    assert_eq!(
        phases,
        vec![
            (LoadPhase::Regions, 33),
            (LoadPhase::Regions, 67),
            (LoadPhase::Regions, 100),
            (LoadPhase::Connections, 67),
            (LoadPhase::Connections, 100),
        ]
    );

    assert_eq!(scene.detail.level, DetailLevel::Low);
    assert_eq!(scene.total_regions, REGIONS);
    assert_eq!(scene.regions.len(), 100);
    assert!(scene.is_truncated());

    // Every active region survives the budget and leads the list
    assert_eq!(scene.regions.iter().filter(|r| r.is_active).count(), 15);
    assert!(scene.regions[..15].iter().all(|r| r.is_active));

    for region in &scene.regions {
        assert!(region.position.x.abs() <= POSITION_BOUND);
    }
    for connection in &scene.connections {
        assert!(connection.strength >= 0.5);
        assert!(scene.positions.contains_key(&connection.source_id));
        assert!(scene.positions.contains_key(&connection.target_id));
    }
}

#[tokio::test]
async fn test_cli_override_beats_config_file() {
    let workspace = Workspace::new("[detail]\nforced_level = \"low\"\n");
    let cli = HashMap::from([("forced_level".to_string(), "high".to_string())]);
    let (config, service) = workspace.service(Some(&cli));

    assert_eq!(config.detail.forced_level.as_deref(), Some("high"));

    let mut surface = CountingSurface::default();
    let scene = service.present("scan-17", &mut surface).await.unwrap();
    assert_eq!(surface.scenes, 1);
    assert_eq!(scene.detail.level, DetailLevel::High);
    assert_eq!(scene.regions.len(), REGIONS);
    assert!(scene.connections.iter().all(|c| c.strength >= 0.1));
    assert_eq!(scene.connections.len(), REGIONS - 1);
}

#[tokio::test]
async fn test_sustained_low_frame_rate_shrinks_next_scene() {
    let workspace = Workspace::new(
        r#"
[detail]
default_level = "high"
sample_window = 5
"#,
    );
    let (_, service) = workspace.service(None);

    let first = service.load_scene("scan-17").await.unwrap();
    assert_eq!(first.detail.level, DetailLevel::High);

    let start = Instant::now();
    for i in 0..5 {
        service
            .detail()
            .record_frame_rate(20.0, start + Duration::from_millis(16 * i));
    }
    assert_eq!(service.detail().level(), DetailLevel::Low);

    let second = service.load_scene("scan-17").await.unwrap();
    assert_eq!(second.detail.level, DetailLevel::Low);
    assert!(second.regions.len() < first.regions.len());

    // The first scene keeps the bundle it was assembled with
    assert_eq!(first.detail.level, DetailLevel::High);
}

#[tokio::test]
async fn test_missing_model_reports_not_found() {
    let workspace = Workspace::new("");
    let (_, service) = workspace.service(None);

    let err = service.load_scene("scan-99").await.unwrap_err();
    assert!(err.is_not_found());
}
