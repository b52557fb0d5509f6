// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scene assembly against real sources and a recording render surface.

use std::sync::Arc;

use neuroscene_detail::{DetailController, DetailLevel, DetailOptions};
use neuroscene_pipeline::LoadPhase;
use neuroscene_services::{
    BrainModelSource, FileSystemModelSource, InMemoryModelSource, ModelQuery, RenderScene,
    RenderSurface, SceneService, ServiceError, ServiceResult,
};
use serde_json::{json, Value};
use tempfile::tempdir;

fn model(id: &str, patient: &str, region_count: usize) -> Value {
    let regions: Vec<Value> = (0..region_count)
        .map(|i| {
            json!({
                "id": format!("{}-r{}", id, i),
                "name": format!("Region {}", i),
                "position": { "x": 25.0, "y": 0.0, "z": -3.0 },
                "color": "#aa0000",
                "connections": [],
                "activityLevel": 0.4,
                "isActive": i % 4 == 0,
                "hemisphere": if i % 2 == 0 { "left" } else { "right" }
            })
        })
        .collect();
    json!({
        "id": id,
        "patientId": patient,
        "scan": { "id": "s", "patientId": patient, "scanDate": "2025-03-01", "scanType": "fMRI" },
        "regions": regions,
        "connections": [],
        "timestamp": "2025-03-01T12:00:00Z",
        "version": "1.0",
        "processingLevel": "filtered"
    })
}

fn controller() -> Arc<DetailController> {
    Arc::new(
        DetailController::new(DetailOptions {
            default_level: DetailLevel::High,
            ..DetailOptions::default()
        })
        .unwrap(),
    )
}

#[derive(Default)]
struct RecordingSurface {
    frames: Vec<(String, usize, DetailLevel)>,
}

impl RenderSurface for RecordingSurface {
    fn render(&mut self, scene: &RenderScene) -> ServiceResult<()> {
        self.frames
            .push((scene.model_id.clone(), scene.regions.len(), scene.detail.level));
        Ok(())
    }
}

struct BrokenSurface;

impl RenderSurface for BrokenSurface {
    fn render(&mut self, _scene: &RenderScene) -> ServiceResult<()> {
        Err(ServiceError::Backend("surface lost".to_string()))
    }
}

#[tokio::test]
async fn test_file_source_round_trip() {
    let dir = tempdir().unwrap();
    for (id, patient) in [("scan-a", "p1"), ("scan-b", "p2"), ("scan-c", "p1")] {
        std::fs::write(
            dir.path().join(format!("{}.json", id)),
            serde_json::to_string(&model(id, patient, 3)).unwrap(),
        )
        .unwrap();
    }
    std::fs::write(dir.path().join("notes.txt"), "not a model").unwrap();
    std::fs::write(dir.path().join("corrupt.json"), "{ nope").unwrap();

    let source = FileSystemModelSource::new(dir.path());

    let raw = source.get_model("scan-b").await.unwrap();
    assert_eq!(raw["patientId"], "p2");

    let results = source
        .search_models(&ModelQuery::for_patient("p1"))
        .await
        .unwrap();
    assert_eq!(results.total, 2);
    let ids: Vec<&str> = results.models.iter().filter_map(|m| m["id"].as_str()).collect();
    assert_eq!(ids, vec!["scan-a", "scan-c"]);

    let err = source.get_model("scan-z").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Not found"));

    let err = source.get_model("corrupt").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn test_present_renders_clamped_prioritized_scene() {
    let source = Arc::new(InMemoryModelSource::with_models(vec![model("m1", "p", 8)]));
    let service = SceneService::new(source, controller());
    let mut surface = RecordingSurface::default();

    let scene = service.present("m1", &mut surface).await.unwrap();

    assert_eq!(surface.frames, vec![("m1".to_string(), 8, DetailLevel::High)]);
    assert_eq!(scene.regions[0].id, "m1-r0");
    assert_eq!(scene.regions[1].id, "m1-r4");
    assert!(scene.regions.iter().all(|r| r.position.x == 10.0));
    assert_eq!(scene.positions["m1-r3"].z, -3.0);
    assert!(!scene.is_truncated());
}

#[tokio::test]
async fn test_scene_uses_bundle_active_at_assembly() {
    let source = Arc::new(InMemoryModelSource::with_models(vec![model("m1", "p", 150)]));
    let detail = controller();
    let service = SceneService::new(source, detail.clone());

    let before = service.load_scene("m1").await.unwrap();
    assert_eq!(before.regions.len(), 150);

    detail.force_level(DetailLevel::Low);
    let after = service.load_scene("m1").await.unwrap();
    assert_eq!(after.detail.level, DetailLevel::Low);
    assert_eq!(after.regions.len(), 100);
    assert!(after.is_truncated());
    // The earlier scene keeps its own bundle
    assert_eq!(before.detail.level, DetailLevel::High);
}

#[tokio::test]
async fn test_progressive_scene_reports_both_phases() {
    let source = Arc::new(InMemoryModelSource::with_models(vec![model("m1", "p", 30)]));
    let service = SceneService::new(source, controller());

    let mut phases = Vec::new();
    let mut record = |phase: LoadPhase, progress: u8| phases.push((phase, progress));
    service
        .load_scene_progressively("m1", Some(&mut record))
        .await
        .unwrap();

    assert_eq!(
        phases,
        vec![
            (LoadPhase::Regions, 67),
            (LoadPhase::Regions, 100),
            (LoadPhase::Connections, 100),
        ]
    );
}

#[tokio::test]
async fn test_invalid_payload_and_surface_errors_propagate() {
    let source = Arc::new(InMemoryModelSource::new());
    let mut bad = model("bad", "p", 2);
    bad["regions"][1]["hemisphere"] = json!("dorsal");
    source.insert("bad", bad);
    source.insert("good", model("good", "p", 2));
    let service = SceneService::new(source, controller());

    let err = service.load_scene("bad").await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::InvalidInput("regions: One or more items do not conform".to_string())
    );

    let err = service.present("good", &mut BrokenSurface).await.unwrap_err();
    assert_eq!(err, ServiceError::Backend("surface lost".to_string()));
}
