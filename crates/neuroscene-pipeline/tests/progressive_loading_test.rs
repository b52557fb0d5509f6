// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Integration tests for chunked loading of large brain models.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use neuroscene_pipeline::{
    load_brain_data_progressively, load_connections_progressively, load_regions_progressively,
    LoadPhase, PipelineError,
};
use neuroscene_structures::{ValidationError, POSITION_BOUND};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn regions(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "id": format!("r{}", i),
                    "name": format!("Region {}", i),
                    "position": { "x": i as f64, "y": -(i as f64), "z": 0.5 },
                    "color": "#336699",
                    "connections": [],
                    "activityLevel": 0.5,
                    "isActive": i % 3 == 0
                })
            })
            .collect(),
    )
}

fn connections(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "id": format!("c{}", i),
                    "sourceId": format!("r{}", i),
                    "targetId": format!("r{}", i + 1),
                    "strength": 0.5,
                    "type": if i % 2 == 0 { "excitatory" } else { "inhibitory" },
                    "directionality": "unidirectional",
                    "activityLevel": 0.1,
                    "dataConfidence": 0.8
                })
            })
            .collect(),
    )
}

fn model(region_count: usize, connection_count: usize) -> Value {
    json!({
        "id": "large-model",
        "patientId": "p-42",
        "scan": { "id": "s", "patientId": "p-42", "scanDate": "2025-02-02", "scanType": "fMRI" },
        "regions": regions(region_count),
        "connections": connections(connection_count),
        "timestamp": "2025-02-02T00:00:00Z",
        "version": "2.1",
        "processingLevel": "analyzed"
    })
}

#[tokio::test(flavor = "current_thread")]
async fn test_progress_is_monotonic_and_ends_at_100() {
    let mut seen = Vec::new();
    let mut record = |p: u8| seen.push(p);

    let loaded = load_regions_progressively(&regions(47), Some(20), Some(&mut record))
        .await
        .expect("47 valid regions should load");

    assert_eq!(loaded.len(), 47);
    assert_eq!(seen, vec![43, 85, 100]);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.iter().filter(|&&p| p == 100).count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn test_nearly_complete_chunk_does_not_report_100() {
    let mut seen = Vec::new();
    let mut record = |p: u8| seen.push(p);

    // 200/201 rounds to 100 but is not the final chunk
    let loaded = load_regions_progressively(&regions(201), Some(200), Some(&mut record))
        .await
        .unwrap();

    assert_eq!(loaded.len(), 201);
    assert_eq!(seen, vec![99, 100]);
}

#[tokio::test(flavor = "current_thread")]
async fn test_loaded_regions_keep_order_and_are_clamped() {
    let loaded = load_regions_progressively(&regions(47), None, None)
        .await
        .unwrap();

    for (i, region) in loaded.iter().enumerate() {
        assert_eq!(region.id, format!("r{}", i));
        assert!(region.position.within(POSITION_BOUND));
    }
    assert_eq!(loaded[46].position.x, POSITION_BOUND);
}

#[tokio::test(flavor = "current_thread")]
async fn test_invalid_input_fails_before_any_work() {
    let mut bad = regions(30);
    bad[12]["isActive"] = json!("yes");

    let mut calls = 0;
    let mut count = |_p: u8| calls += 1;
    let err = load_regions_progressively(&bad, Some(5), Some(&mut count))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PipelineError::Validation(ValidationError::invalid_items("regions"))
    );
    assert_eq!(calls, 0);
}

#[tokio::test(flavor = "current_thread")]
async fn test_connections_default_chunk_size() {
    let mut seen = Vec::new();
    let mut record = |p: u8| seen.push(p);

    let loaded = load_connections_progressively(&connections(120), None, Some(&mut record))
        .await
        .unwrap();

    assert_eq!(loaded.len(), 120);
    // 50 + 50 + 20
    assert_eq!(seen, vec![42, 83, 100]);
}

#[tokio::test(flavor = "current_thread")]
async fn test_empty_collection_reports_completion_once() {
    let mut seen = Vec::new();
    let mut record = |p: u8| seen.push(p);
    let loaded = load_regions_progressively(&json!([]), None, Some(&mut record))
        .await
        .unwrap();
    assert!(loaded.is_empty());
    assert_eq!(seen, vec![100]);
}

#[tokio::test(flavor = "current_thread")]
async fn test_composite_runs_phases_sequentially() {
    let mut events = Vec::new();
    let mut record = |phase: LoadPhase, p: u8| events.push((phase, p));

    let loaded = load_brain_data_progressively(&model(45, 60), Some(&mut record))
        .await
        .unwrap();

    assert_eq!(loaded.regions.len(), 45);
    assert_eq!(loaded.connections.len(), 60);
    assert_eq!(
        events,
        vec![
            (LoadPhase::Regions, 44),
            (LoadPhase::Regions, 89),
            (LoadPhase::Regions, 100),
            (LoadPhase::Connections, 83),
            (LoadPhase::Connections, 100),
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_composite_short_circuits_on_invalid_model() {
    let mut raw = model(5, 5);
    raw["connections"][3]["type"] = json!("modulatory");

    let mut events = Vec::new();
    let mut record = |phase: LoadPhase, p: u8| events.push((phase, p));
    let err = load_brain_data_progressively(&raw, Some(&mut record))
        .await
        .unwrap_err();

    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::invalid_items("connections"))
    );
    assert!(events.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn test_loader_yields_to_other_tasks() {
    // Single-threaded runtime: the spawned task can only run if the loader yields
    let ran = Arc::new(AtomicBool::new(false));
    let ran_in_task = ran.clone();
    tokio::spawn(async move {
        ran_in_task.store(true, Ordering::SeqCst);
    });

    let mut ran_before_last_chunk = false;
    let ran_in_cb = ran.clone();
    let mut check = |p: u8| {
        if p == 100 {
            ran_before_last_chunk = ran_in_cb.load(Ordering::SeqCst);
        }
    };
    load_regions_progressively(&regions(100), Some(10), Some(&mut check))
        .await
        .unwrap();

    assert!(ran_before_last_chunk);
}
