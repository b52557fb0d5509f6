// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Brain Model Inspection Tool

Validates a brain-model payload, loads it progressively and prints the scene
that would be handed to a renderer at the configured detail level.

Usage:
  cargo run --bin inspect_model -- <model.json> [--detail <low|medium|high|dynamic>] [--debug-<crate>]

Example:
  cargo run --bin inspect_model -- scans/patient-17.json --detail low --debug-neuroscene-pipeline

Configuration is read from `neuroscene.toml` (or `NEUROSCENE_CONFIG_PATH`)
when present; `NEUROSCENE_*` environment variables override it.
*/

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::process;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use neuroscene::config::{load_config_or_default, validate_config};
use neuroscene::detail::DetailController;
use neuroscene::observability::{debug_flags_help, init_logging_with_config, parse_debug_flags, LoggingConfig};
use neuroscene::pipeline::{LoadPhase, LoaderConfig};
use neuroscene::services::{FileSystemModelSource, SceneService};
use tracing::{error, info};

struct Args {
    model_path: String,
    cli_overrides: HashMap<String, String>,
}

fn parse_args() -> Result<Args> {
    let mut model_path = None;
    let mut cli_overrides = HashMap::new();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--detail" => {
                let level = args.next().context("--detail requires a level")?;
                cli_overrides.insert("forced_level".to_string(), level);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            _ if arg.starts_with("--debug-") => {}
            _ if arg.starts_with("--") => bail!("Unknown option '{}'", arg),
            _ => {
                if model_path.replace(arg).is_some() {
                    bail!("Only one model path may be given");
                }
            }
        }
    }

    Ok(Args {
        model_path: model_path.context("Missing <model.json> argument")?,
        cli_overrides,
    })
}

fn print_usage() {
    eprintln!("Usage: inspect_model <model.json> [--detail <level>] [--debug-<crate>]");
    eprintln!();
    eprintln!("{}", debug_flags_help());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let config = load_config_or_default(Some(&args.cli_overrides))?;
    validate_config(&config)?;

    let logging = LoggingConfig::from_names(&config.logging.level, &config.logging.format)?;
    let _log_guard = init_logging_with_config(&parse_debug_flags(), &logging)?;

    let path = Path::new(&args.model_path);
    if !path.is_file() {
        eprintln!("❌ Error: Model file '{}' not found", path.display());
        process::exit(1);
    }
    let model_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Model file name is not valid UTF-8")?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));

    println!("🧠 neuroscene Model Inspector");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Model:  {}", path.display());
    println!("⚙️  Chunks: {} regions / {} connections", config.pipeline.region_chunk_size, config.pipeline.connection_chunk_size);
    println!();

    let detail = Arc::new(DetailController::from_config(&config.detail)?);
    let service = SceneService::new(Arc::new(FileSystemModelSource::new(root)), detail.clone())
        .with_loader_config(LoaderConfig {
            region_chunk_size: config.pipeline.region_chunk_size,
            connection_chunk_size: config.pipeline.connection_chunk_size,
        });

    info!("Inspecting model '{}' from {}", model_id, root.display());
    println!("📖 Loading model...");
    let mut report = |phase: LoadPhase, percent: u8| {
        let label = match phase {
            LoadPhase::Regions => "regions",
            LoadPhase::Connections => "connections",
        };
        println!("   {:>3}% {}", percent, label);
    };
    let scene = match service.load_scene_progressively(model_id, Some(&mut report)).await {
        Ok(scene) => scene,
        Err(e) => {
            error!("Failed to load model '{}': {}", model_id, e);
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    };
    info!(
        "Scene ready: {}/{} regions, {}/{} connections at detail '{}'",
        scene.regions.len(),
        scene.total_regions,
        scene.connections.len(),
        scene.total_connections,
        scene.detail.level
    );
    println!();

    println!("📊 Scene");
    println!("   Model ID:    {}", scene.model_id);
    println!("   Patient ID:  {}", scene.patient_id);
    println!("   Regions:     {}/{}", scene.regions.len(), scene.total_regions);
    println!("   Connections: {}/{}", scene.connections.len(), scene.total_connections);
    if scene.is_truncated() {
        println!("   ⚠️  Scene truncated by the detail budget");
    }
    for region in scene.regions.iter().filter(|r| r.is_active).take(10) {
        println!(
            "   ⚡ {} ({}) at ({:.2}, {:.2}, {:.2})",
            region.name, region.id, region.position.x, region.position.y, region.position.z
        );
    }
    println!();

    let bundle = &scene.detail;
    println!("🎚️  Detail level: {}{}", bundle.level, if detail.is_pinned() { " (forced)" } else { "" });
    println!("   Segments:           {}", bundle.segments);
    println!("   Max regions:        {}", bundle.max_visible_regions);
    println!("   Max connections:    {}", bundle.max_visible_connections);
    println!("   Texture resolution: {}", bundle.texture_resolution);
    println!("   Draw distance:      {}", bundle.draw_distance);
    println!(
        "   Effects:            shadows={} bloom={} reflections={} antialiasing={}",
        bundle.use_shadows, bundle.use_bloom, bundle.use_reflections, bundle.use_antialiasing
    );
    println!();
    println!("✅ Done");

    Ok(())
}
