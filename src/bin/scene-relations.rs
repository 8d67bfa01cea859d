//! scene-relations CLI
//!
//! Answers directional questions about objects in a scene file, e.g.
//! `scene-relations --scene room.json relation above --reference 3 --target 8 --camera 1`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scene_relations::{
    classify, classify_all_kinds, classify_batch, classify_vertical, ContainmentMode,
    InMemoryScene, RelationConfig, RelationKind, RelationQuery, SceneRepository, VerticalQuery,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "scene-relations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Camera-relative spatial relations between 3D bounding boxes", long_about = None)]
struct Cli {
    /// Scene document (JSON) with objects and cameras
    #[arg(long, global = true, default_value = "scene.json")]
    scene: PathBuf,

    /// Settings file (TOML)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PairArgs {
    /// Reference object id (X)
    #[arg(long)]
    reference: i64,

    /// Target object id (Y)
    #[arg(long)]
    target: i64,
}

#[derive(Args)]
struct ScaleArgs {
    /// Scale factor for the half-space depth (defaults to the configured value)
    #[arg(long, short)]
    scale: Option<f64>,

    /// Use per-axis overlap instead of corner sampling
    #[arg(long)]
    overlap: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Is the target above/below/in front of/behind the reference?
    Relation {
        /// above, below, front or behind
        kind: RelationKind,

        #[command(flatten)]
        pair: PairArgs,

        /// Camera id
        #[arg(long)]
        camera: i64,

        #[command(flatten)]
        scale: ScaleArgs,
    },

    /// Above/below on world axes, without a camera
    Vertical {
        #[command(flatten)]
        pair: PairArgs,

        #[command(flatten)]
        scale: ScaleArgs,
    },

    /// Every relation for one pair
    Report {
        #[command(flatten)]
        pair: PairArgs,

        /// Camera id
        #[arg(long)]
        camera: i64,

        #[command(flatten)]
        scale: ScaleArgs,
    },

    /// One reference against many targets
    Batch {
        /// above, below, front or behind
        kind: RelationKind,

        /// Reference object id (X)
        #[arg(long)]
        reference: i64,

        /// Camera id
        #[arg(long)]
        camera: i64,

        /// Target ids; every other object in the scene when omitted
        #[arg(long, num_args = 1..)]
        targets: Vec<i64>,

        #[command(flatten)]
        scale: ScaleArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = match &cli.config {
        Some(path) => RelationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RelationConfig::default(),
    };
    let scene = InMemoryScene::load(&cli.scene)
        .with_context(|| format!("Failed to load scene {}", cli.scene.display()))?;

    match cli.command {
        Commands::Relation {
            kind,
            pair,
            camera,
            scale,
        } => {
            let scale = apply(&mut config, &scale);
            let query = RelationQuery {
                reference_id: pair.reference,
                target_id: pair.target,
                camera_id: camera,
                kind,
                scale,
            };
            let result = classify(&scene, &query, &config)?;
            emit(cli.json, &result, &result.message)
        }

        Commands::Vertical { pair, scale } => {
            let scale = apply(&mut config, &scale);
            let query = VerticalQuery {
                reference_id: pair.reference,
                target_id: pair.target,
                scale,
            };
            let result = classify_vertical(&scene, &query, &config)?;
            emit(cli.json, &result, &result.message)
        }

        Commands::Report {
            pair,
            camera,
            scale,
        } => {
            let scale = apply(&mut config, &scale);
            let results =
                classify_all_kinds(&scene, pair.reference, pair.target, camera, scale, &config)?;
            let vertical = classify_vertical(
                &scene,
                &VerticalQuery {
                    reference_id: pair.reference,
                    target_id: pair.target,
                    scale,
                },
                &config,
            )?;
            if cli.json {
                let report = serde_json::json!({ "directional": results, "vertical": vertical });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for result in &results {
                    println!("[{:>11}] {}", result.kind.to_string(), result.message);
                }
                println!("[{:>11}] {}", "vertical", vertical.message);
            }
            Ok(())
        }

        Commands::Batch {
            kind,
            reference,
            camera,
            targets,
            scale,
        } => {
            let scale = apply(&mut config, &scale);
            let targets = if targets.is_empty() {
                scene
                    .object_ids()
                    .into_iter()
                    .filter(|&id| id != reference)
                    .collect()
            } else {
                targets
            };
            let results =
                classify_batch(&scene, camera, reference, &targets, kind, scale, &config)?;

            let mut held = Vec::new();
            for (id, result) in targets.iter().zip(results) {
                match result {
                    Ok(result) if result.flag => held.push(result),
                    Ok(_) => {}
                    Err(e) => warn!("Skipping target {}: {}", id, e),
                }
            }
            info!("{} of {} targets are {}", held.len(), targets.len(), kind);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&held)?);
            } else {
                for result in &held {
                    println!("{}", result.message);
                }
            }
            Ok(())
        }
    }
}

/// Fold command-line overrides into the config and return the scale to use.
fn apply(config: &mut RelationConfig, args: &ScaleArgs) -> f64 {
    if args.overlap {
        config.containment = ContainmentMode::Overlap;
    }
    args.scale.unwrap_or(config.scale)
}

fn emit<T: Serialize>(json: bool, value: &T, message: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}
