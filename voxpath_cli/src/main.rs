// CLI entry point for running voxpath searches over scene files.
//
// Loads a JSON scene (see `scene.rs`), builds its `VoxelWorld`, runs one A*
// search and prints either the path, one coordinate per line, or the hop
// distance. Logging goes through `env_logger`; set `RUST_LOG=debug` to see
// search progress.
//
// Usage:
//   voxpath <SCENE> [OPTIONS]
//     --distance             Print only the hop distance
//     --config <FILE>        Finder config JSON, overriding the scene's
//
// Exit status: 0 on success, 2 when no path exists, 1 on any other error.

mod scene;

use log::{debug, info};
use scene::Scene;
use std::path::PathBuf;
use std::process::ExitCode;
use voxpath_search::{AStarPathFinder, FinderConfig, PathError};

#[derive(Debug, PartialEq)]
struct Args {
    scene: PathBuf,
    distance_only: bool,
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: voxpath <SCENE> [--distance] [--config <FILE>]");
            return ExitCode::from(1);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::NoPath(e)) => {
            info!("{e}");
            println!("no path");
            ExitCode::from(2)
        }
        Err(RunError::Failed(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

/// Parse command-line arguments (without the program name). Uses simple
/// matching, no clap dependency.
fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut scene = None;
    let mut distance_only = false;
    let mut config = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--distance" => distance_only = true,
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a file path")?;
                config = Some(PathBuf::from(path));
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {other}"));
            }
            other => {
                if scene.is_some() {
                    return Err(format!("unexpected argument: {other}"));
                }
                scene = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    Ok(Args {
        scene: scene.ok_or("missing scene file")?,
        distance_only,
        config,
    })
}

enum RunError {
    NoPath(PathError),
    Failed(String),
}

fn run(args: &Args) -> Result<(), RunError> {
    let scene = Scene::load(&args.scene)
        .map_err(|e| RunError::Failed(format!("{}: {e}", args.scene.display())))?;
    let config = match &args.config {
        Some(path) => FinderConfig::load(path)
            .map_err(|e| RunError::Failed(format!("{}: {e}", path.display())))?,
        None => scene.finder.clone(),
    };
    debug!("scene {} with {:?}", args.scene.display(), config);

    let world = scene.world();
    let mut finder = AStarPathFinder::new(&world, config);
    let classify = |e: PathError| {
        if e.is_defect() {
            RunError::Failed(format!("search failed: {e}"))
        } else {
            RunError::NoPath(e)
        }
    };

    if args.distance_only {
        let hops = finder
            .try_path_distance(scene.start, scene.end, scene.adjustment)
            .map_err(classify)?;
        println!("{hops}");
    } else {
        let path = finder
            .try_path(scene.start, scene.end, scene.adjustment)
            .map_err(classify)?;
        for node in &path {
            println!("{}", node.location());
        }
    }

    let stats = finder.stats();
    info!(
        "{} -> {}: {} nodes expanded",
        finder.start_location().map_or_else(|| "?".to_string(), |c| c.to_string()),
        finder.end_location().map_or_else(|| "?".to_string(), |c| c.to_string()),
        stats.expanded
    );
    Ok(())
}
