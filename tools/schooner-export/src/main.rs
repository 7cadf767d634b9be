//! schooner-export - Schooner 3D asset export tool
//!
//! Converts a host scene snapshot (JSON) to Schooner 3D binary files
//! (.sch3Dmesh, .sch3Darmature, .sch3Dmovements)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use schooner_export::config::RunSection;
use schooner_export::{
    check_scene, export_scene, logging, EdgeSplitPlan, ExportConfig, Scene, TracingReporter,
};

#[derive(Parser)]
#[command(name = "schooner-export")]
#[command(about = "Schooner 3D asset export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every mesh, armature and animation of a scene
    Build {
        /// Scene snapshot written by the host dump script
        scene: PathBuf,

        /// Path to export.toml (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (default: <scene stem>_exports next to the scene)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a scene without writing any file
    Check {
        /// Scene snapshot written by the host dump script
        scene: PathBuf,

        /// Path to export.toml (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the edges the host must split before dumping each mesh
    SplitPlan {
        /// Scene snapshot written by the host dump script
        scene: PathBuf,

        /// Path to export.toml (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Split plan of one mesh object
#[derive(Serialize)]
struct MeshSplitPlan<'a> {
    object: &'a str,
    #[serde(flatten)]
    plan: EdgeSplitPlan,
}

fn load_config(path: Option<&Path>) -> Result<ExportConfig> {
    match path {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("Failed to load config: {:?}", path)),
        None => Ok(ExportConfig::default()),
    }
}

fn load_scene(path: &Path) -> Result<Scene> {
    Scene::load(path).with_context(|| format!("Failed to load scene: {:?}", path))
}

/// `<scene stem>_exports` next to the scene file
fn default_output_dir(scene: &Path) -> PathBuf {
    let stem = scene
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene");
    scene.with_file_name(format!("{}_exports", stem))
}

/// Terminal-only logging for commands that write nothing
fn init_terminal_logging(run: &RunSection) -> Result<()> {
    let run = RunSection {
        log_to_file: false,
        ..run.clone()
    };
    logging::init(&run, Path::new("."))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(err) = &result {
        tracing::error!("{:#}", err);
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build {
            scene,
            config,
            output,
            verbose,
        } => {
            let mut config = load_config(config.as_deref())?;
            config.export.verbose |= verbose;
            let output = output.unwrap_or_else(|| default_output_dir(&scene));

            if let Some(log_file) = logging::init(&config.export, &output)? {
                tracing::debug!("Logging to {:?}", log_file);
            }

            tracing::info!("Exporting {:?} -> {:?}", scene, output);
            let snapshot = load_scene(&scene)?;
            let report = export_scene(&snapshot, &config, &output, &mut TracingReporter)?;
            tracing::info!(
                "Done! {} file(s) written, {} object(s) skipped",
                report.written.len(),
                report.skipped.len()
            );
        }

        Commands::Check { scene, config } => {
            let config = load_config(config.as_deref())?;
            init_terminal_logging(&config.export)?;

            tracing::info!("Checking {:?}", scene);
            let snapshot = load_scene(&scene)?;
            let report = check_scene(&snapshot, &config, &mut TracingReporter)?;
            if !report.skipped.is_empty() {
                anyhow::bail!("{} object(s) failed validation", report.skipped.len());
            }
            tracing::info!(
                "Scene is valid! ({} file(s) would be written)",
                report.written.len()
            );
        }

        Commands::SplitPlan { scene, config } => {
            let config = load_config(config.as_deref())?;
            init_terminal_logging(&config.export)?;

            let snapshot = load_scene(&scene)?;
            let plans: Vec<MeshSplitPlan<'_>> = snapshot
                .objects
                .iter()
                .filter_map(|object| {
                    object.mesh().map(|mesh| MeshSplitPlan {
                        object: &object.name,
                        plan: EdgeSplitPlan::for_mesh(mesh, config.mesh.textured),
                    })
                })
                .collect();

            let json =
                serde_json::to_string_pretty(&plans).context("Failed to encode split plan")?;
            println!("{}", json);
        }
    }

    Ok(())
}
