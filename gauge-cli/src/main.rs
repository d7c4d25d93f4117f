//! Mesh deviation inspection tool.
//!
//! Loads a source (reference) and a target mesh, computes the per-vertex
//! deviation of the target against the source surface, normalizes by the
//! source's median edge length, and writes the target out with a color per
//! vertex encoding its deviation.
//!
//! ```text
//! meshgauge reference.obj scan.ply -o deviation.ply --segments 4 --palette turbo
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use gauge_colormap::{Palette, Ramp};
use gauge_deviation::{
    median_edge_length, new_engine, normalize_deviations, Backend, DeviationSummary,
};
use gauge_io::{load_mesh, save_colored_obj, save_colored_ply};
use gauge_types::{MeshTopology, TriMesh};

/// Tolerance for the sequential/parallel cross-check.
const BACKEND_TOLERANCE: f32 = 1e-4;

/// Palette resolution used for the generated ramps.
const RAMP_SAMPLES: usize = 256;

#[derive(Parser)]
#[command(name = "meshgauge")]
#[command(about = "Per-vertex mesh deviation inspection", long_about = None)]
#[command(version)]
struct Cli {
    /// Source (reference) mesh: .obj or .ply
    source: PathBuf,

    /// Target mesh to gauge against the source: .obj or .ply
    target: PathBuf,

    /// Output path for the colored PLY (a colored OBJ is written next to it)
    #[arg(short, long, default_value = "deviation.ply")]
    output: PathBuf,

    /// Number of color quantization segments
    #[arg(long, default_value_t = 4)]
    segments: u32,

    /// Color ramp for the deviation output
    #[arg(long, value_enum, default_value_t = PaletteArg::Classic)]
    palette: PaletteArg,

    /// Execution backend
    #[arg(long, value_enum, default_value_t = BackendArg::Both)]
    backend: BackendArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaletteArg {
    Classic,
    Turbo,
    Viridis,
    Hot,
    Cool,
    Gray,
    Jet,
    Inferno,
}

impl PaletteArg {
    fn palette(self) -> Palette {
        let ramp = match self {
            Self::Classic => Ramp::Classic,
            Self::Turbo => Ramp::Turbo,
            Self::Viridis => Ramp::Viridis,
            Self::Hot => Ramp::Hot,
            Self::Cool => Ramp::Cool,
            Self::Gray => Ramp::Gray,
            Self::Jet => Ramp::Jet,
            Self::Inferno => Ramp::Inferno,
        };
        ramp.palette(RAMP_SAMPLES)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    Seq,
    Par,
    /// Run both and cross-check their results
    Both,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let source = load_mesh(&cli.source)
        .with_context(|| format!("loading source mesh {}", cli.source.display()))?;
    let target = load_mesh(&cli.target)
        .with_context(|| format!("loading target mesh {}", cli.target.display()))?;

    info!(
        source_vertices = source.vertex_count(),
        source_faces = source.face_count(),
        target_vertices = target.vertex_count(),
        target_faces = target.face_count(),
        "meshes loaded"
    );

    let mut deviations = match cli.backend {
        BackendArg::Seq => {
            let (devs, elapsed) = run_backend(Backend::Sequential, &source, &target);
            println!("Sequential compute time: {:.2} ms", elapsed.as_secs_f64() * 1000.0);
            devs
        }
        BackendArg::Par => {
            let (devs, elapsed) = run_backend(Backend::Parallel, &source, &target);
            println!("Parallel compute time: {:.2} ms", elapsed.as_secs_f64() * 1000.0);
            devs
        }
        BackendArg::Both => {
            let (seq, seq_elapsed) = run_backend(Backend::Sequential, &source, &target);
            let (par, par_elapsed) = run_backend(Backend::Parallel, &source, &target);

            println!("Sequential compute time: {:.2} ms", seq_elapsed.as_secs_f64() * 1000.0);
            println!("Parallel compute time:   {:.2} ms", par_elapsed.as_secs_f64() * 1000.0);

            match max_abs_difference(&seq, &par) {
                Some(diff) if diff < BACKEND_TOLERANCE => {
                    println!("Backends match (max difference {diff:.2e})");
                }
                Some(diff) => {
                    bail!("backend results diverge: max difference {diff:.2e}");
                }
                None => bail!(
                    "backend results have different lengths: {} vs {}",
                    seq.len(),
                    par.len()
                ),
            }
            seq
        }
    };

    if deviations.is_empty() {
        println!("Empty input mesh: nothing to gauge, no output written.");
        return Ok(());
    }

    let sigma = median_edge_length(&source);
    println!("Median edge length of source mesh: {sigma}");
    normalize_deviations(&mut deviations, sigma);

    println!("{}", DeviationSummary::from_deviations(&deviations));

    let palette = cli.palette.palette();

    let ply_path = cli.output.with_extension("ply");
    save_colored_ply(&target, &deviations, cli.segments, &palette, &ply_path)
        .with_context(|| format!("writing {}", ply_path.display()))?;
    println!("Wrote {}", ply_path.display());

    let obj_path = cli.output.with_extension("obj");
    save_colored_obj(&target, &deviations, cli.segments, &palette, &obj_path)
        .with_context(|| format!("writing {}", obj_path.display()))?;
    println!("Wrote {}", obj_path.display());

    Ok(())
}

/// Run one backend to completion, returning its result and wall time.
fn run_backend(backend: Backend, source: &TriMesh, target: &TriMesh) -> (Vec<f32>, Duration) {
    let mut engine = new_engine(backend, source.clone(), target.clone());
    let start = Instant::now();
    engine.compute_deviation();
    let elapsed = start.elapsed();
    (engine.deviations().to_vec(), elapsed)
}

/// Element-wise maximum absolute difference, or `None` on length mismatch.
fn max_abs_difference(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }
    Some(
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f32::max),
    )
}
