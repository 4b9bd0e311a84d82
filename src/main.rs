// ./src/main.rs
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use voronoi_columns::{
    PipelineConfig, TessellationPipeline,
    debug::visualization::write_diagram_svg,
    math::{
        geometry::{
            delaunay::TriangulationConfig,
            voronoi::{CenterMode, LloydConfig, VoronoiConfig},
        },
        sampling::random_sites,
        types::Bounds2D,
    },
};

#[derive(Parser)]
#[command(name = "voronoi_columns")]
#[command(about = "Delaunay triangulation, Voronoi cells and Lloyd relaxation of random sites")]
struct Cmd {
    /// Number of random sites
    #[arg(long, default_value_t = 40)]
    sites: usize,
    #[arg(long, default_value_t = 10.0)]
    width: f64,
    #[arg(long, default_value_t = 10.0)]
    height: f64,
    /// Seed for site sampling; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Lloyd relaxation rounds
    #[arg(long, default_value_t = 0)]
    rounds: usize,
    #[arg(long, value_enum, default_value_t = Center::Average)]
    center: Center,
    /// Stop relaxing once the total site movement drops below this value
    #[arg(long, default_value_t = 0.0)]
    tolerance: f64,
    /// Validate the Delaunay property after every insertion
    #[arg(long)]
    validate_each: bool,
    /// Keep dual edges whose circumcenters leave the region
    #[arg(long)]
    include_outside: bool,
    #[arg(long)]
    keep_open: bool,
    /// Remove cells sharing an edge with fewer than two other cells
    #[arg(long)]
    remove_loners: bool,
    #[arg(long)]
    remove_invalid: bool,
    /// Write a debug SVG of the final state
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Center {
    Average,
    Centroid,
}

impl From<Center> for CenterMode {
    fn from(center: Center) -> Self {
        match center {
            Center::Average => CenterMode::Average,
            Center::Centroid => CenterMode::Centroid,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();

    let bounds = Bounds2D::from_size(cmd.width, cmd.height)?;
    let seed = cmd.seed.unwrap_or_else(rand::random::<u64>);
    let sites = random_sites(cmd.sites, bounds, seed)?;
    tracing::info!(sites = sites.len(), seed, %bounds, "sampled");

    let config = PipelineConfig::new(bounds)
        .with_triangulation(
            TriangulationConfig::new(bounds).with_validation(cmd.validate_each),
        )
        .with_voronoi(
            VoronoiConfig::new()
                .with_only_within_bounds(!cmd.include_outside)
                .with_remove_open_cells(!cmd.keep_open)
                .with_remove_loner_cells(cmd.remove_loners)
                .with_remove_invalid_cells(cmd.remove_invalid),
        )
        .with_lloyd(
            LloydConfig::default()
                .with_rounds(cmd.rounds)
                .with_center_mode(cmd.center.into())
                .with_convergence_tolerance(cmd.tolerance),
        );

    let mut pipeline = TessellationPipeline::new(config, sites)?;
    pipeline.run().context("tessellation pipeline failed")?;

    if let Some(diagram) = pipeline.diagram() {
        tracing::info!(stage = %pipeline.stage(), "{}", diagram.statistics());
        tracing::info!("{}", diagram.cleanup_report());
    }
    if let Some(triangulation) = pipeline.triangulation() {
        tracing::info!(
            triangles = triangulation.triangle_count(),
            "{}",
            triangulation.fault_report()
        );
    }
    for round in &pipeline.relaxation_stats().rounds {
        tracing::info!(
            round = round.round,
            total = round.total_movement,
            max = round.max_movement,
            "relaxation"
        );
    }

    if let Some(path) = &cmd.svg {
        write_diagram_svg(
            path,
            &bounds,
            pipeline.triangulation(),
            pipeline.cells(),
            pipeline.sites(),
            1024.0,
        )
        .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
