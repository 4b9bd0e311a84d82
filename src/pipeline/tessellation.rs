// src/pipeline/tessellation.rs

use super::{config::PipelineConfig, state::PipelineStage};
use crate::math::{
    error::*,
    geometry::{
        delaunay::{Triangulation, Triangulator},
        voronoi::{LloydRelaxation, RelaxationStats, VoronoiBuilder, VoronoiCell, VoronoiDiagram},
    },
    types::*,
};
use tracing::{info, warn};

/// Zustandsmaschine `Empty → Triangulated → VoronoiBuilt → Relaxed(n)`.
///
/// Aufrufe in falscher Reihenfolge schlagen mit [`MathError::InvalidStage`] fehl,
/// ohne den Zustand zu verändern.
#[derive(Debug, Clone)]
pub struct TessellationPipeline {
    config: PipelineConfig,
    stage: PipelineStage,
    sites: Vec<Point>,
    triangulation: Option<Triangulation>,
    diagram: Option<VoronoiDiagram>,
    relaxation_stats: RelaxationStats,
}

impl TessellationPipeline {
    pub fn new(config: PipelineConfig, sites: Vec<Point>) -> MathResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stage: PipelineStage::Empty,
            sites,
            triangulation: None,
            diagram: None,
            relaxation_stats: RelaxationStats::default(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Aktuelle Punkte; nach einer Relaxation die relaxierten.
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn triangulation(&self) -> Option<&Triangulation> {
        self.triangulation.as_ref()
    }

    pub fn diagram(&self) -> Option<&VoronoiDiagram> {
        self.diagram.as_ref()
    }

    pub fn cells(&self) -> &[VoronoiCell] {
        self.diagram.as_ref().map(|d| d.cells()).unwrap_or(&[])
    }

    /// Statistik aller bisherigen Relaxationsrunden.
    pub fn relaxation_stats(&self) -> &RelaxationStats {
        &self.relaxation_stats
    }

    /// Verwirft alle Ergebnisse und startet mit neuen Punkten.
    pub fn reset(&mut self, sites: Vec<Point>) {
        self.sites = sites;
        self.stage = PipelineStage::Empty;
        self.triangulation = None;
        self.diagram = None;
        self.relaxation_stats = RelaxationStats::default();
    }

    pub fn triangulate(&mut self) -> MathResult<&Triangulation> {
        self.expect_stage("Empty", |stage| stage == PipelineStage::Empty)?;

        let triangulation =
            Triangulator::new(self.config.triangulation)?.triangulate(&self.sites)?;
        self.stage = PipelineStage::Triangulated;
        Ok(self.triangulation.insert(triangulation))
    }

    /// Baut die Zellen; eine fehlerhafte Triangulation wird abgelehnt.
    pub fn build_voronoi(&mut self) -> MathResult<&VoronoiDiagram> {
        self.expect_stage("Triangulated", |stage| stage == PipelineStage::Triangulated)?;

        let Some(triangulation) = self.triangulation.as_ref() else {
            return Err(self.stage_error("Triangulated"));
        };
        triangulation.ensure_delaunay()?;

        let diagram = VoronoiBuilder::new(self.config.voronoi).build(triangulation, &self.sites)?;
        if diagram.cells().is_empty() {
            warn!("Voronoi diagram has no cells after cleanup");
        }
        self.stage = PipelineStage::VoronoiBuilt;
        Ok(self.diagram.insert(diagram))
    }

    /// Führt `rounds` weitere Relaxationsrunden aus.
    ///
    /// Eine fehlerhafte Triangulation in irgendeiner Runde bricht mit
    /// `FaultyTriangulation` ab; Punkte und Stufe bleiben dann unverändert.
    pub fn relax(&mut self, rounds: usize) -> MathResult<&RelaxationStats> {
        self.expect_stage("VoronoiBuilt or Relaxed", |stage| stage.has_cells())?;

        let (Some(triangulation), Some(diagram)) = (self.triangulation.clone(), self.diagram.clone())
        else {
            return Err(self.stage_error("VoronoiBuilt or Relaxed"));
        };

        if rounds > 0 && diagram.cells().is_empty() {
            return Err(MathError::EmptyVoronoiCells);
        }

        let relaxation = LloydRelaxation::new(self.config.lloyd.with_rounds(rounds));
        let outcome = relaxation.relax_from(
            self.sites.clone(),
            triangulation,
            diagram,
            self.config.triangulation,
            self.config.voronoi,
        )?;

        let completed = outcome.stats.completed_rounds();
        self.sites = outcome.sites;
        self.triangulation = Some(outcome.triangulation);
        self.diagram = Some(outcome.diagram);
        self.relaxation_stats.rounds.extend(outcome.stats.rounds);
        self.relaxation_stats.converged = outcome.stats.converged;
        self.stage = PipelineStage::Relaxed(self.stage.relaxed_rounds() + completed);

        info!("Pipeline is now {}", self.stage);
        Ok(&self.relaxation_stats)
    }

    /// Alle Stufen gemäß Konfiguration.
    pub fn run(&mut self) -> MathResult<&[VoronoiCell]> {
        self.triangulate()?;
        self.build_voronoi()?;
        if self.config.lloyd.rounds > 0 {
            self.relax(self.config.lloyd.rounds)?;
        }
        Ok(self.cells())
    }

    fn expect_stage(
        &self,
        expected: &str,
        allowed: impl Fn(PipelineStage) -> bool,
    ) -> MathResult<()> {
        if allowed(self.stage) {
            Ok(())
        } else {
            Err(self.stage_error(expected))
        }
    }

    fn stage_error(&self, expected: &str) -> MathError {
        MathError::InvalidStage {
            expected: expected.to_string(),
            actual: self.stage.to_string(),
        }
    }
}
