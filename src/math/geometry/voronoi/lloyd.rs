// src/math/geometry/voronoi/lloyd.rs

use super::{
    builder::VoronoiBuilder, cell::VoronoiCell, config::VoronoiConfig, diagram::VoronoiDiagram,
};
use crate::math::{
    error::*,
    geometry::delaunay::{Triangulation, TriangulationConfig, Triangulator},
    types::*,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Welches Zentrum einer Zelle den neuen Punkt bestimmt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CenterMode {
    /// Arithmetisches Mittel der Randpunkte
    #[default]
    Average,
    /// Flächengewichteter Schwerpunkt (klassisches Lloyd)
    Centroid,
}

/// Lloyd-Relaxation Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LloydConfig {
    /// Anzahl der Runden
    pub rounds: usize,
    pub center_mode: CenterMode,
    /// Konvergenz-Toleranz (wenn Gesamtbewegung darunter liegt, stoppe)
    pub convergence_tolerance: f64,
}

impl LloydConfig {
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_center_mode(mut self, mode: CenterMode) -> Self {
        self.center_mode = mode;
        self
    }

    pub fn with_convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence_tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !self.convergence_tolerance.is_finite() || self.convergence_tolerance < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Convergence tolerance must be finite and >= 0, got {}",
                    self.convergence_tolerance
                ),
            });
        }
        Ok(())
    }
}

impl Default for LloydConfig {
    fn default() -> Self {
        Self {
            rounds: 1,
            center_mode: CenterMode::Average,
            // 0.0: es laufen immer alle Runden
            convergence_tolerance: 0.0,
        }
    }
}

/// Statistik einer einzelnen Runde
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    pub round: usize,
    pub total_movement: f64,
    pub max_movement: f64,
    pub site_count: usize,
    pub cell_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelaxationStats {
    pub rounds: Vec<RoundStats>,
    pub converged: bool,
}

impl RelaxationStats {
    pub fn completed_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn last_total_movement(&self) -> Option<f64> {
        self.rounds.last().map(|r| r.total_movement)
    }
}

/// Zustand nach der Relaxation: neue Punkte plus die daraus neu gebauten Strukturen.
#[derive(Debug, Clone)]
pub struct RelaxationOutcome {
    pub sites: Vec<Point>,
    pub triangulation: Triangulation,
    pub diagram: VoronoiDiagram,
    pub stats: RelaxationStats,
}

/// Lloyd-Relaxation Engine
pub struct LloydRelaxation {
    config: LloydConfig,
}

impl LloydRelaxation {
    pub fn new(config: LloydConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LloydConfig {
        &self.config
    }

    /// Neuer Punkt einer Zelle; außerhalb der Region bleibt der alte Punkt.
    pub fn relaxed_site(&self, cell: &VoronoiCell, bounds: Bounds2D) -> Point {
        let center = match self.config.center_mode {
            CenterMode::Average => cell.average_center(),
            CenterMode::Centroid => cell.centroid().unwrap_or(cell.average_center()),
        };

        if bounds.contains_point(center) {
            center
        } else {
            cell.site()
        }
    }

    /// Ein neuer Punkt pro Zelle, in Zellreihenfolge.
    pub fn relax(&self, cells: &[VoronoiCell], bounds: Bounds2D) -> Vec<Point> {
        cells
            .iter()
            .map(|cell| self.relaxed_site(cell, bounds))
            .collect()
    }

    /// Wie [`relax`](Self::relax), aber über die Punktliste: Punkte ohne Zelle
    /// (z.B. weggefiltert) bleiben unverändert erhalten.
    pub fn relax_sites(
        &self,
        sites: &[Point],
        cells: &[VoronoiCell],
        bounds: Bounds2D,
    ) -> Vec<Point> {
        let by_site: HashMap<(u64, u64), &VoronoiCell> =
            cells.iter().map(|cell| (cell.site().key(), cell)).collect();

        sites
            .iter()
            .map(|site| match by_site.get(&site.key()) {
                Some(cell) => self.relaxed_site(cell, bounds),
                None => *site,
            })
            .collect()
    }

    /// Vollständiger Ablauf: Triangulation und Diagramm bauen, dann relaxieren.
    ///
    /// Eine fehlerhafte Triangulation bricht mit `FaultyTriangulation` ab, bevor
    /// Zellen daraus entstehen.
    pub fn run(
        &self,
        sites: &[Point],
        triangulation_config: TriangulationConfig,
        voronoi_config: VoronoiConfig,
    ) -> MathResult<RelaxationOutcome> {
        let triangulation = Triangulator::new(triangulation_config)?.triangulate(sites)?;
        triangulation.ensure_delaunay()?;
        let diagram = VoronoiBuilder::new(voronoi_config).build(&triangulation, sites)?;
        self.relax_from(sites.to_vec(), triangulation, diagram, triangulation_config, voronoi_config)
    }

    /// Relaxiert ausgehend von einem bereits gebauten Diagramm.
    ///
    /// Jede Runde verwirft Triangulation und Zellen und baut sie aus den neuen
    /// Punkten von Grund auf neu. Ist die Ausgangs- oder eine neu gebaute
    /// Triangulation fehlerhaft, endet der Lauf mit `FaultyTriangulation`.
    pub fn relax_from(
        &self,
        sites: Vec<Point>,
        triangulation: Triangulation,
        diagram: VoronoiDiagram,
        triangulation_config: TriangulationConfig,
        voronoi_config: VoronoiConfig,
    ) -> MathResult<RelaxationOutcome> {
        self.config.validate()?;
        if self.config.rounds > 0 && sites.is_empty() {
            return Err(MathError::InsufficientPoints {
                expected: 1,
                actual: 0,
            });
        }
        triangulation.ensure_delaunay()?;

        let bounds = triangulation_config.bounds;
        let builder = VoronoiBuilder::new(voronoi_config);
        let mut outcome = RelaxationOutcome {
            sites,
            triangulation,
            diagram,
            stats: RelaxationStats::default(),
        };

        for round in 0..self.config.rounds {
            let new_sites = self.relax_sites(&outcome.sites, outcome.diagram.cells(), bounds);
            let (total_movement, max_movement) = movement(&outcome.sites, &new_sites);

            let triangulation = Triangulator::new(triangulation_config)?.triangulate(&new_sites)?;
            triangulation.ensure_delaunay()?;
            outcome.diagram = builder.build(&triangulation, &new_sites)?;
            outcome.triangulation = triangulation;
            outcome.sites = new_sites;

            debug!(
                "Lloyd round {}: total movement {:.6}, max {:.6}",
                round, total_movement, max_movement
            );
            outcome.stats.rounds.push(RoundStats {
                round,
                total_movement,
                max_movement,
                site_count: outcome.sites.len(),
                cell_count: outcome.diagram.cells().len(),
            });

            if total_movement < self.config.convergence_tolerance {
                outcome.stats.converged = true;
                break;
            }
        }

        info!(
            "Lloyd relaxation finished after {} rounds (converged: {})",
            outcome.stats.completed_rounds(),
            outcome.stats.converged
        );
        Ok(outcome)
    }
}

/// Ein Relaxationsschritt mit arithmetischem Mittel.
pub fn relax(cells: &[VoronoiCell], bounds: Bounds2D) -> Vec<Point> {
    LloydRelaxation::new(LloydConfig::default()).relax(cells, bounds)
}

/// Gesamte und maximale Bewegung zwischen gleich indizierten Punkten.
fn movement(old: &[Point], new: &[Point]) -> (f64, f64) {
    old.iter()
        .zip(new)
        .map(|(a, b)| a.distance_to(*b))
        .fold((0.0, 0.0), |(total, max), d| (total + d, f64::max(max, d)))
}
