// src/math/geometry/voronoi/diagram.rs

use super::cell::VoronoiCell;
use crate::math::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Duale Kante zwischen zwei Umkreismittelpunkten und die beiden Punkte, die sie trennt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualEdge {
    pub edge: Edge,
    pub sites: (Point, Point),
}

impl DualEdge {
    pub fn separates(&self, a: Point, b: Point) -> bool {
        (self.sites.0 == a && self.sites.1 == b) || (self.sites.0 == b && self.sites.1 == a)
    }
}

/// Anzahl der durch die Nachbearbeitung entfernten Zellen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    pub open_removed: usize,
    pub invalid_removed: usize,
    pub loners_removed: usize,
}

impl CleanupReport {
    pub fn total_removed(&self) -> usize {
        self.open_removed + self.invalid_removed + self.loners_removed
    }
}

impl fmt::Display for CleanupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "removed {} open, {} invalid, {} loner cells",
            self.open_removed, self.invalid_removed, self.loners_removed
        )
    }
}

/// Ergebnis des Voronoi-Builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoronoiDiagram {
    pub(crate) cells: Vec<VoronoiCell>,
    pub(crate) dual_edges: Vec<DualEdge>,
    pub(crate) bounds: Bounds2D,
    pub(crate) cleanup: CleanupReport,
}

impl VoronoiDiagram {
    /// Zellen in der Reihenfolge der Punktliste.
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [VoronoiCell] {
        &mut self.cells
    }

    pub fn into_cells(self) -> Vec<VoronoiCell> {
        self.cells
    }

    /// Alle dualen Kanten nach dem Regionsfilter, vor der Gruppierung.
    pub fn dual_edges(&self) -> &[DualEdge] {
        &self.dual_edges
    }

    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }

    pub fn cleanup_report(&self) -> CleanupReport {
        self.cleanup
    }

    pub fn cell_for_site(&self, site: Point) -> Option<&VoronoiCell> {
        self.cells.iter().find(|cell| cell.site() == site)
    }

    pub fn statistics(&self) -> VoronoiStatistics {
        let cell_areas: Vec<f64> = self.cells.iter().map(|c| c.area()).collect();
        let total_area: f64 = cell_areas.iter().sum();

        let mean_cell_area = if !cell_areas.is_empty() {
            total_area / cell_areas.len() as f64
        } else {
            0.0
        };

        let cell_area_variance = if cell_areas.len() > 1 {
            cell_areas
                .iter()
                .map(|&area| (area - mean_cell_area).powi(2))
                .sum::<f64>()
                / (cell_areas.len() - 1) as f64
        } else {
            0.0
        };

        VoronoiStatistics {
            cell_count: self.cells.len(),
            dual_edge_count: self.dual_edges.len(),
            closed_cell_count: self.cells.iter().filter(|c| c.is_closed()).count(),
            valid_cell_count: self.cells.iter().filter(|c| c.is_valid()).count(),
            total_area,
            mean_cell_area,
            cell_area_variance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoronoiStatistics {
    pub cell_count: usize,
    pub dual_edge_count: usize,
    pub closed_cell_count: usize,
    pub valid_cell_count: usize,
    pub total_area: f64,
    pub mean_cell_area: f64,
    pub cell_area_variance: f64,
}

impl fmt::Display for VoronoiStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells ({} closed, {} valid), {} dual edges, total area {:.3}, mean {:.3}",
            self.cell_count,
            self.closed_cell_count,
            self.valid_cell_count,
            self.dual_edge_count,
            self.total_area,
            self.mean_cell_area
        )
    }
}
