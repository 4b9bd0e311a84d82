// src/math/geometry/voronoi/builder.rs
use super::{
    cell::VoronoiCell,
    config::VoronoiConfig,
    diagram::{CleanupReport, DualEdge, VoronoiDiagram},
};
use crate::math::{error::*, geometry::delaunay::Triangulation, types::*};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Leitet das Voronoi-Diagramm als Dualgraph einer Triangulation ab.
pub struct VoronoiBuilder {
    config: VoronoiConfig,
}

impl VoronoiBuilder {
    pub fn new(config: VoronoiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VoronoiConfig {
        &self.config
    }

    /// Duale Kanten aller benachbarten Dreieckspaare (ungeordnet, i < j).
    pub fn dual_edges(&self, triangulation: &Triangulation) -> MathResult<Vec<DualEdge>> {
        let bounds = triangulation.bounds();
        let triangles = triangulation.triangles();
        let mut dual_edges = Vec::new();

        for (i, t1) in triangles.iter().enumerate() {
            for t2 in &triangles[i + 1..] {
                if !t1.is_adjacent(t2) {
                    continue;
                }
                let sites = t1.common_vertices(t2)?;
                let (cc1, cc2) = (t1.circumcenter(), t2.circumcenter());

                if self.config.only_within_bounds
                    && !(bounds.contains_point(cc1) && bounds.contains_point(cc2))
                {
                    continue;
                }

                dual_edges.push(DualEdge {
                    edge: Edge::new(cc1, cc2),
                    sites,
                });
            }
        }

        Ok(dual_edges)
    }

    /// Baut eine Zelle pro eindeutigem Punkt aus `sites`, in deren Reihenfolge.
    pub fn build(&self, triangulation: &Triangulation, sites: &[Point]) -> MathResult<VoronoiDiagram> {
        let bounds = triangulation.bounds();
        let dual_edges = self.dual_edges(triangulation)?;

        let mut bundles: HashMap<(u64, u64), Vec<Edge>> = HashMap::new();
        for dual in &dual_edges {
            bundles.entry(dual.sites.0.key()).or_default().push(dual.edge);
            bundles.entry(dual.sites.1.key()).or_default().push(dual.edge);
        }

        let mut seen = HashSet::new();
        let mut cells: Vec<VoronoiCell> = sites
            .iter()
            .filter(|site| seen.insert(site.key()))
            .map(|site| {
                let edges = bundles.get(&site.key()).map(Vec::as_slice).unwrap_or(&[]);
                VoronoiCell::from_edges(*site, edges, bounds)
            })
            .collect();

        debug!(
            "Grouped {} dual edges into {} cells",
            dual_edges.len(),
            cells.len()
        );

        let mut cleanup = CleanupReport::default();
        if self.config.remove_open_cells {
            cleanup.open_removed = remove_open_cells(&mut cells);
        }
        if self.config.remove_invalid_cells {
            cleanup.invalid_removed = remove_invalid_cells(&mut cells);
        }
        if self.config.remove_loner_cells {
            cleanup.loners_removed = remove_loner_cells(&mut cells);
        }

        info!("Built {} Voronoi cells, {}", cells.len(), cleanup);

        Ok(VoronoiDiagram {
            cells,
            dual_edges,
            bounds,
            cleanup,
        })
    }
}

/// Baut das Voronoi-Diagramm einer fertigen Triangulation.
pub fn build_voronoi(
    triangulation: &Triangulation,
    sites: &[Point],
    config: VoronoiConfig,
) -> MathResult<VoronoiDiagram> {
    VoronoiBuilder::new(config).build(triangulation, sites)
}

pub fn remove_open_cells(cells: &mut Vec<VoronoiCell>) -> usize {
    let before = cells.len();
    cells.retain(|cell| cell.is_closed());
    before - cells.len()
}

pub fn remove_invalid_cells(cells: &mut Vec<VoronoiCell>) -> usize {
    let before = cells.len();
    cells.retain(|cell| cell.is_valid());
    before - cells.len()
}

/// Entfernt Zellen, die mit weniger als zwei anderen Zellen eine Kante teilen.
///
/// Läuft von hinten nach vorn; jede Entscheidung sieht nur die noch verbliebenen Zellen.
pub fn remove_loner_cells(cells: &mut Vec<VoronoiCell>) -> usize {
    let mut removed = 0;
    for i in (0..cells.len()).rev() {
        let shared = cells
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && cells[i].share_edge(other))
            .count();
        if shared < 2 {
            cells.remove(i);
            removed += 1;
        }
    }
    removed
}
