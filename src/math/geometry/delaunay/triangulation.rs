// src/math/geometry/delaunay/triangulation.rs

use super::{config::TriangulationConfig, validation::*, Triangle};
use crate::math::{error::*, types::*};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Ergebnis eines einzelnen Einfügevorgangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// `violations`: Befund der Prüfung nach dem Einfügen, falls aktiviert.
    Inserted {
        removed: usize,
        created: usize,
        violations: usize,
    },
    SkippedDuplicate,
    DroppedCorner,
    /// Punkt lag in keinem Umkreis; die Triangulation blieb unverändert.
    Uncovered,
}

/// Fertige Delaunay-Triangulation über Punkte ∪ Ecken des Super-Dreiecks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    triangles: Vec<Triangle>,
    sites: Vec<Point>,
    super_corners: [Point; 3],
    bounds: Bounds2D,
    surface_height: f64,
    fault_report: FaultReport,
}

impl Triangulation {
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Tatsächlich eingefügte Punkte in Einfügereihenfolge.
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn super_corners(&self) -> [Point; 3] {
        self.super_corners
    }

    /// Punkte plus die drei Ecken des Super-Dreiecks.
    pub fn vertex_count(&self) -> usize {
        self.sites.len() + self.super_corners.len()
    }

    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }

    pub fn fault_report(&self) -> &FaultReport {
        &self.fault_report
    }

    pub fn is_delaunay(&self) -> bool {
        !self.fault_report.is_faulty()
    }

    /// `Err(FaultyTriangulation)`, sobald die abschließende Prüfung Verletzungen fand.
    pub fn ensure_delaunay(&self) -> MathResult<()> {
        if self.fault_report.is_faulty() {
            return Err(MathError::FaultyTriangulation {
                violations: self.fault_report.violation_count(),
            });
        }
        Ok(())
    }

    /// Dreiecke, die keine Ecke des Super-Dreiecks berühren.
    pub fn inner_triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangles
            .iter()
            .filter(|t| !self.super_corners.iter().any(|c| t.has_vertex(*c)))
    }

    /// Punkte auf der konfigurierten Oberflächenhöhe in 3D.
    pub fn embedded_sites(&self) -> Vec<EmbeddedPoint> {
        self.sites
            .iter()
            .map(|site| site.embed(self.surface_height))
            .collect()
    }
}

/// Inkrementeller Bowyer-Watson-Triangulator.
///
/// Hält die aktuelle Dreiecksmenge über alle bisher eingefügten Punkte. Mit
/// [`Triangulator::finish`] wird eine abschließende Prüfung über alle Punkte
/// ausgeführt und die [`Triangulation`] erzeugt.
#[derive(Debug, Clone)]
pub struct Triangulator {
    config: TriangulationConfig,
    triangles: Vec<Triangle>,
    sites: Vec<Point>,
    site_keys: HashSet<(u64, u64)>,
    super_corners: [Point; 3],
    report: FaultReport,
}

impl Triangulator {
    /// Erstellt den Triangulator und legt das Super-Dreieck an.
    pub fn new(config: TriangulationConfig) -> MathResult<Self> {
        config.validate()?;

        let super_corners = super_triangle_corners(config.bounds);
        let [a, b, c] = super_corners;
        let seed = Triangle::new(a, b, c)?;

        Ok(Self {
            config,
            triangles: vec![seed],
            sites: Vec::new(),
            site_keys: HashSet::new(),
            super_corners,
            report: FaultReport::default(),
        })
    }

    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    /// Bisheriger Befund; `violations` wird erst von [`Triangulator::finish`] gefüllt.
    pub fn fault_report(&self) -> &FaultReport {
        &self.report
    }

    /// Fügt einen Punkt ein (ein Bowyer-Watson-Schritt).
    ///
    /// Geometrische Fehler beim Neuaufbau brechen mit `Err` ab, bevor die
    /// Dreiecksmenge verändert wird. Der Punkt gilt danach als nicht eingefügt.
    pub fn insert_point(&mut self, point: Point) -> MathResult<InsertOutcome> {
        if !point.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: format!("Site {} is not finite", point),
            });
        }
        if !self.config.bounds.contains_point(point) {
            return Err(MathError::InvalidConfiguration {
                message: format!("Site {} lies outside {}", point, self.config.bounds),
            });
        }

        if self.super_corners.contains(&point) {
            debug!("Site {} coincides with a super-triangle corner, dropped", point);
            self.report.dropped_corner_sites += 1;
            return Ok(InsertOutcome::DroppedCorner);
        }
        if !self.site_keys.insert(point.key()) {
            warn!("Duplicate site {} skipped", point);
            self.report.skipped_duplicates += 1;
            return Ok(InsertOutcome::SkippedDuplicate);
        }

        let bad_triangles: Vec<Triangle> = self
            .triangles
            .iter()
            .filter(|t| t.is_point_inside_circumcircle(point))
            .copied()
            .collect();

        if bad_triangles.is_empty() {
            warn!("Site {} lies in no circumcircle, not inserted", point);
            self.site_keys.remove(&point.key());
            self.report.uncovered_sites += 1;
            return Ok(InsertOutcome::Uncovered);
        }

        let hole = hole_boundary(&bad_triangles);
        let mut created = match fill_hole(&hole, point) {
            Ok(created) => created,
            Err(err) => {
                self.site_keys.remove(&point.key());
                return Err(err);
            }
        };

        self.triangles
            .retain(|t| !bad_triangles.iter().any(|bad| bad.is_same(t)));

        // Duplikate können nur unter den neuen Dreiecken entstehen, da alle `point` enthalten
        let repaired = remove_duplicate_triangles(&mut created);
        if repaired > 0 {
            debug!(
                "Removed {} duplicate triangles while inserting {}",
                repaired, point
            );
            self.report.repaired_duplicates += repaired;
        }

        let created_count = created.len();
        self.triangles.extend(created);
        self.sites.push(point);

        let mut violations = 0;
        if self.config.validate_each_insertion {
            violations = find_violations(&self.triangles, &self.sites).len();
            if violations > 0 {
                warn!("{} Delaunay violations after inserting {}", violations, point);
                self.report.insertion_violations += violations;
            }
        }

        Ok(InsertOutcome::Inserted {
            removed: bad_triangles.len(),
            created: created_count,
            violations,
        })
    }

    /// Fügt alle Punkte in Eingabereihenfolge ein.
    pub fn insert_points(&mut self, points: &[Point]) -> MathResult<()> {
        for &point in points {
            self.insert_point(point)?;
        }
        Ok(())
    }

    /// Abschließende Prüfung über alle Punkte.
    pub fn finish(mut self) -> Triangulation {
        self.report.violations = find_violations(&self.triangles, &self.sites);
        if self.report.is_faulty() {
            warn!("Triangulation is faulty: {}", self.report);
        }

        Triangulation {
            triangles: self.triangles,
            sites: self.sites,
            super_corners: self.super_corners,
            bounds: self.config.bounds,
            surface_height: self.config.surface_height,
            fault_report: self.report,
        }
    }

    /// Vollständiger Aufbau aus einer Punktliste.
    pub fn triangulate(mut self, points: &[Point]) -> MathResult<Triangulation> {
        info!(
            "Triangulating {} sites in {}",
            points.len(),
            self.config.bounds
        );
        self.insert_points(points)?;
        let triangulation = self.finish();
        info!(
            "Triangulation finished: {} triangles over {} vertices",
            triangulation.triangle_count(),
            triangulation.vertex_count()
        );
        Ok(triangulation)
    }
}

/// Baut die Triangulation für `sites` im Bereich `bounds`.
pub fn triangulate(
    bounds: Bounds2D,
    sites: &[Point],
    validate_each_insertion: bool,
) -> MathResult<Triangulation> {
    let config = TriangulationConfig::new(bounds).with_validation(validate_each_insertion);
    Triangulator::new(config)?.triangulate(sites)
}

/// Ecken des Super-Dreiecks: (0,0), (0, 2·maxZ), (2·maxX, 0) relativ zu `bounds.min`.
pub fn super_triangle_corners(bounds: Bounds2D) -> [Point; 3] {
    let origin = bounds.min;
    [
        origin,
        Point::new(origin.x, origin.z + 2.0 * bounds.height()),
        Point::new(origin.x + 2.0 * bounds.width(), origin.z),
    ]
}

/// Rand des Lochs: normalisierte Kanten, die genau einmal vorkommen.
fn hole_boundary(bad_triangles: &[Triangle]) -> Vec<Edge> {
    let mut edges: Vec<Edge> = bad_triangles
        .iter()
        .flat_map(|t| t.edges())
        .map(|e| e.left_to_right())
        .collect();
    edges.sort_by(|l, r| l.lexicographic_cmp(r));

    edges
        .chunk_by(|l, r| l.is_identical(r))
        .filter(|run| run.len() == 1)
        .map(|run| run[0])
        .collect()
}

/// Neue Dreiecke aus jeder Lochkante und `point`.
fn fill_hole(hole: &[Edge], point: Point) -> MathResult<Vec<Triangle>> {
    hole.iter()
        .map(|edge| {
            Triangle::from_edges(
                Edge::new(edge.a, edge.b),
                Edge::new(edge.b, point),
                Edge::new(point, edge.a),
            )
        })
        .collect()
}

/// Entfernt jede Gruppe von Dreiecken mit gleicher Eckpunktmenge vollständig.
fn remove_duplicate_triangles(triangles: &mut Vec<Triangle>) -> usize {
    let n = triangles.len();
    let mut duplicated = vec![false; n];
    for i in 0..n {
        for j in (i + 1)..n {
            if triangles[i].is_same(&triangles[j]) {
                duplicated[i] = true;
                duplicated[j] = true;
            }
        }
    }

    let before = triangles.len();
    let mut flags = duplicated.into_iter();
    triangles.retain(|_| !flags.next().unwrap_or(false));
    before - triangles.len()
}

#[cfg(test)]
impl Triangulation {
    /// Fügt dem Befund eine künstliche Verletzung hinzu.
    pub(crate) fn with_violation(mut self, violation: DelaunayViolation) -> Self {
        self.fault_report.violations.push(violation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::simple_geometry::signed_area_doubled;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use spade::{DelaunayTriangulation, Triangulation as _};

    fn p(x: f64, z: f64) -> Point {
        Point::new(x, z)
    }

    fn region() -> Bounds2D {
        Bounds2D::from_size(10.0, 10.0).unwrap()
    }

    fn regression_sites() -> Vec<Point> {
        [
            (2.8, 9.1),
            (3.6, 9.0),
            (0.9, 3.4),
            (7.3, 1.2),
            (5.5, 6.6),
            (8.8, 8.1),
            (1.7, 0.6),
            (6.1, 3.9),
            (4.2, 5.0),
            (9.4, 4.6),
            (2.3, 6.8),
            (7.9, 6.0),
            (4.9, 1.8),
            (0.4, 8.2),
        ]
        .into_iter()
        .map(Point::from)
        .collect()
    }

    fn random_sites(count: usize, seed: u64) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| p(rng.random_range(0.01..9.99), rng.random_range(0.01..9.99)))
            .collect()
    }

    fn assert_delaunay(triangulation: &Triangulation) {
        let mut all = triangulation.sites().to_vec();
        all.extend(triangulation.super_corners());
        assert!(find_violations(triangulation.triangles(), &all).is_empty());
    }

    #[test]
    fn test_super_triangle_corners() {
        assert_eq!(
            super_triangle_corners(region()),
            [p(0.0, 0.0), p(0.0, 20.0), p(20.0, 0.0)]
        );
    }

    #[test]
    fn test_two_sites() {
        let sites = [p(4.7, 4.7), p(3.2, 2.2)];
        let t = triangulate(region(), &sites, true).unwrap();

        assert_eq!(t.vertex_count(), 5);
        assert_eq!(t.triangle_count(), 5);
        assert!(t.is_delaunay());
        assert_eq!(t.fault_report().insertion_violations, 0);
        assert_delaunay(&t);
    }

    #[test]
    fn test_single_site_splits_super_triangle() {
        let t = triangulate(region(), &[p(5.0, 5.0)], false).unwrap();
        assert_eq!(t.triangle_count(), 3);
        assert!(t.triangles().iter().all(|tri| tri.has_vertex(p(5.0, 5.0))));
        assert_eq!(t.inner_triangles().count(), 0);
    }

    #[test]
    fn test_regression_set_has_no_violations() {
        let sites = regression_sites();
        let t = triangulate(region(), &sites, true).unwrap();

        assert_eq!(t.fault_report().violation_count(), 0);
        assert_eq!(t.fault_report().insertion_violations, 0);
        assert_eq!(t.sites().len(), sites.len());
        assert_eq!(t.triangle_count(), 2 * sites.len() + 1);
        assert_delaunay(&t);
    }

    #[test]
    fn test_all_triangles_are_ccw() {
        let t = triangulate(region(), &random_sites(60, 7), false).unwrap();
        for tri in t.triangles() {
            assert!(signed_area_doubled(tri.a(), tri.b(), tri.c()) > 0.0);
        }
    }

    #[test]
    fn test_random_sites_are_delaunay() {
        for seed in [1, 2, 3] {
            let t = triangulate(region(), &random_sites(40, seed), false).unwrap();
            assert!(t.is_delaunay(), "seed {seed}: {}", t.fault_report());
            assert_delaunay(&t);
        }
    }

    #[test]
    fn test_triangle_count_matches_spade() {
        let sites = random_sites(40, 42);
        let t = triangulate(region(), &sites, false).unwrap();

        let mut reference: DelaunayTriangulation<SpadePoint> = DelaunayTriangulation::new();
        for point in sites.iter().chain(t.super_corners().iter()) {
            reference.insert(SpadePoint::from(*point)).unwrap();
        }

        assert_eq!(t.triangle_count(), 2 * sites.len() + 1);
        assert_eq!(t.triangle_count(), reference.num_inner_faces());
    }

    #[test]
    fn test_vertical_hole_edges_are_repaired() {
        // (5,2)-(5,8) ist eine senkrechte Delaunay-Kante; der letzte Punkt entfernt
        // beide anliegenden Dreiecke, die Kante bleibt im Lochrand doppelt erhalten
        let sites = [p(5.0, 2.0), p(5.0, 8.0), p(1.0, 5.0), p(9.0, 5.0), p(5.1, 5.0)];
        let t = triangulate(region(), &sites, true).unwrap();

        assert!(t.is_delaunay(), "{}", t.fault_report());
        assert!(t.fault_report().repaired_duplicates >= 2);
        assert_eq!(t.triangle_count(), 2 * sites.len() + 1);
        for (i, a) in t.triangles().iter().enumerate() {
            for b in &t.triangles()[i + 1..] {
                assert!(!a.is_same(b));
            }
        }
    }

    #[test]
    fn test_duplicate_sites_are_skipped() {
        let sites = [p(4.0, 4.0), p(6.0, 3.0), p(4.0, 4.0)];
        let t = triangulate(region(), &sites, false).unwrap();

        assert_eq!(t.sites().len(), 2);
        assert_eq!(t.fault_report().skipped_duplicates, 1);
        assert_eq!(t.triangle_count(), 5);
    }

    #[test]
    fn test_corner_site_is_dropped() {
        let t = triangulate(region(), &[p(0.0, 0.0), p(5.0, 5.0)], false).unwrap();
        assert_eq!(t.sites(), &[p(5.0, 5.0)]);
        assert_eq!(t.fault_report().dropped_corner_sites, 1);
    }

    #[test]
    fn test_site_on_super_edge_is_collinear() {
        let err = triangulate(region(), &[p(0.0, 5.0)], false).unwrap_err();
        assert!(matches!(err, MathError::CollinearPoints { .. }));
    }

    #[test]
    fn test_collinear_sites_never_panic() {
        let sites = [p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0)];
        match triangulate(region(), &sites, true) {
            Ok(t) => assert_delaunay(&t),
            Err(err) => assert!(matches!(
                err,
                MathError::CollinearPoints { .. } | MathError::DegenerateTriangle { .. }
            )),
        }
    }

    #[test]
    fn test_invalid_sites_are_rejected() {
        let mut triangulator = Triangulator::new(TriangulationConfig::default()).unwrap();
        assert!(matches!(
            triangulator.insert_point(p(f64::NAN, 1.0)),
            Err(MathError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            triangulator.insert_point(p(11.0, 1.0)),
            Err(MathError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_insert_point_outcomes() {
        let mut triangulator = Triangulator::new(TriangulationConfig::default()).unwrap();
        assert_eq!(
            triangulator.insert_point(p(5.0, 5.0)).unwrap(),
            InsertOutcome::Inserted {
                removed: 1,
                created: 3,
                violations: 0
            }
        );
        assert_eq!(
            triangulator.insert_point(p(5.0, 5.0)).unwrap(),
            InsertOutcome::SkippedDuplicate
        );
        assert!(triangulator.insert_point(p(20.0, 0.0)).is_err());
        assert_eq!(triangulator.triangles().len(), 3);

        let t = triangulator.finish();
        assert!(t.is_delaunay());
    }

    #[test]
    fn test_failed_insert_leaves_state_untouched() {
        let mut triangulator = Triangulator::new(TriangulationConfig::default()).unwrap();
        triangulator.insert_point(p(5.0, 5.0)).unwrap();
        let before = triangulator.triangles().to_vec();

        // (0,5) liegt auf der Kante (0,0)-(0,20) des Super-Dreiecks
        assert!(matches!(
            triangulator.insert_point(p(0.0, 5.0)),
            Err(MathError::CollinearPoints { .. })
        ));
        assert_eq!(triangulator.triangles(), before.as_slice());
        assert_eq!(triangulator.sites(), &[p(5.0, 5.0)]);

        // erneuter Versuch scheitert wieder geometrisch, nicht als Duplikat
        assert!(matches!(
            triangulator.insert_point(p(0.0, 5.0)),
            Err(MathError::CollinearPoints { .. })
        ));
        assert_eq!(triangulator.fault_report().skipped_duplicates, 0);

        triangulator.insert_point(p(7.0, 2.0)).unwrap();
        let t = triangulator.finish();
        assert_eq!(t.sites(), &[p(5.0, 5.0), p(7.0, 2.0)]);
        assert_eq!(t.triangle_count(), 2 * t.sites().len() + 1);
        assert!(t.is_delaunay(), "{}", t.fault_report());
    }

    #[test]
    fn test_insertion_violations_are_visible_per_step() {
        let config = TriangulationConfig::default().with_validation(true);
        let mut triangulator = Triangulator::new(config).unwrap();
        for site in regression_sites() {
            match triangulator.insert_point(site).unwrap() {
                InsertOutcome::Inserted { violations, .. } => assert_eq!(violations, 0),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(triangulator.fault_report().insertion_violations, 0);
        assert!(triangulator.fault_report().violations.is_empty());
    }

    #[test]
    fn test_ensure_delaunay_rejects_faulty_triangulation() {
        let t = triangulate(region(), &[p(5.0, 5.0)], false).unwrap();
        assert!(t.ensure_delaunay().is_ok());

        let triangle = t.triangles()[0];
        let faulty = t.with_violation(DelaunayViolation {
            triangle,
            site: p(1.0, 1.0),
        });
        assert_eq!(
            faulty.ensure_delaunay(),
            Err(MathError::FaultyTriangulation { violations: 1 })
        );
        assert!(!faulty.is_delaunay());
    }

    #[test]
    fn test_hole_boundary_drops_shared_edges() {
        let t1 = Triangle::new(p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0)).unwrap();
        let t2 = Triangle::new(p(4.0, 0.0), p(0.0, 0.0), p(2.0, -3.0)).unwrap();
        let hole = hole_boundary(&[t1, t2]);

        assert_eq!(hole.len(), 4);
        assert!(!hole
            .iter()
            .any(|e| e.is_same(&Edge::new(p(0.0, 0.0), p(4.0, 0.0)))));
        assert!(hole.iter().all(|e| e.a.x <= e.b.x));
    }

    #[test]
    fn test_remove_duplicate_triangles_removes_whole_group() {
        let t1 = Triangle::new(p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0)).unwrap();
        let t1_again = Triangle::new(p(2.0, 3.0), p(4.0, 0.0), p(0.0, 0.0)).unwrap();
        let t2 = Triangle::new(p(4.0, 0.0), p(0.0, 0.0), p(2.0, -3.0)).unwrap();
        let mut triangles = vec![t1, t2, t1_again];

        assert_eq!(remove_duplicate_triangles(&mut triangles), 2);
        assert_eq!(triangles, vec![t2]);
    }

    #[test]
    fn test_embedded_sites_use_surface_height() {
        let config = TriangulationConfig::default().with_surface_height(1.5);
        let t = Triangulator::new(config)
            .unwrap()
            .triangulate(&[p(2.0, 3.0)])
            .unwrap();
        let embedded = t.embedded_sites();
        assert_eq!((embedded[0].x, embedded[0].y, embedded[0].z), (2.0, 1.5, 3.0));
    }
}
