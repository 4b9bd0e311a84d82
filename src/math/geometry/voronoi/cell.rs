// src/math/geometry/voronoi/cell.rs

use crate::math::{
    types::*,
    utils::{angles, simple_geometry},
};
use geo::{Area, Centroid, LineString, Polygon};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Undurchsichtiger Verweis auf eine visuelle Repräsentation der Zelle.
///
/// Wird von nachgelagerten Systemen gesetzt; der Kern liest ihn nie aus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Voronoi-Zelle eines einzelnen Punktes.
///
/// Randpunkte sind dedupliziert und im Uhrzeigersinn um `site` sortiert. Die
/// Randkanten werden aus den sortierten Punkten neu aufgebaut und bilden einen
/// geschlossenen Ring. Nach der Konstruktion ist die Zelle unveränderlich, bis
/// auf den optionalen [`VisualHandle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoronoiCell {
    site: Point,
    boundary_points: Vec<Point>,
    boundary_edges: Vec<Edge>,
    average_center: Point,
    is_valid: bool,
    visual: Option<VisualHandle>,
}

impl VoronoiCell {
    /// Baut die Zelle aus den ungeordneten dualen Kanten ihres Punktes.
    pub fn from_edges(site: Point, edges: &[Edge], bounds: Bounds2D) -> Self {
        let endpoints = edges.iter().flat_map(|e| [e.a, e.b]);
        let boundary_points = sort_clockwise(site, dedup_points(endpoints));
        let boundary_edges = ring_edges(&boundary_points);

        // Ohne Randpunkte bleibt der Punkt selbst das Zentrum
        let average_center = Point::mean(&boundary_points).unwrap_or(site);
        let is_valid = boundary_points.iter().all(|p| bounds.contains_point(*p));

        Self {
            site,
            boundary_points,
            boundary_edges,
            average_center,
            is_valid,
            visual: None,
        }
    }

    pub fn site(&self) -> Point {
        self.site
    }

    /// Randpunkte im Uhrzeigersinn.
    pub fn boundary_points(&self) -> &[Point] {
        &self.boundary_points
    }

    pub fn boundary_edges(&self) -> &[Edge] {
        &self.boundary_edges
    }

    /// Arithmetisches Mittel der Randpunkte.
    pub fn average_center(&self) -> Point {
        self.average_center
    }

    /// Alle Randpunkte liegen in der Arbeitsregion.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_closed(&self) -> bool {
        if self.boundary_points.len() < 3 {
            return false;
        }
        match (self.boundary_edges.first(), self.boundary_edges.last()) {
            (Some(first), Some(last)) => first.a == last.b,
            _ => false,
        }
    }

    /// Mindestens eine Randkante ist (richtungsunabhängig) auch Randkante von `other`.
    pub fn share_edge(&self, other: &VoronoiCell) -> bool {
        self.boundary_edges
            .iter()
            .any(|e| other.boundary_edges.iter().any(|o| e.is_same(o)))
    }

    /// Indizes aller Zellen in `cells`, die eine Kante mit dieser Zelle teilen.
    pub fn neighbors(&self, cells: &[VoronoiCell]) -> Vec<usize> {
        cells
            .iter()
            .enumerate()
            .filter(|(_, other)| other.site != self.site && self.share_edge(other))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        let exterior: Vec<geo::Coord<f64>> =
            self.boundary_points.iter().map(|p| (*p).into()).collect();
        Polygon::new(LineString::from(exterior), vec![])
    }

    pub fn area(&self) -> f64 {
        if self.boundary_points.len() < 3 {
            return 0.0;
        }
        self.to_polygon().unsigned_area()
    }

    /// Flächengewichteter Schwerpunkt; `None` für entartete Zellen.
    pub fn centroid(&self) -> Option<Point> {
        if self.boundary_points.len() < 3 || self.area() <= 0.0 {
            return None;
        }
        self.to_polygon().centroid().map(|c| Point::new(c.x(), c.y()))
    }

    pub fn perimeter(&self) -> f64 {
        if self.boundary_points.len() < 2 {
            return 0.0;
        }
        simple_geometry::polygon_perimeter(&self.boundary_points)
    }

    /// Randpunkte auf fester Höhe in 3D, z.B. für Säulen-Meshes.
    pub fn embedded_boundary(&self, height: f64) -> Vec<EmbeddedPoint> {
        self.boundary_points.iter().map(|p| p.embed(height)).collect()
    }

    pub fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    pub fn set_visual(&mut self, handle: Option<VisualHandle>) {
        self.visual = handle;
    }
}

impl fmt::Display for VoronoiCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VoronoiCell at {} with {} boundary points (closed: {}, valid: {})",
            self.site,
            self.boundary_points.len(),
            self.is_closed(),
            self.is_valid
        )
    }
}

/// Frei stehende Variante von [`VoronoiCell::share_edge`].
pub fn share_edge(a: &VoronoiCell, b: &VoronoiCell) -> bool {
    a.share_edge(b)
}

/// Exakte Duplikate entfernen, erstes Vorkommen gewinnt.
fn dedup_points<I>(points: I) -> Vec<Point>
where
    I: IntoIterator<Item = Point>,
{
    let mut seen = HashSet::new();
    points
        .into_iter()
        .filter(|p| seen.insert(p.key()))
        .collect()
}

/// Im Uhrzeigersinn nach Peilung; bei gleicher Peilung zuerst der entferntere Punkt.
fn sort_clockwise(site: Point, mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|l, r| {
        let bearing_l = angles::bearing(*l - site);
        let bearing_r = angles::bearing(*r - site);
        bearing_l
            .partial_cmp(&bearing_r)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                site.distance_to(*r)
                    .partial_cmp(&site.distance_to(*l))
                    .unwrap_or(Ordering::Equal)
            })
    });
    points
}

fn ring_edges(points: &[Point]) -> Vec<Edge> {
    if points.len() < 2 {
        return Vec::new();
    }
    let n = points.len();
    (0..n)
        .map(|i| Edge::new(points[i], points[(i + 1) % n]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, z: f64) -> Point {
        Point::new(x, z)
    }

    fn region() -> Bounds2D {
        Bounds2D::from_size(10.0, 10.0).unwrap()
    }

    fn square_edges() -> Vec<Edge> {
        // Absichtlich ungeordnet und mit geteilten Endpunkten
        vec![
            Edge::new(p(6.0, 4.0), p(4.0, 4.0)),
            Edge::new(p(4.0, 6.0), p(6.0, 6.0)),
            Edge::new(p(4.0, 4.0), p(4.0, 6.0)),
            Edge::new(p(6.0, 6.0), p(6.0, 4.0)),
        ]
    }

    #[test]
    fn test_points_are_deduped_and_clockwise() {
        let cell = VoronoiCell::from_edges(p(5.0, 5.0), &square_edges(), region());

        // Peilung aufsteigend, beginnend im Südwesten
        assert_eq!(
            cell.boundary_points(),
            &[p(4.0, 4.0), p(4.0, 6.0), p(6.0, 6.0), p(6.0, 4.0)]
        );
        assert_eq!(cell.boundary_edges().len(), 4);
        assert!(cell.is_closed());
        assert!(cell.is_valid());
    }

    #[test]
    fn test_ring_is_consecutive() {
        let cell = VoronoiCell::from_edges(p(5.0, 5.0), &square_edges(), region());
        let edges = cell.boundary_edges();
        for pair in edges.windows(2) {
            assert_eq!(pair[0].b, pair[1].a);
        }
        assert_eq!(edges[0].a, edges[edges.len() - 1].b);
    }

    #[test]
    fn test_tie_puts_farther_point_first() {
        let edges = [
            Edge::new(p(5.0, 6.0), p(5.0, 8.0)),
            Edge::new(p(7.0, 3.0), p(3.0, 3.0)),
        ];
        let cell = VoronoiCell::from_edges(p(5.0, 5.0), &edges, region());
        let points = cell.boundary_points();
        let near = points.iter().position(|q| *q == p(5.0, 6.0)).unwrap();
        let far = points.iter().position(|q| *q == p(5.0, 8.0)).unwrap();
        assert_eq!(far + 1, near);
    }

    #[test]
    fn test_centers() {
        let cell = VoronoiCell::from_edges(p(5.0, 5.0), &square_edges(), region());
        assert_eq!(cell.average_center(), p(5.0, 5.0));

        let centroid = cell.centroid().unwrap();
        assert_relative_eq!(centroid.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(centroid.z, 5.0, epsilon = 1e-12);
        assert_relative_eq!(cell.area(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(cell.perimeter(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_average_center_differs_from_centroid() {
        // Viele Randpunkte auf einer Seite ziehen das Mittel, nicht den Schwerpunkt
        let pts = [
            p(4.0, 4.0),
            p(4.0, 6.0),
            p(6.0, 6.0),
            p(6.0, 5.5),
            p(6.0, 5.0),
            p(6.0, 4.5),
            p(6.0, 4.0),
        ];
        let edges: Vec<Edge> = (0..pts.len())
            .map(|i| Edge::new(pts[i], pts[(i + 1) % pts.len()]))
            .collect();
        let cell = VoronoiCell::from_edges(p(5.0, 5.0), &edges, region());

        assert!(cell.average_center().x > 5.0);
        let centroid = cell.centroid().unwrap();
        assert_relative_eq!(centroid.x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_open_and_invalid_cells() {
        let two_points = [Edge::new(p(1.0, 1.0), p(2.0, 2.0))];
        let cell = VoronoiCell::from_edges(p(1.0, 2.0), &two_points, region());
        assert!(!cell.is_closed());
        assert_eq!(cell.area(), 0.0);
        assert!(cell.centroid().is_none());

        let empty = VoronoiCell::from_edges(p(3.0, 3.0), &[], region());
        assert!(!empty.is_closed());
        assert_eq!(empty.average_center(), p(3.0, 3.0));

        let outside = [
            Edge::new(p(-1.0, 1.0), p(2.0, 2.0)),
            Edge::new(p(2.0, 2.0), p(1.0, -1.0)),
        ];
        let cell = VoronoiCell::from_edges(p(0.5, 0.5), &outside, region());
        assert!(!cell.is_valid());
    }

    #[test]
    fn test_share_edge_ignores_direction() {
        let left = VoronoiCell::from_edges(p(5.0, 5.0), &square_edges(), region());
        let right_edges = vec![
            Edge::new(p(6.0, 4.0), p(6.0, 6.0)),
            Edge::new(p(6.0, 6.0), p(8.0, 6.0)),
            Edge::new(p(8.0, 6.0), p(8.0, 4.0)),
            Edge::new(p(8.0, 4.0), p(6.0, 4.0)),
        ];
        let right = VoronoiCell::from_edges(p(7.0, 5.0), &right_edges, region());
        let far = VoronoiCell::from_edges(
            p(1.5, 1.5),
            &[
                Edge::new(p(1.0, 1.0), p(1.0, 2.0)),
                Edge::new(p(1.0, 2.0), p(2.0, 2.0)),
                Edge::new(p(2.0, 2.0), p(1.0, 1.0)),
            ],
            region(),
        );

        assert!(share_edge(&left, &right));
        assert!(right.share_edge(&left));
        assert!(!left.share_edge(&far));

        let cells = vec![left.clone(), right, far];
        assert_eq!(left.neighbors(&cells), vec![1]);
    }

    #[test]
    fn test_embedded_boundary_and_visual() {
        let mut cell = VoronoiCell::from_edges(p(5.0, 5.0), &square_edges(), region());
        let embedded = cell.embedded_boundary(2.0);
        assert_eq!(embedded.len(), 4);
        assert!(embedded.iter().all(|v| v.y == 2.0));

        assert!(cell.visual().is_none());
        cell.set_visual(Some(VisualHandle(7)));
        assert_eq!(cell.visual(), Some(VisualHandle(7)));
    }
}
