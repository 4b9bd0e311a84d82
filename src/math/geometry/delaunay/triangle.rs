// src/math/geometry/delaunay/triangle.rs

use crate::math::{error::*, types::*, utils::simple_geometry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dreieck der Delaunay-Triangulation.
///
/// Nach der Konstruktion ist das Dreieck immer gegen den Uhrzeigersinn orientiert
/// und trägt seinen Umkreis. Der Umkreis wird genau einmal berechnet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    a: Point,
    b: Point,
    c: Point,
    circumcenter: Point,
    radius: f64,
}

impl Triangle {
    /// Erstellt ein Dreieck aus drei Eckpunkten.
    ///
    /// Fehler bei zusammenfallenden Ecken (`DegenerateTriangle`) oder
    /// kollinearen Ecken (`CollinearPoints`).
    pub fn new(a: Point, b: Point, c: Point) -> MathResult<Self> {
        if a == b || b == c || c == a {
            return Err(MathError::DegenerateTriangle { a, b, c });
        }

        // CCW erzwingen: bei Fläche <= 0 werden B und C getauscht
        let (b, c) = if simple_geometry::signed_area_doubled(a, b, c) <= 0.0 {
            (c, b)
        } else {
            (b, c)
        };

        let (circumcenter, radius) = Self::circumcircle(a, b, c)?;

        Ok(Self {
            a,
            b,
            c,
            circumcenter,
            radius,
        })
    }

    /// Erstellt ein Dreieck aus drei Kanten in Fächer-Reihenfolge:
    /// der Startpunkt jeder Kante ist eine Ecke.
    pub fn from_edges(e1: Edge, e2: Edge, e3: Edge) -> MathResult<Self> {
        Self::new(e1.a, e2.a, e3.a)
    }

    // Formel aus Wikipedia: Circumscribed_circle#Cartesian_coordinates
    fn circumcircle(a: Point, b: Point, c: Point) -> MathResult<(Point, f64)> {
        let d = 2.0 * (a.x * (b.z - c.z) + b.x * (c.z - a.z) + c.x * (a.z - b.z));
        if d == 0.0 {
            return Err(MathError::CollinearPoints { a, b, c });
        }

        let a_sq = a.x * a.x + a.z * a.z;
        let b_sq = b.x * b.x + b.z * b.z;
        let c_sq = c.x * c.x + c.z * c.z;

        let ux = (a_sq * (b.z - c.z) + b_sq * (c.z - a.z) + c_sq * (a.z - b.z)) / d;
        let uz = (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d;

        let center = Point::new(ux, uz);
        let radius = center.distance_to(a);
        if !center.is_finite() || !radius.is_finite() {
            return Err(MathError::CollinearPoints { a, b, c });
        }
        Ok((center, radius))
    }

    pub fn a(&self) -> Point {
        self.a
    }

    pub fn b(&self) -> Point {
        self.b
    }

    pub fn c(&self) -> Point {
        self.c
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    pub fn edge_ab(&self) -> Edge {
        Edge::new(self.a, self.b)
    }

    pub fn edge_bc(&self) -> Edge {
        Edge::new(self.b, self.c)
    }

    pub fn edge_ca(&self) -> Edge {
        Edge::new(self.c, self.a)
    }

    pub fn edges(&self) -> [Edge; 3] {
        [self.edge_ab(), self.edge_bc(), self.edge_ca()]
    }

    pub fn circumcenter(&self) -> Point {
        self.circumcenter
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Doppelte vorzeichenbehaftete Fläche; nach der Konstruktion immer > 0.
    pub fn signed_area_doubled(&self) -> f64 {
        simple_geometry::signed_area_doubled(self.a, self.b, self.c)
    }

    /// Punkt liegt strikt im Umkreis. Verglichen werden Beträge, keine Quadrate.
    pub fn is_point_inside_circumcircle(&self, point: Point) -> bool {
        self.circumcenter.distance_to(point) < self.radius
    }

    pub fn has_vertex(&self, point: Point) -> bool {
        self.a == point || self.b == point || self.c == point
    }

    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.edges().iter().any(|e| e.is_same(edge))
    }

    /// Gleiche Eckpunktmenge, unabhängig von der Reihenfolge.
    pub fn is_same(&self, other: &Triangle) -> bool {
        self.vertices().iter().all(|v| other.has_vertex(*v))
    }

    /// Benachbart: verschiedene Eckpunktmengen, aber mindestens eine gemeinsame Kante.
    pub fn is_adjacent(&self, other: &Triangle) -> bool {
        !self.is_same(other) && self.edges().iter().any(|e| other.has_edge(e))
    }

    /// Die zwei gemeinsamen Ecken zweier benachbarter Dreiecke.
    ///
    /// Die Reihenfolge ist deterministisch und folgt den Ecken von `other`:
    /// zuerst `other.a`, danach `other.b` bzw. `other.c`.
    pub fn common_vertices(&self, other: &Triangle) -> MathResult<(Point, Point)> {
        let shared = other.vertices().iter().filter(|v| self.has_vertex(**v)).count();
        if shared != 2 {
            return Err(MathError::AdjacencyMismatch { shared });
        }

        let pair = if self.has_vertex(other.a) {
            if self.has_vertex(other.b) {
                (other.a, other.b)
            } else {
                (other.a, other.c)
            }
        } else {
            (other.b, other.c)
        };
        Ok(pair)
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Triangle [{}, {}, {}] circumcenter {} radius {:.4}",
            self.a, self.b, self.c, self.circumcenter, self.radius
        )
    }
}
