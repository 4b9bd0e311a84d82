// src/math/types/edge.rs
use super::Point;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Gerichtete Kante zwischen zwei Punkten.
///
/// Kanten sind unveränderliche Werte. Ein "Flip" erzeugt eine neue Kante,
/// da dieselbe Kante von mehreren Dreiecken referenziert sein kann.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: Point,
    pub b: Point,
}

impl Edge {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(self.b)
    }

    /// Kante mit vertauschten Endpunkten.
    pub fn flipped(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }

    /// Gleiche Endpunkte in gleicher Reihenfolge.
    pub fn is_identical(&self, other: &Edge) -> bool {
        self.a == other.a && self.b == other.b
    }

    /// Gleiche Endpunkte, unabhängig von der Richtung.
    pub fn is_same(&self, other: &Edge) -> bool {
        self.is_identical(other) || (self.a == other.b && self.b == other.a)
    }

    pub fn has_endpoint(&self, p: Point) -> bool {
        self.a == p || self.b == p
    }

    /// Richtet die Kante so aus, dass sie nicht nach links (fallendes x) zeigt.
    /// Senkrechte Kanten bleiben unverändert.
    pub fn left_to_right(&self) -> Self {
        if self.b.x < self.a.x {
            self.flipped()
        } else {
            *self
        }
    }

    /// Lexikographischer Vergleich über (a.x, a.z, b.x, b.z).
    pub fn lexicographic_cmp(&self, other: &Edge) -> Ordering {
        [self.a.x, self.a.z, self.b.x, self.b.z]
            .iter()
            .zip([other.a.x, other.a.z, other.b.x, other.b.z].iter())
            .map(|(l, r)| l.partial_cmp(r).unwrap_or(Ordering::Equal))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge from {} to {}", self.a, self.b)
    }
}
