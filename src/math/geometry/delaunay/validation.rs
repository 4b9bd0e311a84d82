// src/math/geometry/delaunay/validation.rs

use super::Triangle;
use crate::math::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ein Punkt liegt strikt im Umkreis eines Dreiecks, dessen Ecke er nicht ist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelaunayViolation {
    pub triangle: Triangle,
    pub site: Point,
}

impl fmt::Display for DelaunayViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "site {} inside circumcircle of {}",
            self.site, self.triangle
        )
    }
}

/// Sammelt alle Delaunay-Verletzungen zwischen `triangles` und `sites`.
pub fn find_violations(triangles: &[Triangle], sites: &[Point]) -> Vec<DelaunayViolation> {
    triangles
        .iter()
        .flat_map(|triangle| {
            sites
                .iter()
                .filter(move |site| {
                    !triangle.has_vertex(**site) && triangle.is_point_inside_circumcircle(**site)
                })
                .map(move |site| DelaunayViolation {
                    triangle: *triangle,
                    site: *site,
                })
        })
        .collect()
}

/// Anzahl der Dreiecke mit mindestens einer Verletzung.
pub fn count_invalid_triangles(triangles: &[Triangle], sites: &[Point]) -> usize {
    triangles
        .iter()
        .filter(|triangle| {
            sites.iter().any(|site| {
                !triangle.has_vertex(*site) && triangle.is_point_inside_circumcircle(*site)
            })
        })
        .count()
}

/// Befund einer Triangulation. Fehler werden gesammelt, nicht geworfen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaultReport {
    /// Ergebnis der abschließenden Prüfung über alle Punkte
    pub violations: Vec<DelaunayViolation>,
    /// Summe der Verletzungen aus den Prüfungen nach jedem Einfügen
    pub insertion_violations: usize,
    /// Exakt doppelte Eingabepunkte, die übersprungen wurden
    pub skipped_duplicates: usize,
    /// Eingabepunkte, die mit einer Ecke des Super-Dreiecks zusammenfallen
    pub dropped_corner_sites: usize,
    /// Punkte, die in keinem Umkreis lagen und daher nicht eingefügt wurden
    pub uncovered_sites: usize,
    /// Entfernte Dreiecke aus doppelten Gruppen
    pub repaired_duplicates: usize,
}

impl FaultReport {
    pub fn is_faulty(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

impl fmt::Display for FaultReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} violations ({} during insertion), {} duplicate sites skipped, \
             {} corner sites dropped, {} uncovered, {} duplicate triangles repaired",
            self.violations.len(),
            self.insertion_violations,
            self.skipped_duplicates,
            self.dropped_corner_sites,
            self.uncovered_sites,
            self.repaired_duplicates
        )
    }
}
