// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Achsenparallele Arbeitsregion in der (x, z)-Ebene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    pub min: Point,
    pub max: Point,
}

impl Bounds2D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point, max: Point) -> MathResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: format!("Bounds must be finite: min {} max {}", min, max),
            });
        }
        if min.x > max.x || min.z > max.z {
            return Err(MathError::InvalidConfiguration {
                message: format!("Invalid bounds: min {} > max {}", min, max),
            });
        }

        Ok(Self { min, max })
    }

    /// Region [0, max_x] × [0, max_z], wie sie der Triangulator erwartet.
    pub fn from_size(max_x: f64, max_z: f64) -> MathResult<Self> {
        if max_x <= 0.0 || max_z <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Bounding region must have positive size, got {} x {}",
                    max_x, max_z
                ),
            });
        }
        Self::new(Point::ORIGIN, Point::new(max_x, max_z))
    }

    /// Breite der Bounding Box
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Höhe (Ausdehnung in z)
    pub fn height(&self) -> f64 {
        (self.max.z - self.min.z).max(0.0)
    }

    /// Zentrum der Bounding Box
    pub fn center(&self) -> Point {
        (self.min + self.max) / 2.0
    }

    /// Prüft ob ein Punkt in der Bounding Box liegt (Rand inklusive)
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Erweitert die Bounding Box um einen Margin
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.z - margin),
            max: Point::new(self.max.x + margin, self.max.z + margin),
        }
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds2D({} to {})", self.min, self.max)
    }
}
