// src/math/geometry/delaunay/config.rs
use crate::math::{error::*, types::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangulationConfig {
    /// Arbeitsregion; das Super-Dreieck wird aus ihr abgeleitet.
    pub bounds: Bounds2D,
    /// Delaunay-Eigenschaft nach jedem eingefügten Punkt prüfen (teuer).
    pub validate_each_insertion: bool,
    /// Höhe, auf der Punkte für nachgelagerte 3D-Verbraucher eingebettet werden.
    pub surface_height: f64,
}

impl TriangulationConfig {
    pub fn new(bounds: Bounds2D) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds2D) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_validation(mut self, validate_each_insertion: bool) -> Self {
        self.validate_each_insertion = validate_each_insertion;
        self
    }

    pub fn with_surface_height(mut self, height: f64) -> Self {
        self.surface_height = height;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !self.bounds.min.is_finite() || !self.bounds.max.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: "Bounds must be finite".to_string(),
            });
        }

        if self.bounds.width() <= 0.0 || self.bounds.height() <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Bounds must have positive size, got {}", self.bounds),
            });
        }

        if !self.surface_height.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: "Surface height must be finite".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds2D {
                min: Point::ORIGIN,
                max: Point::new(10.0, 10.0),
            },
            validate_each_insertion: false,
            surface_height: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TriangulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let flat = Bounds2D {
            min: Point::ORIGIN,
            max: Point::new(10.0, 0.0),
        };
        let config = TriangulationConfig::new(flat);
        assert!(matches!(
            config.validate(),
            Err(MathError::InvalidConfiguration { .. })
        ));

        let config = TriangulationConfig::default().with_surface_height(f64::INFINITY);
        assert!(config.validate().is_err());
    }
}
