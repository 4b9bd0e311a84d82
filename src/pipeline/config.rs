// src/pipeline/config.rs
use crate::math::{
    error::*,
    geometry::{
        delaunay::TriangulationConfig,
        voronoi::{LloydConfig, VoronoiConfig},
    },
    types::Bounds2D,
};
use serde::{Deserialize, Serialize};

/// Gesamtkonfiguration aller Stufen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub triangulation: TriangulationConfig,
    pub voronoi: VoronoiConfig,
    pub lloyd: LloydConfig,
}

impl PipelineConfig {
    pub fn new(bounds: Bounds2D) -> Self {
        Self {
            triangulation: TriangulationConfig::new(bounds),
            ..Self::default()
        }
    }

    pub fn with_triangulation(mut self, config: TriangulationConfig) -> Self {
        self.triangulation = config;
        self
    }

    pub fn with_voronoi(mut self, config: VoronoiConfig) -> Self {
        self.voronoi = config;
        self
    }

    pub fn with_lloyd(mut self, config: LloydConfig) -> Self {
        self.lloyd = config;
        self
    }

    pub fn bounds(&self) -> Bounds2D {
        self.triangulation.bounds
    }

    pub fn validate(&self) -> MathResult<()> {
        self.triangulation.validate()?;
        self.lloyd.validate()?;
        Ok(())
    }
}
