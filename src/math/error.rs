// src/math/error.rs
use crate::math::types::Point;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Degenerate triangle: vertices {a}, {b}, {c} are not pairwise distinct")]
    DegenerateTriangle { a: Point, b: Point, c: Point },

    #[error("Collinear points {a}, {b}, {c}: circumcenter denominator is zero")]
    CollinearPoints { a: Point, b: Point, c: Point },

    #[error("Triangulation is faulty: {violations} Delaunay violation(s) found")]
    FaultyTriangulation { violations: usize },

    #[error("Adjacent triangles share {shared} vertices instead of 2")]
    AdjacencyMismatch { shared: usize },

    #[error("Invalid pipeline stage: expected {expected}, but pipeline is {actual}")]
    InvalidStage { expected: String, actual: String },

    #[error("No Voronoi cells found.")]
    EmptyVoronoiCells,
}

pub type MathResult<T> = Result<T, MathError>;
