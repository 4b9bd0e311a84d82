// src/math/geometry/delaunay/mod.rs
pub mod config;
pub mod triangle;
pub mod triangulation;
pub mod validation;

pub use config::TriangulationConfig;
pub use triangle::Triangle;
pub use triangulation::{
    InsertOutcome, Triangulation, Triangulator, super_triangle_corners, triangulate,
};
pub use validation::{DelaunayViolation, FaultReport, count_invalid_triangles, find_violations};
