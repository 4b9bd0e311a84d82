// src/math/types/mod.rs
pub mod bounds;
pub mod edge;
pub mod point;

pub use bounds::*;
pub use edge::*;
pub use point::*;

// Re-export häufig verwendete externe Typen
pub use nalgebra::Point3;
pub use spade::Point2;

pub type SpadePoint = Point2<f64>;
pub type EmbeddedPoint = Point3<f64>;
