// ./src/lib.rs
//! Inkrementelle Delaunay-Triangulation (Bowyer-Watson), daraus abgeleitete
//! Voronoi-Zellen und Lloyd-Relaxation in der (x, z)-Ebene.

pub mod debug;
pub mod math;
pub mod pipeline;

pub use math::prelude;
pub use pipeline::{PipelineConfig, PipelineStage, TessellationPipeline};
