pub mod error;
pub mod geometry;
pub mod sampling;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{MathError, MathResult},
        geometry::{
            delaunay::{Triangle, Triangulation, TriangulationConfig, Triangulator, triangulate},
            voronoi::{
                CenterMode, LloydConfig, LloydRelaxation, VoronoiCell, VoronoiConfig,
                VoronoiDiagram, build_voronoi, relax, share_edge,
            },
        },
        sampling::random_sites,
        types::*,
    };
}
