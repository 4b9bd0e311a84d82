// src/math/geometry/mod.rs

// Deklaration der Haupt-Geometriemodule
pub mod delaunay;
pub mod voronoi;

// Re-Exporte für einen schnellen Zugriff auf die Kern-Geometrietypen,
// falls man nicht das gesamte `math::prelude` importieren möchte.

// Delaunay-Exporte
pub use self::delaunay::{
    FaultReport, InsertOutcome, Triangle, Triangulation, TriangulationConfig, Triangulator,
    triangulate,
};

// Voronoi-Exporte
pub use self::voronoi::{
    CenterMode, CleanupReport, DualEdge, LloydConfig, LloydRelaxation, RelaxationStats,
    VisualHandle, VoronoiBuilder, VoronoiCell, VoronoiConfig, VoronoiDiagram, build_voronoi,
    relax, share_edge,
};
