// src/math/geometry/voronoi/mod.rs
pub mod builder;
pub mod cell;
pub mod config;
pub mod diagram;
pub mod lloyd;

pub use builder::{
    VoronoiBuilder, build_voronoi, remove_invalid_cells, remove_loner_cells, remove_open_cells,
};
pub use cell::{VisualHandle, VoronoiCell, share_edge};
pub use config::VoronoiConfig;
pub use diagram::{CleanupReport, DualEdge, VoronoiDiagram, VoronoiStatistics};
pub use lloyd::{
    CenterMode, LloydConfig, LloydRelaxation, RelaxationOutcome, RelaxationStats, RoundStats,
    relax,
};
