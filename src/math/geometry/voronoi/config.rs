// src/math/geometry/voronoi/config.rs
use serde::{Deserialize, Serialize};

/// Filter des Voronoi-Builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoronoiConfig {
    /// Nur duale Kanten, deren beide Umkreismittelpunkte in der Region liegen
    pub only_within_bounds: bool,
    pub remove_open_cells: bool,
    /// Zellen mit Randpunkten außerhalb der Region entfernen
    pub remove_invalid_cells: bool,
    /// Zellen entfernen, die mit weniger als zwei anderen Zellen eine Kante teilen
    pub remove_loner_cells: bool,
}

impl VoronoiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keine Filter: eine Zelle pro Punkt, auch offene und ungültige.
    pub fn unfiltered() -> Self {
        Self {
            only_within_bounds: false,
            remove_open_cells: false,
            remove_invalid_cells: false,
            remove_loner_cells: false,
        }
    }

    pub fn with_only_within_bounds(mut self, enabled: bool) -> Self {
        self.only_within_bounds = enabled;
        self
    }

    pub fn with_remove_open_cells(mut self, enabled: bool) -> Self {
        self.remove_open_cells = enabled;
        self
    }

    pub fn with_remove_invalid_cells(mut self, enabled: bool) -> Self {
        self.remove_invalid_cells = enabled;
        self
    }

    pub fn with_remove_loner_cells(mut self, enabled: bool) -> Self {
        self.remove_loner_cells = enabled;
        self
    }
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            only_within_bounds: true,
            remove_open_cells: true,
            remove_invalid_cells: false,
            remove_loner_cells: false,
        }
    }
}
