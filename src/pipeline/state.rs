// src/pipeline/state.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stufen der Tessellierung. Jede Stufe setzt die vorherige voraus.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum PipelineStage {
    #[default] // Startzustand
    Empty,
    Triangulated,
    VoronoiBuilt,
    /// Anzahl der insgesamt ausgeführten Relaxationsrunden
    Relaxed(usize),
}

impl PipelineStage {
    /// Zellen stehen zur Verfügung.
    pub fn has_cells(&self) -> bool {
        matches!(self, Self::VoronoiBuilt | Self::Relaxed(_))
    }

    pub fn relaxed_rounds(&self) -> usize {
        match self {
            Self::Relaxed(rounds) => *rounds,
            _ => 0,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Triangulated => write!(f, "Triangulated"),
            Self::VoronoiBuilt => write!(f, "VoronoiBuilt"),
            Self::Relaxed(rounds) => write!(f, "Relaxed({})", rounds),
        }
    }
}
