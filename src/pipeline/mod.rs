// src/pipeline/mod.rs
pub mod config;
pub mod state;
pub mod tessellation;

pub use config::PipelineConfig;
pub use state::PipelineStage;
pub use tessellation::TessellationPipeline;
