// src/debug/visualization/mod.rs
pub mod svg;

pub use self::svg::{render_diagram_svg, write_diagram_svg};
