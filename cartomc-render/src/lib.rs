//! Top-down map assembly: color resolution, the pixel canvas, run
//! statistics and the region-walking orchestrator.

pub mod area;
pub mod canvas;
pub mod colors;
pub mod stats;
pub mod worldmap;

pub use area::RenderArea;
pub use canvas::MapCanvas;
pub use colors::{BlockColors, Rgb, UNKNOWN_COLOR};
pub use stats::RenderStats;
pub use worldmap::render_world_map;
