//! Conway's Game of Life rendered as a growing stack of isometric history layers.

pub mod compose;
pub mod config;
pub mod driver;
pub mod enc;
pub mod engine;
pub mod error;
pub mod history;
pub mod pos;
pub mod render;
pub mod sink;
pub mod stats;

#[cfg(test)]
mod testing;

pub use compose::{CubeCommand, CubeStyle};
pub use config::{Config, Fill};
pub use driver::{DriverState, FrameDriver};
pub use enc::Pattern;
pub use engine::Grid;
pub use error::{ConfigError, Error, OutputError, PatternError, Result};
pub use history::SnapshotHistory;
pub use pos::Pos2;
pub use render::{CanvasOptions, Color, IsoCanvas, RenderSurface};
pub use sink::{FrameSink, GifOptions, GifSink};
