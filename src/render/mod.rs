//! Rendering surfaces that accept cube primitives.

mod color;
mod iso;

pub use self::color::Color;
pub use self::iso::{CanvasOptions, IsoCanvas};
use crate::error::OutputError;

/// A point in surface space; `z` points up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Point3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Extent of an axis-aligned prism along each axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size3 {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}
impl Size3 {
    #[inline]
    pub fn cube(side: f64) -> Self {
        Self {
            dx: side,
            dy: side,
            dz: side,
        }
    }
}

/// Something cubes can be painted onto, one frame at a time
///
/// There is no depth buffer: later draws cover earlier ones, so callers must
/// submit cubes back to front.
pub trait RenderSurface {
    /// The composed picture handed to a frame sink
    type Frame;

    /// Resets the surface to its background
    fn clear(&mut self) -> Result<(), OutputError>;

    /// Paints an axis-aligned prism with its lowest corner at `origin`
    fn draw_cube(&mut self, origin: Point3, size: Size3, color: Color) -> Result<(), OutputError>;

    /// The current frame
    fn frame(&self) -> &Self::Frame;
}
