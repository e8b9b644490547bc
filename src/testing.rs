//! In-memory surfaces and sinks for unit tests.

use crate::{
    error::OutputError,
    render::{Color, Point3, RenderSurface, Size3},
    sink::FrameSink,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnCube {
    pub origin: Point3,
    pub size: Size3,
    pub color: Color,
}

/// Remembers every cube drawn since the last clear
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub cubes: Vec<DrawnCube>,
    pub clears: usize,
}

impl RenderSurface for RecordingSurface {
    type Frame = Vec<DrawnCube>;

    fn clear(&mut self) -> Result<(), OutputError> {
        self.cubes.clear();
        self.clears += 1;
        Ok(())
    }

    fn draw_cube(&mut self, origin: Point3, size: Size3, color: Color) -> Result<(), OutputError> {
        self.cubes.push(DrawnCube {
            origin,
            size,
            color,
        });
        Ok(())
    }

    fn frame(&self) -> &Self::Frame {
        &self.cubes
    }
}

/// Keeps every frame; optionally fails on the `fail_at`-th push or on finish
#[derive(Debug, Default)]
pub struct RecordingSink<F> {
    pub frames: Vec<F>,
    pub finished: usize,
    pub fail_at: Option<usize>,
    pub fail_finish: bool,
}

impl<F: Clone> FrameSink<F> for RecordingSink<F> {
    fn push_frame(&mut self, frame: &F) -> Result<(), OutputError> {
        if self.fail_at == Some(self.frames.len()) {
            return Err(OutputError::Io(std::io::Error::other("sink rejected frame")));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        if self.fail_finish {
            return Err(OutputError::Io(std::io::Error::other("sink could not finish")));
        }
        self.finished += 1;
        Ok(())
    }
}
