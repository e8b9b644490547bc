//! Error types for a run.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A rendering surface or frame sink failed while producing one generation's frame
    #[error("generation {generation} failed: {source}")]
    Frame {
        generation: usize,
        #[source]
        source: OutputError,
    },

    #[error("finishing output failed: {0}")]
    Finish(#[source] OutputError),

    /// The driver was advanced again after a failed transition
    #[error("run already failed")]
    Halted,
}

/// A configuration value outside its allowed range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("width must be positive, got {0}")]
    Width(usize),

    #[error("height must be positive, got {0}")]
    Height(usize),

    #[error("frames must be positive, got {0}")]
    Frames(usize),

    #[error("alive probability must be within [0, 1], got {0}")]
    AliveProbability(f64),

    #[error("cell size must be finite and positive, got {0}")]
    CellSize(f64),

    #[error("max layers must be positive, got {0}")]
    MaxLayers(usize),

    #[error("canvas must be at least 1x1, got {0}x{1}")]
    Canvas(u32, u32),

    #[error("scale must be finite and positive, got {0}")]
    Scale(f64),

    #[error("encoder speed must be within 1..=30, got {0}")]
    Speed(i32),

    #[error("pattern of {pattern_width}x{pattern_height} does not fit a {width}x{height} grid")]
    PatternTooLarge {
        pattern_width: usize,
        pattern_height: usize,
        width: usize,
        height: usize,
    },
}

/// Malformed run-length encoded pattern text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("line {line}: unexpected {token:?}")]
    UnexpectedToken { line: usize, token: String },

    #[error("line {line}: bad run length {run:?}")]
    RunLength { line: usize, run: String },

    #[error("line {line}: malformed header")]
    Header { line: usize },
}

/// Failure of a rendering surface or frame sink
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("GIF encoding error: {0}")]
    Gif(#[from] gif::EncodingError),

    #[error("frame of {0}x{1} is too large for a GIF")]
    FrameSize(u32, u32),

    #[error("frame sink is already finished")]
    Finished,
}
