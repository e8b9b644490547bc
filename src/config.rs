//! Run configuration and initial-state seeding.

use crate::{engine::Grid, enc::Pattern, error::ConfigError};
use rand::Rng;

/// How the first generation is populated
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fill {
    /// Each cell alive with [`Config::alive_probability`]
    #[default]
    Random,
    /// A checkerboard
    Alternating,
    All,
    Empty,
    /// A pattern centered in an otherwise dead grid
    Pattern(Pattern),
}

impl Fill {
    pub fn from_name<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    /// Builds the first generation, drawing from `rng` only for [`Fill::Random`]
    pub fn seed<R: Rng + ?Sized>(&self, width: usize, height: usize, probability: f64, rng: &mut R) -> Grid {
        match self {
            Self::Random => Grid::random(width, height, probability, rng),
            Self::Alternating => Grid::from_fn(width, height, |x, y| (x + y) % 2 == 0),
            Self::All => Grid::from_fn(width, height, |_, _| true),
            Self::Empty => Grid::new(width, height),
            Self::Pattern(pattern) => Grid::from_alive(width, height, &pattern.centered(width, height)),
        }
    }
}

/// Everything a run needs, fixed for its whole duration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Generations to simulate and render
    pub frames: usize,
    pub alive_probability: f64,
    /// Surface units per grid cell
    pub cell_size: f64,
    pub fill: Fill,
    /// Keep only this many of the newest layers; unbounded when [`None`]
    pub max_layers: Option<usize>,
    /// Step with [`Grid::step_parallel`]
    pub parallel: bool,
}

impl Config {
    /// Checks every value against its constraint, reporting the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::Width(self.width));
        }
        if self.height == 0 {
            return Err(ConfigError::Height(self.height));
        }
        if self.frames == 0 {
            return Err(ConfigError::Frames(self.frames));
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(ConfigError::AliveProbability(self.alive_probability));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if self.max_layers == Some(0) {
            return Err(ConfigError::MaxLayers(0));
        }
        if let Fill::Pattern(pattern) = &self.fill {
            if !pattern.fits(self.width, self.height) {
                return Err(ConfigError::PatternTooLarge {
                    pattern_width: pattern.width(),
                    pattern_height: pattern.height(),
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            frames: 200,
            alive_probability: 0.2,
            cell_size: 0.04,
            fill: Fill::Random,
            max_layers: None,
            parallel: false,
        }
    }
}
