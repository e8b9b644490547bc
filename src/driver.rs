//! The run loop: simulate, accumulate, compose, emit.

use crate::{
    compose::{self, CubeStyle},
    config::Config,
    engine::Grid,
    error::{Error, OutputError, Result},
    history::SnapshotHistory,
    render::RenderSurface,
    sink::FrameSink,
    stats::{FrameStats, Recorder},
};
use rand::Rng;
use std::num::NonZeroUsize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initializing,
    /// The next generation to render
    Running(usize),
    Finished,
    /// A transition failed; the driver refuses to advance
    Failed,
}

enum Stage {
    Initializing,
    Running { generation: usize, grid: Grid },
    Finished,
    Failed,
}

/// Drives one run from a seeded grid to a finished frame sink
///
/// Each call to [`FrameDriver::advance`] performs exactly one state transition,
/// so generations are rendered and emitted strictly in order.
pub struct FrameDriver<R> {
    config: Config,
    style: CubeStyle,
    rng: R,
    stage: Stage,
    history: SnapshotHistory,
}

impl<R: Rng> FrameDriver<R> {
    /// Validates `config`; nothing is simulated until the first [`FrameDriver::advance`]
    pub fn new(config: Config, rng: R) -> Result<Self> {
        config.validate()?;

        let history = match config.max_layers.and_then(NonZeroUsize::new) {
            Some(max) => SnapshotHistory::with_max_layers(max),
            None => SnapshotHistory::new(),
        };
        Ok(Self {
            style: CubeStyle::new(config.cell_size),
            config,
            rng,
            stage: Stage::Initializing,
            history,
        })
    }

    pub fn state(&self) -> DriverState {
        match self.stage {
            Stage::Initializing => DriverState::Initializing,
            Stage::Running { generation, .. } => DriverState::Running(generation),
            Stage::Finished => DriverState::Finished,
            Stage::Failed => DriverState::Failed,
        }
    }
    #[inline]
    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }
    /// The grid the next frame will show, while running
    #[inline]
    pub fn current(&self) -> Option<&Grid> {
        match &self.stage {
            Stage::Running { grid, .. } => Some(grid),
            _ => None,
        }
    }

    /// Performs one state transition and returns the new state
    ///
    /// In `Running(i)` this renders generation `i`: it is pushed onto the
    /// history, the whole history is drawn onto the cleared `surface`, the frame
    /// is handed to `sink` and the grid is stepped. After the last generation
    /// the sink is finished. Calling this once finished does nothing.
    ///
    /// Any error leaves the driver `Failed`, and advancing it again returns
    /// [`Error::Halted`] without touching the history.
    pub fn advance<S, K, T>(&mut self, surface: &mut S, sink: &mut K, stats: &mut T) -> Result<DriverState>
    where
        S: RenderSurface + ?Sized,
        K: FrameSink<S::Frame> + ?Sized,
        T: Recorder + ?Sized,
    {
        self.stage = match std::mem::replace(&mut self.stage, Stage::Failed) {
            Stage::Initializing => {
                let Config {
                    width,
                    height,
                    alive_probability,
                    ..
                } = self.config;
                let grid = self.config.fill.seed(width, height, alive_probability, &mut self.rng);
                info!(width, height, alive = grid.alive_count(), "seeded first generation");
                Stage::Running { generation: 0, grid }
            }
            Stage::Running { generation, grid } => {
                let alive = grid.alive_count();
                let next = if self.config.parallel {
                    grid.step_parallel()
                } else {
                    grid.step()
                };
                self.history.push(grid);

                let cubes = self
                    .render_frame(surface, sink)
                    .map_err(|source| Error::Frame { generation, source })?;
                debug!(generation, alive, cubes, "frame emitted");

                stats.record(FrameStats {
                    generation,
                    alive,
                    cubes,
                });
                if stats.has_report() {
                    info!("{}", stats.report());
                }

                if generation + 1 == self.config.frames {
                    sink.finish().map_err(Error::Finish)?;
                    info!(frames = self.config.frames, "run finished");
                    Stage::Finished
                } else {
                    Stage::Running {
                        generation: generation + 1,
                        grid: next,
                    }
                }
            }
            Stage::Finished => Stage::Finished,
            Stage::Failed => return Err(Error::Halted),
        };
        Ok(self.state())
    }

    fn render_frame<S, K>(&self, surface: &mut S, sink: &mut K) -> std::result::Result<usize, OutputError>
    where
        S: RenderSurface + ?Sized,
        K: FrameSink<S::Frame> + ?Sized,
    {
        surface.clear()?;
        let cubes = compose::draw(&self.history, surface, &self.style)?;
        sink.push_frame(surface.frame())?;
        Ok(cubes)
    }

    /// Advances until finished and returns the full history
    pub fn run<S, K, T>(mut self, surface: &mut S, sink: &mut K, stats: &mut T) -> Result<SnapshotHistory>
    where
        S: RenderSurface + ?Sized,
        K: FrameSink<S::Frame> + ?Sized,
        T: Recorder + ?Sized,
    {
        while self.advance(surface, sink, stats)? != DriverState::Finished {}
        Ok(self.history)
    }
}
