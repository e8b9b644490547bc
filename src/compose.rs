//! Turns a snapshot history into back-to-front cube draws.
//!
//! Every live cell of every retained generation becomes one cube. A
//! generation's depth is its age: the newest generation sits at depth 0 and
//! each older one is one cell further along the z axis. Surfaces have no depth
//! buffer, so cubes are submitted oldest generation first and, within one
//! generation, from the far corner of the grid (high x, then high y) towards
//! the viewer.

use crate::{
    engine::Grid,
    error::OutputError,
    history::SnapshotHistory,
    render::{Color, Point3, RenderSurface, Size3},
};

/// One cube to draw: a live cell and the depth of its generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeCommand {
    pub x: usize,
    pub y: usize,
    pub depth: usize,
}

/// How cube commands become surface primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeStyle {
    /// Surface units per grid cell
    pub cell_size: f64,
    /// Cube edge as a fraction of `cell_size`
    pub fill: f64,
    pub color: Color,
}

impl CubeStyle {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    #[inline]
    pub fn origin(&self, cmd: CubeCommand) -> Point3 {
        Point3::new(
            cmd.x as f64 * self.cell_size,
            cmd.y as f64 * self.cell_size,
            cmd.depth as f64 * self.cell_size,
        )
    }

    #[inline]
    pub fn size(&self) -> Size3 {
        Size3::cube(self.cell_size * self.fill)
    }
}

impl Default for CubeStyle {
    fn default() -> Self {
        Self {
            cell_size: 0.04,
            fill: 0.8,
            color: Color::BLUE,
        }
    }
}

/// Live cells of one generation, far corner first
fn layer(grid: &Grid, depth: usize) -> impl Iterator<Item = CubeCommand> + '_ {
    let (width, height) = grid.dimensions();
    (0..width)
        .rev()
        .flat_map(move |x| (0..height).rev().map(move |y| (x, y)))
        .filter(move |&(x, y)| grid.get(x, y).unwrap_or(false))
        .map(move |(x, y)| CubeCommand { x, y, depth })
}

/// Cube commands for the whole history in submission order
pub fn commands(history: &SnapshotHistory) -> impl Iterator<Item = CubeCommand> + '_ {
    let layers = history.len();
    history
        .oldest_first()
        .enumerate()
        .flat_map(move |(position, grid)| layer(grid, layers - 1 - position))
}

/// Collects [`commands`]
pub fn compose(history: &SnapshotHistory) -> Vec<CubeCommand> {
    commands(history).collect()
}

/// Draws every retained generation onto `surface`
///
/// The surface is not cleared first. Returns the number of cubes drawn.
pub fn draw<S: RenderSurface + ?Sized>(
    history: &SnapshotHistory,
    surface: &mut S,
    style: &CubeStyle,
) -> Result<usize, OutputError> {
    let size = style.size();
    let mut drawn = 0;
    for cmd in commands(history) {
        surface.draw_cube(style.origin(cmd), size, style.color)?;
        drawn += 1;
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pos2, testing::RecordingSurface};

    fn grid(width: usize, height: usize, alive: &[(i32, i32)]) -> Grid {
        let alive: Vec<Pos2> = alive.iter().map(|&(x, y)| Pos2::new(x, y)).collect();
        Grid::from_alive(width, height, &alive)
    }

    fn history(grids: impl IntoIterator<Item = Grid>) -> SnapshotHistory {
        let mut history = SnapshotHistory::new();
        grids.into_iter().for_each(|g| history.push(g));
        history
    }

    fn cmd(x: usize, y: usize, depth: usize) -> CubeCommand {
        CubeCommand { x, y, depth }
    }

    #[test]
    fn empty_history_draws_nothing() {
        assert!(compose(&SnapshotHistory::new()).is_empty());
    }

    #[test]
    fn newest_generation_is_front_and_last() {
        let history = history([grid(8, 8, &[(0, 0)]), grid(8, 8, &[(5, 5)])]);

        assert_eq!(compose(&history), vec![cmd(0, 0, 1), cmd(5, 5, 0)]);
    }

    #[test]
    fn layer_runs_from_far_corner() {
        let history = history([grid(3, 2, &[(0, 0), (2, 0), (0, 1), (1, 1)])]);

        assert_eq!(
            compose(&history),
            vec![cmd(2, 0, 0), cmd(1, 1, 0), cmd(0, 1, 0), cmd(0, 0, 0)]
        );
    }

    #[test]
    fn depth_counts_down_to_zero() {
        let full = Grid::from_fn(2, 2, |_, _| true);
        let history = history(std::iter::repeat_n(full, 4));
        let depths: Vec<usize> = compose(&history).iter().map(|c| c.depth).collect();

        let expected: Vec<usize> = (0..4).rev().flat_map(|d| [d; 4]).collect();
        assert_eq!(depths, expected);
    }

    #[test]
    fn capped_history_restarts_depth_at_oldest_retained() {
        let mut history = SnapshotHistory::with_max_layers(std::num::NonZeroUsize::new(2).unwrap());
        for x in 0..5 {
            history.push(grid(5, 1, &[(x, 0)]));
        }

        assert_eq!(compose(&history), vec![cmd(3, 0, 1), cmd(4, 0, 0)]);
    }

    #[test]
    fn draw_scales_commands_by_style() {
        let history = history([grid(8, 8, &[(2, 3)]), grid(8, 8, &[(1, 0), (7, 7)])]);
        let style = CubeStyle {
            cell_size: 0.5,
            fill: 0.8,
            color: Color::rgb(1, 2, 3),
        };
        let mut surface = RecordingSurface::default();

        let drawn = draw(&history, &mut surface, &style).unwrap();

        assert_eq!(drawn, 3);
        let origins: Vec<Point3> = surface.cubes.iter().map(|c| c.origin).collect();
        assert_eq!(
            origins,
            vec![
                Point3::new(1.0, 1.5, 0.5),
                Point3::new(3.5, 3.5, 0.0),
                Point3::new(0.5, 0.0, 0.0),
            ]
        );
        assert!(surface.cubes.iter().all(|c| c.size == Size3::cube(0.4)));
        assert!(surface.cubes.iter().all(|c| c.color == Color::rgb(1, 2, 3)));
        assert_eq!(surface.clears, 0);
    }
}
