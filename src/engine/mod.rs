mod band;
mod index;

pub use self::index::next_state;
use crate::Pos2;
use rand::Rng;
use rayon::prelude::*;

/// Offsets of the Moore neighborhood, the center excluded
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One generation of the automaton: a dense, fixed-size field of live/dead cells
///
/// Cells are stored row-major in a single buffer. A grid never changes once built;
/// [`Grid::step`] returns a new grid instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// A grid with every cell dead
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must not be empty");
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Builds a grid by asking `alive` for every cell, row by row
    pub fn from_fn<F: FnMut(usize, usize) -> bool>(width: usize, height: usize, mut alive: F) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must not be empty");
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| alive(x, y))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// A grid with the given cells alive; positions outside the grid are ignored
    pub fn from_alive(width: usize, height: usize, alive: &[Pos2]) -> Self {
        let mut grid = Self::new(width, height);
        for (x, y) in alive.iter().filter_map(|pos| pos.to_cell(width, height)) {
            let idx = grid.index(x, y);
            grid.cells[idx] = true;
        }
        grid
    }

    /// Marks each cell alive independently when a uniform draw in `[0, 1)` falls below `probability`
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, probability: f64, rng: &mut R) -> Self {
        Self::from_fn(width, height, |_, _| rng.random::<f64>() < probability)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// The state of the cell at `(x, y)`, or [`None`] outside the grid
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    /// Like [`Grid::get`], but anything outside the grid is simply dead
    #[inline]
    fn is_alive_at(&self, x: isize, y: isize) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.get(x, y).unwrap_or(false),
            _ => false,
        }
    }

    /// Number of live cells among the 8 neighbors of `(x, y)`
    ///
    /// The grid does not wrap: neighbors past an edge count as dead.
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as isize, y as isize);
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| self.is_alive_at(x + dx, y + dy))
            .count() as u8
    }

    #[inline]
    fn next_cell(&self, x: usize, y: usize) -> bool {
        next_state(self.cells[self.index(x, y)], self.neighbor_count(x, y))
    }

    /// Computes the next generation
    pub fn step(&self) -> Self {
        let cells = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.next_cell(x, y))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Computes the next generation with rows split into bands across the rayon pool
    ///
    /// Produces exactly the same grid as [`Grid::step`].
    pub fn step_parallel(&self) -> Self {
        // each band reads only `self` and writes its own buffer, which are
        // concatenated top to bottom afterwards
        let band_outputs: Vec<Vec<bool>> =
            band::create_bands(self.height, rayon::current_num_threads())
                .into_par_iter()
                .map(|rows| {
                    rows.flat_map(|y| (0..self.width).map(move |x| (x, y)))
                        .map(|(x, y)| self.next_cell(x, y))
                        .collect()
                })
                .collect();

        let mut cells = Vec::with_capacity(self.cells.len());
        for output in band_outputs {
            cells.extend_from_slice(&output);
        }
        debug_assert_eq!(cells.len(), self.cells.len(), "bands must cover every row");

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Positions of all live cells, row by row
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(idx, _)| (idx % self.width, idx / self.width))
    }
}
