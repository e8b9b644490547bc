//! Append-only record of every generation rendered so far.

use crate::engine::Grid;
use std::{collections::VecDeque, num::NonZeroUsize};

/// Generations in the order they were produced, oldest first
///
/// The history grows by one grid per generation and is never reordered. When
/// built with [`SnapshotHistory::with_max_layers`] it keeps only the newest
/// `max` grids: pushing past the cap drops the oldest layer, so the rendered
/// stack stops growing and its bottom falls away.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHistory {
    layers: VecDeque<Grid>,
    max_layers: Option<NonZeroUsize>,
    appended: usize,
}

impl SnapshotHistory {
    /// An empty, unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty history retaining at most `max` grids
    pub fn with_max_layers(max: NonZeroUsize) -> Self {
        Self {
            layers: VecDeque::with_capacity(max.get()),
            max_layers: Some(max),
            appended: 0,
        }
    }

    /// Adds `grid` as the newest generation
    pub fn push(&mut self, grid: Grid) {
        debug_assert!(
            self.layers
                .front()
                .is_none_or(|first| first.dimensions() == grid.dimensions()),
            "all generations must share dimensions"
        );

        if let Some(max) = self.max_layers {
            if self.layers.len() == max.get() {
                self.layers.pop_front();
            }
        }
        self.layers.push_back(grid);
        self.appended += 1;
    }

    /// Number of retained generations
    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of generations ever pushed, including evicted ones
    #[inline]
    pub fn total_appended(&self) -> usize {
        self.appended
    }

    #[inline]
    pub fn max_layers(&self) -> Option<NonZeroUsize> {
        self.max_layers
    }

    /// Retained generations in push order
    pub fn oldest_first(&self) -> impl DoubleEndedIterator<Item = &Grid> + ExactSizeIterator {
        self.layers.iter()
    }

    #[inline]
    pub fn newest(&self) -> Option<&Grid> {
        self.layers.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Grid {
        // encodes `n` as the only live cell so grids are distinguishable
        Grid::from_fn(8, 1, |x, _| x == n)
    }

    #[test]
    fn starts_empty() {
        let history = SnapshotHistory::new();

        assert!(history.is_empty());
        assert_eq!(history.newest(), None);
        assert_eq!(history.total_appended(), 0);
    }

    #[test]
    fn keeps_push_order() {
        let mut history = SnapshotHistory::new();
        for n in 0..5 {
            history.push(numbered(n));
        }

        assert_eq!(history.len(), 5);
        let expected: Vec<Grid> = (0..5).map(numbered).collect();
        assert!(history.oldest_first().eq(expected.iter()));
        assert_eq!(history.newest(), Some(&numbered(4)));
    }

    #[test]
    fn cap_drops_oldest_layers() {
        let mut history = SnapshotHistory::with_max_layers(NonZeroUsize::new(3).unwrap());
        for n in 0..6 {
            history.push(numbered(n));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.total_appended(), 6);
        let expected: Vec<Grid> = (3..6).map(numbered).collect();
        assert!(history.oldest_first().eq(expected.iter()));
    }
}
