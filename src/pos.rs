use std::{cmp::Ordering, ops::Add};

/// A signed cell coordinate, used for patterns before they are placed on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos2 {
    pub x: i32,
    pub y: i32,
}
impl Pos2 {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// The position as grid indices, or [`None`] if it lies outside a `width` by `height` grid
    #[inline]
    pub fn to_cell(self, width: usize, height: usize) -> Option<(usize, usize)> {
        let x = usize::try_from(self.x).ok()?;
        let y = usize::try_from(self.y).ok()?;
        (x < width && y < height).then_some((x, y))
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // compare y coordinate first, then x coordinate
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_rows_before_columns() {
        let mut cells = vec![Pos2::new(2, 1), Pos2::new(0, 1), Pos2::new(5, 0)];
        cells.sort();

        assert_eq!(cells, vec![Pos2::new(5, 0), Pos2::new(0, 1), Pos2::new(2, 1)]);
    }

    #[test]
    fn to_cell_rejects_out_of_bounds() {
        assert_eq!(Pos2::new(3, 2).to_cell(4, 3), Some((3, 2)));
        assert_eq!(Pos2::new(4, 0).to_cell(4, 3), None);
        assert_eq!(Pos2::new(0, -1).to_cell(4, 3), None);
    }
}
