use std::ops::Range;

/// Splits `rows` rows into at most `n` contiguous, near-equal bands
///
/// The first `rows % n` bands get one extra row. Bands are returned top to bottom
/// and together cover `0..rows` exactly once.
pub(super) fn create_bands(rows: usize, n: usize) -> Vec<Range<usize>> {
    if rows == 0 || n == 0 {
        return Vec::new();
    }

    let n = n.min(rows);
    let base = rows / n;
    let remainder = rows % n;
    let mut bands = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let size = base + usize::from(i < remainder);
        let end = start + size;
        bands.push(start..end);
        start = end;
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_all_rows() {
        let bands = create_bands(10, 3);

        assert_eq!(bands, vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn more_threads_than_rows() {
        let bands = create_bands(2, 8);

        assert_eq!(bands, vec![0..1, 1..2]);
    }

    #[test]
    fn nothing_to_split() {
        assert!(create_bands(0, 4).is_empty());
        assert!(create_bands(4, 0).is_empty());
    }
}
