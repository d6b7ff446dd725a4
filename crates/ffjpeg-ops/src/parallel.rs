//! Row-level iteration shared by the transforms.
//!
//! With the `parallel` feature (default) rows are distributed across the
//! global rayon pool; without it the same closures run on the calling thread.
//! Every row is written by exactly one worker, so no synchronization beyond
//! rayon's final join is needed.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-byte row of `data`.
///
/// A zero `row_len` (zero-width image) is a no-op.
pub(crate) fn for_each_row<F>(data: &mut [u8], row_len: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Swaps the rows of `top` with the rows of `bottom` in mirrored order.
///
/// Row `i` of `top` trades places with row `n - 1 - i` of `bottom`, where both
/// halves hold `n` rows.
pub(crate) fn swap_mirrored_rows(top: &mut [u8], bottom: &mut [u8], row_len: usize) {
    if row_len == 0 {
        return;
    }
    debug_assert_eq!(top.len(), bottom.len());

    #[cfg(feature = "parallel")]
    top.par_chunks_mut(row_len)
        .zip(bottom.par_chunks_mut(row_len).rev())
        .for_each(|(a, b)| a.swap_with_slice(b));

    #[cfg(not(feature = "parallel"))]
    top.chunks_mut(row_len)
        .zip(bottom.chunks_mut(row_len).rev())
        .for_each(|(a, b)| a.swap_with_slice(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_row_indices() {
        let mut data = vec![0u8; 4 * 3];
        for_each_row(&mut data, 3, |y, row| row.fill(y as u8));
        assert_eq!(data, [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_for_each_row_zero_width() {
        let mut data: Vec<u8> = Vec::new();
        for_each_row(&mut data, 0, |_, _| panic!("no rows expected"));
    }

    #[test]
    fn test_swap_mirrored_rows() {
        let mut top = vec![1, 1, 2, 2];
        let mut bottom = vec![3, 3, 4, 4];
        swap_mirrored_rows(&mut top, &mut bottom, 2);
        assert_eq!(top, [4, 4, 3, 3]);
        assert_eq!(bottom, [2, 2, 1, 1]);
    }
}
