/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Cache-oblivious strong transposition.
//!
//! The block being transposed is recursively cut in half along whichever
//! side is currently longer, until both sides are small enough to copy
//! directly.  At every level of recursion the read and write footprints
//! shrink together, so the access pattern makes good use of every level of
//! the cache hierarchy without being tuned to any particular one.

use crate::dense::Dense;
use crate::storage::Storage;
use crate::traits::Element;

use std::ops::Range;

/// Blocks no larger than this along both sides are copied directly.
pub const BASE_BLOCK: usize = 3;

impl<T: Element> Dense<T, 2> {
    /// Strong transpose.
    ///
    /// Materializes the transpose of the current logical view into a new
    /// buffer, which then replaces the old one.  Afterwards the container is
    /// not weakly transposed, regardless of whether it was before.
    pub fn strong_transpose(&mut self) {
        let (rows, columns) = (self.rows(), self.columns());
        trace!("strong transpose of a {}x{} matrix", rows, columns);

        let mut target = Dense::new([columns, rows]);
        transpose_block(self, &mut target, 0..rows, 0..columns);
        *self = target;
    }
}

/// Writes `target[(j, i)] = source[(i, j)]` for every `(i, j)` in
/// `rows x columns`.
///
/// Ranges are half-open and absolute, so the two halves of a split always
/// partition the parent block exactly.
fn transpose_block<T: Element>(
    source: &Dense<T, 2>,
    target: &mut Dense<T, 2>,
    rows: Range<usize>,
    columns: Range<usize>,
) {
    let (height, width) = (rows.len(), columns.len());
    if height <= BASE_BLOCK && width <= BASE_BLOCK {
        for i in rows {
            for j in columns.clone() {
                *target.get_mut([j, i]) = *source.get([i, j]);
            }
        }
    } else if height >= width {
        let mid = rows.start + height / 2;
        transpose_block(source, target, rows.start..mid, columns.clone());
        transpose_block(source, target, mid..rows.end, columns);
    } else {
        let mid = columns.start + width / 2;
        transpose_block(source, target, rows.clone(), columns.start..mid);
        transpose_block(source, target, rows, mid..columns.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    fn naive_transpose(m: &Dense<f64, 2>) -> Dense<f64, 2> {
        Dense::from_fn([m.columns(), m.rows()], |[i, j]| *m.get([j, i]))
    }

    #[test]
    fn matches_naive_transpose() {
        // exercise the base case, odd splits, and both split directions
        for &(rows, columns) in &[(0, 0), (1, 1), (3, 3), (4, 4), (7, 2), (2, 9), (13, 17), (32, 5)] {
            let m = Dense::from_fn([rows, columns], |[i, j]| (100 * i + j) as f64);
            let mut t = m.clone();
            t.strong_transpose();
            assert_eq!(t.shape(), &[columns, rows]);
            assert_eq!(t, naive_transpose(&m), "shape {:?}", (rows, columns));
        }
    }

    #[test]
    fn is_an_involution() {
        let m = Dense::from_fn([11, 6], |_| ::rand::random::<f64>());
        let mut t = m.clone();
        t.strong_transpose();
        t.strong_transpose();
        assert_eq!(t.as_slice(), m.as_slice());
        assert_eq!(t.shape(), m.shape());
    }

    #[test]
    fn agrees_with_weak_transpose() {
        let m = Dense::from_fn([5, 8], |[i, j]| (i * 8 + j) as f64);
        let mut weak = m.clone();
        weak.transpose();
        let mut strong = m.clone();
        strong.strong_transpose();

        assert!(weak.is_transposed());
        assert!(!strong.is_transposed());
        for i in 0..8 {
            for j in 0..5 {
                assert_eq!(weak.get([i, j]), m.get([j, i]));
                assert_eq!(strong.get([i, j]), m.get([j, i]));
            }
        }
    }

    #[test]
    fn strong_after_weak_restores_orientation() {
        let m = Dense::from_fn([4, 6], |[i, j]| (i * 6 + j) as f64);
        let mut t = m.clone();
        t.transpose();
        t.strong_transpose();
        assert_eq!(t, m);
    }
}
