/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::expr::Expr;
use crate::matrix::Matrix;
use crate::traits::Element;

use itertools::Itertools;
use std::fmt;

/// Renders a rank-2 matrix or expression as comma-separated rows.
///
/// Every row, including the last, ends with a newline.  Expressions are
/// evaluated element by element as they are written.
impl<T: Element, R: Expr<Elem = T>> fmt::Display for Matrix<T, 2, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (rows, columns) = match *self.shape() {
            [rows, columns] => (rows, columns),
            // scalar leaves
            _ => (1, 1),
        };
        for i in 0..rows {
            let row = (0..columns).map(|j| self.at(i * columns + j)).join(",");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Matrix, Vector, Scalar};
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_and_columns() {
        let a = Matrix::<f64, 2>::from_fn([3, 3], |[i, j]| (1 + i + 2 * j) as f64);
        assert_eq!(a.to_string(), "1,3,5\n2,4,6\n3,5,7\n");

        let b = Vector::<i32>::from_vec([3, 1], vec![1, 2, 3]);
        assert_eq!(b.to_string(), "1\n2\n3\n");
    }

    #[test]
    fn follows_the_logical_view() {
        let mut m = Matrix::<i32, 2>::from_rows(&[[1, 2, 3]]);
        m.transpose();
        assert_eq!(m.to_string(), "1\n2\n3\n");
    }

    #[test]
    fn expressions_and_sparse() {
        let b = Vector::<f64>::from_vec([2, 1], vec![0.5, 1.5]);
        assert_eq!((2.0 * &b).to_string(), "1\n3\n");

        let mut s = crate::SparseMatrix::<i64>::new([2, 2]);
        s[[1, 0]] = 7;
        assert_eq!(s.to_string(), "0,0\n7,0\n");
    }

    #[test]
    fn degenerate() {
        assert_eq!(Matrix::<f64, 2>::new([0, 4]).to_string(), "");
        assert_eq!(Matrix::<f64, 2, _>::from_rep(Scalar::new(2.5)).to_string(), "2.5\n");
    }
}
