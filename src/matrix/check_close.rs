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

use lazymat_assert_close::{CheckClose, CheckCloseError, Tolerances};

/// Elementwise closeness, for use with `assert_close!`.
///
/// Any two representations can be compared (e.g. a sparse matrix against a
/// lazy expression), so long as their shapes match.
impl<T, const N: usize, R1, R2> CheckClose<Matrix<T, N, R2>> for Matrix<T, N, R1>
where
    T: Element + CheckClose,
    R1: Expr<Elem = T>,
    R2: Expr<Elem = T>,
{
    fn check_close(&self, other: &Matrix<T, N, R2>, tol: Tolerances) -> Result<(), CheckCloseError> {
        assert_eq!(self.shape(), other.shape(), "cannot compare matrices of different shapes");
        for index in 0..self.size() {
            self.at(index).check_close(&other.at(index), tol).map_err(|e| e.offset(index))?;
        }
        Ok(())
    }
}
