/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Triangular classification and substitution.

use crate::dense::Dense;
use crate::expr::Expr;
use crate::storage::Storage;
use crate::traits::{Element, Field};

/// Failures of `span` that ordinary input can trigger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SolveError {
    #[error("cannot solve a system with a non-square {rows}x{columns} matrix")]
    NotSquare { rows: usize, columns: usize },

    #[error("the {rows}x{columns} matrix is neither lower nor upper triangular")]
    NotTriangular { rows: usize, columns: usize },

    #[error("zero pivot on the diagonal at index {pivot}; the system is singular")]
    Singular { pivot: usize },
}

impl<T: Element> Dense<T, 2> {
    /// True if every entry strictly above the diagonal is exactly zero.
    pub fn is_lower_triangular(&self) -> bool {
        let zero = T::zero();
        (0..self.rows()).all(|i| {
            (i + 1..self.columns()).all(|j| *self.get([i, j]) == zero)
        })
    }

    /// True if every entry strictly below the diagonal is exactly zero.
    pub fn is_upper_triangular(&self) -> bool {
        let zero = T::zero();
        (1..self.rows()).all(|i| {
            (0..i.min(self.columns())).all(|j| *self.get([i, j]) == zero)
        })
    }
}

impl<T: Field> Dense<T, 2> {
    /// Solve `self * x = b` for a triangular `self`.
    ///
    /// In other words, find the coefficients that express `b` as a linear
    /// combination of the columns of `self`.  The output has the same shape
    /// as `b`, which is read and written through flat indices (so a column
    /// vector and a row vector are equally acceptable).
    ///
    /// Lower triangular matrices are solved by forward substitution and upper
    /// triangular ones by back substitution (a diagonal matrix counts as
    /// lower).  No pivoting is performed.
    ///
    /// # Panics
    ///
    /// Panics if `b` doesn't have exactly one element per column of `self`.
    pub fn span(&self, b: &Dense<T, 2>) -> Result<Dense<T, 2>, SolveError> {
        let (rows, columns) = (self.rows(), self.columns());
        assert_eq!(
            b.size(), columns,
            "right hand side has {} elements, but the matrix has {} columns", b.size(), columns,
        );
        if rows != columns {
            return Err(SolveError::NotSquare { rows, columns });
        }

        let mut x = b.clone();
        if self.is_lower_triangular() {
            trace!("span: forward substitution, n = {}", columns);
            for i in 0..columns {
                let mut acc = x.at(i);
                for j in 0..i {
                    acc -= *self.get([i, j]) * x.at(j);
                }
                x.set(i, acc / self.pivot(i)?);
            }
            Ok(x)
        } else if self.is_upper_triangular() {
            trace!("span: back substitution, n = {}", columns);
            for i in (0..columns).rev() {
                let mut acc = x.at(i);
                for j in i + 1..columns {
                    acc -= *self.get([i, j]) * x.at(j);
                }
                x.set(i, acc / self.pivot(i)?);
            }
            Ok(x)
        } else {
            Err(SolveError::NotTriangular { rows, columns })
        }
    }

    fn pivot(&self, i: usize) -> Result<T, SolveError> {
        match *self.get([i, i]) {
            p if p == T::zero() => Err(SolveError::Singular { pivot: i }),
            p => Ok(p),
        }
    }
}
