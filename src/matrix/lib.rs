/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Lazily-evaluated dense and sparse matrices.
//!
//! Arithmetic between matrices (and between matrices and scalars) builds an
//! expression tree instead of computing anything.  The tree is evaluated one
//! element at a time when it is assigned into a concrete matrix, so that
//! `c.assign(5.0 * &a + &b / &b)` makes a single pass with no temporaries.
//!
//! ```
//! use lazymat_matrix::{Matrix, Vector};
//!
//! let a = Matrix::<f64, 2>::from_fn([3, 3], |[i, j]| (1 + i + 2 * j) as f64);
//! let b = Vector::<f64>::from_vec([3, 1], vec![1.0, 2.0, 3.0]);
//!
//! let mut c = Vector::<f64>::new([3, 1]);
//! c.assign(2.0 * &b + &a.multiply(&b));
//! assert_eq!(c.to_string(), "24\n32\n40\n");
//! ```

#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate lazymat_assert_close;

#[macro_use]
mod traits;
mod expr;
mod storage;
mod dense;
mod transpose;
mod solve;
mod sparse;
mod matrix;
mod ops;
mod display;
mod check_close;

pub use crate::traits::{Element, Ring, Field};
pub use crate::expr::{Expr, Lazy, Operand, Scalar};
pub use crate::expr::{Addition, Subtraction, Multiplication, Division};
pub use crate::storage::Storage;
pub use crate::dense::Dense;
pub use crate::sparse::Csr;
pub use crate::transpose::BASE_BLOCK;
pub use crate::solve::SolveError;
pub use crate::matrix::{Matrix, Vector, SparseMatrix};
