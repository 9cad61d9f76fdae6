/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The user-facing matrix type.

use crate::dense::Dense;
use crate::expr::{Expr, is_scalar_leaf};
use crate::solve::SolveError;
use crate::sparse::Csr;
use crate::storage::Storage;
use crate::traits::{Element, Field, Ring};

use std::convert::TryFrom;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// A rank-`N` matrix of `T`, backed by the representation `R`.
///
/// `R` is either concrete storage (`Dense` by default, or `Csr`), in which
/// case the matrix holds realized data, or an expression node from the
/// `expr` module, in which case the matrix is a pending computation that
/// borrows from the matrices it was built from.
///
/// Arithmetic operators on matrices only ever build expressions.  They are
/// evaluated by `assign` (into existing storage) or `eval` (into new dense
/// storage):
///
/// ```
/// use lazymat_matrix::Matrix;
///
/// let a = Matrix::<f64, 2>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
/// let b = Matrix::<f64, 2>::from_rows(&[[4.0, 3.0], [2.0, 1.0]]);
///
/// let mut c = Matrix::<f64, 2>::new([2, 2]);
/// c.assign(5.0 * &a + &b / &b);
/// assert_eq!(c.as_slice(), &[6.0, 11.0, 16.0, 21.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T, const N: usize, R = Dense<T, N>> {
    rep: R,
    _elem: PhantomData<T>,
}

/// A column vector, i.e. an `n x 1` matrix.
pub type Vector<T = f64> = Matrix<T, 2>;

/// A rank-2 matrix backed by CSR storage.
pub type SparseMatrix<T = f64> = Matrix<T, 2, Csr<T>>;

impl<T, const N: usize, R> Matrix<T, N, R> {
    /// Wrap a representation.
    #[inline(always)]
    pub fn from_rep(rep: R) -> Self { Matrix { rep, _elem: PhantomData } }

    /// What the matrix currently represents.
    #[inline(always)]
    pub fn rep(&self) -> &R { &self.rep }

    #[inline(always)]
    pub fn rep_mut(&mut self) -> &mut R { &mut self.rep }

    pub fn into_rep(self) -> R { self.rep }

    #[inline(always)]
    pub fn dimension(&self) -> usize { N }
}

impl<T: Element, const N: usize, R: Expr<Elem = T>> Matrix<T, N, R> {
    #[inline]
    pub fn size(&self) -> usize { self.rep.size() }

    #[inline]
    pub fn shape(&self) -> &[usize] { self.rep.shape() }

    /// Value at a flat, row-major logical index.
    ///
    /// For an expression, this computes the one element.
    #[inline]
    pub fn at(&self, index: usize) -> T { self.rep.at(index) }

    /// Evaluate into a new dense matrix.
    pub fn eval(&self) -> Matrix<T, N> {
        let dense = match <[usize; N]>::try_from(self.shape()) {
            Ok(shape) if shape.iter().product::<usize>() == self.size() => Dense::new(shape),
            // scalars and scalar-sized placeholders
            _ => Dense::scalar_sized(),
        };
        let mut out = Matrix::from_rep(dense);
        out.assign(self);
        out
    }
}

impl<T: Element, R: Expr<Elem = T>> Matrix<T, 2, R> {
    pub fn rows(&self) -> usize { self.shape()[0] }

    pub fn columns(&self) -> usize { self.shape()[1] }
}

impl<T: Element, const N: usize, R: Storage<N, Elem = T>> Matrix<T, N, R> {
    /// Zero-filled matrix with the given sizes.
    pub fn new(shape: [usize; N]) -> Self { Matrix::from_rep(R::zeroed(shape)) }

    #[inline]
    pub fn size_along(&self, dim: usize) -> usize { self.rep.size_along(dim) }

    /// Write to a flat, row-major logical index.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) { self.rep.set(index, value) }

    /// Evaluate `source` into this matrix's storage.
    ///
    /// This is where lazy expressions actually get computed, one element at
    /// a time, with no intermediate storage.
    ///
    /// A source with a single element (a 1x1 matrix, or an expression made
    /// only of scalars) is broadcast to every element.  Otherwise, the shapes
    /// must be equal; this is checked before anything is written.
    ///
    /// An expression that borrows from `self` can't be assigned to `self`;
    /// `clone` the operand first.
    pub fn assign<E: Expr<Elem = T>>(&mut self, source: E) -> &mut Self {
        let broadcast = source.size() == 1 || is_scalar_leaf(&source);

        if broadcast {
            let value = source.at(0);
            for index in 0..self.rep.size() {
                self.rep.set(index, value);
            }
        } else {
            assert!(
                self.rep.shape() == source.shape(),
                "cannot assign an expression of shape {:?} to a matrix of shape {:?}",
                source.shape(), self.rep.shape(),
            );
            for index in 0..source.size() {
                self.rep.set(index, source.at(index));
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// dense-only functionality

impl<T: Element, const N: usize> Matrix<T, N> {
    /// A matrix whose sizes are all zero, holding a single element.
    pub fn scalar_sized() -> Self { Matrix::from_rep(Dense::scalar_sized()) }

    /// Wrap row-major data.
    pub fn from_vec(shape: [usize; N], data: Vec<T>) -> Self {
        Matrix::from_rep(Dense::from_vec(shape, data))
    }

    /// Construct from a function of the coordinates.
    pub fn from_fn<F>(shape: [usize; N], f: F) -> Self
    where F: FnMut([usize; N]) -> T,
    { Matrix::from_rep(Dense::from_fn(shape, f)) }

    /// The underlying buffer, in storage order.
    pub fn as_slice(&self) -> &[T] { self.rep.as_slice() }

    /// Multiplicative inverse of each element, in place.
    pub fn reciprocals(&mut self) -> &mut Self {
        self.rep.reciprocals();
        self
    }
}

impl<T: Ring, const N: usize> Matrix<T, N> {
    /// Additive inverse of each element, in place.
    pub fn negate(&mut self) -> &mut Self {
        self.rep.negate();
        self
    }
}

impl<T: Element> Matrix<T, 2> {
    /// Construct from a slice of rows.
    pub fn from_rows<const C: usize>(rows: &[[T; C]]) -> Self {
        Matrix::from_vec([rows.len(), C], rows.concat())
    }

    /// Weak transpose (O(1); no data is moved).
    pub fn transpose(&mut self) { self.rep.transpose() }

    /// Strong transpose (the buffer is actually permuted).
    pub fn strong_transpose(&mut self) { self.rep.strong_transpose() }

    pub fn is_lower_triangular(&self) -> bool { self.rep.is_lower_triangular() }

    pub fn is_upper_triangular(&self) -> bool { self.rep.is_upper_triangular() }
}

impl<T: Field> Matrix<T, 2> {
    /// Coefficients for a linear combination of the columns of `self` that
    /// produces `b`; i.e. the solution to `self * x = b`.
    ///
    /// `self` must be triangular.  See `Dense::span`.
    pub fn span(&self, b: &Matrix<T, 2>) -> Result<Matrix<T, 2>, SolveError> {
        self.rep.span(&b.rep).map(Matrix::from_rep)
    }
}

impl<T: Element, R: Storage<2, Elem = T>> Matrix<T, 2, R> {
    /// Matrix product.
    ///
    /// Unlike the arithmetic operators, this is computed eagerly into new
    /// dense storage.  Panics if the inner dimensions differ.
    pub fn multiply<R2>(&self, other: &Matrix<T, 2, R2>) -> Matrix<T, 2>
    where R2: Storage<2, Elem = T>,
    {
        let mut out = Dense::new([self.size_along(0), other.size_along(1)]);
        out.multiply_into(&self.rep, &other.rep);
        Matrix::from_rep(out)
    }
}

impl<T: Element> Matrix<T, 2, Csr<T>> {
    /// Number of explicitly stored entries.
    pub fn nnz(&self) -> usize { self.rep.nnz() }

    pub fn to_dense(&self) -> Matrix<T, 2> { Matrix::from_rep(self.rep.to_dense()) }
}

// ---------------------------------------------------------------------------

impl<T: Element, const N: usize, R: Expr<Elem = T>> Expr for Matrix<T, N, R> {
    type Elem = T;

    #[inline(always)]
    fn at(&self, index: usize) -> T { self.rep.at(index) }

    #[inline(always)]
    fn size(&self) -> usize { self.rep.size() }

    #[inline(always)]
    fn shape(&self) -> &[usize] { self.rep.shape() }
}

impl<T: Element, const N: usize, R: Storage<N, Elem = T>> Index<[usize; N]> for Matrix<T, N, R> {
    type Output = T;

    #[inline(always)]
    fn index(&self, coords: [usize; N]) -> &T { self.rep.get(coords) }
}

impl<T: Element, const N: usize, R: Storage<N, Elem = T>> IndexMut<[usize; N]> for Matrix<T, N, R> {
    #[inline(always)]
    fn index_mut(&mut self, coords: [usize; N]) -> &mut T { self.rep.get_mut(coords) }
}
