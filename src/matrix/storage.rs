/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::expr::Expr;

/// Concrete, writable representations of a rank-`N` matrix.
///
/// This is what a `Matrix` must be backed by in order to be constructed
/// from sizes, indexed by coordinates, or assigned into.  `Dense` is the
/// workhorse; `Csr` is the sparse alternative.
pub trait Storage<const N: usize>: Expr + Sized {
    /// A zero-filled container with the given sizes.
    fn zeroed(shape: [usize; N]) -> Self;

    /// Element at the given coordinates.
    ///
    /// Panics if the coordinates are out of range.
    fn get(&self, coords: [usize; N]) -> &Self::Elem;

    /// Mutable element at the given coordinates.
    ///
    /// Panics if the coordinates are out of range.
    fn get_mut(&mut self, coords: [usize; N]) -> &mut Self::Elem;

    /// Write to a flat, row-major logical index.
    fn set(&mut self, index: usize, value: Self::Elem);

    #[inline]
    fn dimension(&self) -> usize { N }

    #[inline]
    fn size_along(&self, dim: usize) -> usize { self.shape()[dim] }

    /// `self[i] = f(self[i], other[i])` for every index.
    ///
    /// Panics unless both sides have the same number of elements.
    fn zip_assign<E, F>(&mut self, other: &E, mut f: F)
    where
        E: Expr<Elem = Self::Elem>,
        F: FnMut(Self::Elem, Self::Elem) -> Self::Elem,
    {
        assert_eq!(self.size(), other.size(), "size mismatch in elementwise assignment");
        for index in 0..self.size() {
            let value = f(self.at(index), other.at(index));
            self.set(index, value);
        }
    }

    /// `self[i] = f(self[i])` for every index.
    fn map_assign<F>(&mut self, mut f: F)
    where F: FnMut(Self::Elem) -> Self::Elem,
    {
        for index in 0..self.size() {
            let value = f(self.at(index));
            self.set(index, value);
        }
    }
}
