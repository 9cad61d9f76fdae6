/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Strided dense storage.

use crate::expr::{Expr, Operand};
use crate::storage::Storage;
use crate::traits::{Element, Ring};

use std::ops::{AddAssign, SubAssign, MulAssign, DivAssign};

/// A flat, row-major buffer with per-dimension strides.
///
/// The shape reported by `shape()` is always the *logical* shape, i.e. it
/// takes the weak-transpose flag into account.  Flat indices (`at`, `set`)
/// are likewise logical and row-major; they coincide with buffer positions
/// unless the container has been weakly transposed.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<T, const N: usize> {
    // invariant: data.len() == product of shape (1 for rank 0), except for
    //            the scalar-sized placeholder, which holds one element
    data: Vec<T>,
    shape: [usize; N],
    // computed once from the storage order sizes; never touched by `transpose`
    strides: [usize; N],
    transposed: bool,
}

/// `stride[d]` is the product of the sizes of all dimensions after `d`.
fn compute_strides<const N: usize>(shape: &[usize; N]) -> [usize; N] {
    let mut strides = [1; N];
    for d in (0..N.saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * shape[d + 1];
    }
    strides
}

/// Row-major coordinates of a flat index.
#[inline]
fn unravel<const N: usize>(shape: &[usize; N], mut index: usize) -> [usize; N] {
    let mut coords = [0; N];
    for d in (0..N).rev() {
        let len = shape[d].max(1);
        coords[d] = index % len;
        index /= len;
    }
    coords
}

impl<T: Element, const N: usize> Dense<T, N> {
    /// Zero-filled container with the given sizes.
    pub fn new(shape: [usize; N]) -> Self {
        let len = shape.iter().product();
        Dense::from_vec(shape, vec![T::zero(); len])
    }

    /// A container with every size zero and room for exactly one element,
    /// usable as a scalar placeholder.
    pub fn scalar_sized() -> Self {
        let shape = [0; N];
        Dense {
            data: vec![T::zero()],
            strides: compute_strides(&shape),
            shape,
            transposed: false,
        }
    }

    /// Wrap row-major data.
    ///
    /// Panics if the length of `data` doesn't match the shape.
    pub fn from_vec(shape: [usize; N], data: Vec<T>) -> Self {
        assert_eq!(
            data.len(), shape.iter().product::<usize>(),
            "data of length {} cannot have shape {:?}", data.len(), shape,
        );
        Dense {
            data,
            strides: compute_strides(&shape),
            shape,
            transposed: false,
        }
    }

    /// Construct from a function of the coordinates.
    pub fn from_fn<F>(shape: [usize; N], mut f: F) -> Self
    where F: FnMut([usize; N]) -> T,
    {
        let len = shape.iter().product();
        let data = (0..len).map(|index| f(unravel(&shape, index))).collect();
        Dense::from_vec(shape, data)
    }

    pub fn as_slice(&self) -> &[T] { &self.data }

    pub fn into_vec(self) -> Vec<T> { self.data }

    pub fn strides(&self) -> &[usize; N] { &self.strides }

    pub fn is_transposed(&self) -> bool { self.transposed }

    /// Logical coordinates of a flat logical index.
    #[inline]
    pub(crate) fn coords_of(&self, index: usize) -> [usize; N] { unravel(&self.shape, index) }

    /// Buffer position of logical coordinates.
    #[inline]
    pub fn position(&self, coords: [usize; N]) -> usize {
        for d in 0..N {
            debug_assert!(
                coords[d] < self.shape[d].max(1),
                "coordinates {:?} out of range for shape {:?}", coords, self.shape,
            );
        }
        match self.transposed {
            false => coords.iter().zip(&self.strides).map(|(c, s)| c * s).sum(),
            true => coords.iter().rev().zip(&self.strides).map(|(c, s)| c * s).sum(),
        }
    }

    #[inline]
    fn buffer_index(&self, index: usize) -> usize {
        // unravelling wraps on the leading dimension, so check up front
        assert!(
            index < self.data.len(),
            "flat index {} out of range for shape {:?}", index, self.shape,
        );
        match self.transposed {
            false => index,
            true => self.position(self.coords_of(index)),
        }
    }

    /// Mutable element at a flat logical index.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        let pos = self.buffer_index(index);
        &mut self.data[pos]
    }

    /// Multiplicative inverse of each element, in place.
    pub fn reciprocals(&mut self) -> &mut Self {
        for x in &mut self.data {
            *x = T::one() / *x;
        }
        self
    }
}

impl<T: Ring, const N: usize> Dense<T, N> {
    /// Additive inverse of each element, in place.
    pub fn negate(&mut self) -> &mut Self {
        for x in &mut self.data {
            *x = -*x;
        }
        self
    }
}

impl<T: Element> Dense<T, 2> {
    pub fn rows(&self) -> usize { self.shape[0] }

    pub fn columns(&self) -> usize { self.shape[1] }

    /// Weak transpose.
    ///
    /// Flips how coordinates are mapped onto the buffer without moving any
    /// data, so this is O(1).  See `strong_transpose` for the version that
    /// actually permutes the buffer.
    pub fn transpose(&mut self) {
        self.transposed = !self.transposed;
        self.shape.swap(0, 1);
    }

    /// Overwrite `self` with the matrix product `a * b`.
    ///
    /// Panics unless `a` is `r x k`, `b` is `k x c`, and `self` is `r x c`.
    pub fn multiply_into<A, B>(&mut self, a: &A, b: &B)
    where
        A: Storage<2, Elem = T>,
        B: Storage<2, Elem = T>,
    {
        let (rows, inner, columns) = (a.size_along(0), a.size_along(1), b.size_along(1));
        assert_eq!(inner, b.size_along(0), "inner dimensions differ in matrix product");
        assert_eq!(self.shape, [rows, columns], "product written into a matrix of the wrong shape");

        for i in 0..rows {
            for j in 0..columns {
                let mut acc = T::zero();
                for k in 0..inner {
                    acc += *a.get([i, k]) * *b.get([k, j]);
                }
                *self.get_mut([i, j]) = acc;
            }
        }
    }
}

// ---------------------------------------------------------------------------

impl<T: Element, const N: usize> Expr for Dense<T, N> {
    type Elem = T;

    #[inline(always)]
    fn at(&self, index: usize) -> T { self.data[self.buffer_index(index)] }

    #[inline(always)]
    fn size(&self) -> usize { self.data.len() }

    #[inline(always)]
    fn shape(&self) -> &[usize] { &self.shape }
}

impl<'a, T: Element + 'a, const N: usize> Operand<'a> for Dense<T, N> {
    type Ref = &'a Dense<T, N>;

    #[inline(always)]
    fn as_operand(&'a self) -> Self::Ref { self }
}

impl<T: Element, const N: usize> Storage<N> for Dense<T, N> {
    fn zeroed(shape: [usize; N]) -> Self { Dense::new(shape) }

    #[inline(always)]
    fn get(&self, coords: [usize; N]) -> &T { &self.data[self.position(coords)] }

    #[inline(always)]
    fn get_mut(&mut self, coords: [usize; N]) -> &mut T {
        let pos = self.position(coords);
        &mut self.data[pos]
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: T) { *self.at_mut(index) = value; }

    fn zip_assign<E, F>(&mut self, other: &E, mut f: F)
    where
        E: Expr<Elem = T>,
        F: FnMut(T, T) -> T,
    {
        assert_eq!(self.size(), other.size(), "size mismatch in elementwise assignment");
        if self.transposed {
            for index in 0..self.size() {
                let pos = self.buffer_index(index);
                self.data[pos] = f(self.data[pos], other.at(index));
            }
        } else {
            for (index, x) in self.data.iter_mut().enumerate() {
                *x = f(*x, other.at(index));
            }
        }
    }

    fn map_assign<F>(&mut self, mut f: F)
    where F: FnMut(T) -> T,
    {
        // order doesn't matter here, so the flag can be ignored
        for x in &mut self.data {
            *x = f(*x);
        }
    }
}

// ---------------------------------------------------------------------------
// compound assignment

macro_rules! impl_dense_assign_ops {
    ($( $Trait:ident $method:ident $op:tt; )+) => {$(
        // container op= container
        impl<'b, T: Element, const N: usize> $Trait<&'b Dense<T, N>> for Dense<T, N> {
            #[inline]
            fn $method(&mut self, other: &'b Dense<T, N>)
            { self.zip_assign(other, |a, b| a $op b) }
        }
    )+};
}

impl_dense_assign_ops!{
    AddAssign add_assign +;
    SubAssign sub_assign -;
    MulAssign mul_assign *;
    DivAssign div_assign /;
}

// container op= scalar
//
// One impl per element type; a blanket `impl<T> MulAssign<T>` would be at
// odds with the container-container impls above.
macro_rules! impl_dense_scalar_assign_ops {
    ($T:ty) => {
        impl<const N: usize> AddAssign<$T> for Dense<$T, N> {
            #[inline]
            fn add_assign(&mut self, s: $T) { self.map_assign(|x| x + s) }
        }

        impl<const N: usize> SubAssign<$T> for Dense<$T, N> {
            #[inline]
            fn sub_assign(&mut self, s: $T) { self.map_assign(|x| x - s) }
        }

        impl<const N: usize> MulAssign<$T> for Dense<$T, N> {
            #[inline]
            fn mul_assign(&mut self, s: $T) { self.map_assign(|x| x * s) }
        }

        impl<const N: usize> DivAssign<$T> for Dense<$T, N> {
            #[inline]
            fn div_assign(&mut self, s: $T) { self.map_assign(|x| x / s) }
        }
    };
}

for_each_element!{impl_dense_scalar_assign_ops}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_are_row_major() {
        let m = Dense::<f64, 3>::new([2, 3, 4]);
        assert_eq!(m.strides(), &[12, 4, 1]);
        assert_eq!(m.size(), 24);
        assert_eq!(m.position([1, 2, 3]), 12 + 8 + 3);

        let v = Dense::<f64, 1>::new([5]);
        assert_eq!(v.strides(), &[1]);
    }

    #[test]
    fn degenerate_sizes_hold_one_element() {
        let scalar = Dense::<f64, 0>::new([]);
        assert_eq!(scalar.size(), 1);
        assert_eq!(scalar.shape(), &[] as &[usize]);

        let placeholder = Dense::<f64, 2>::scalar_sized();
        assert_eq!(placeholder.size(), 1);
        assert_eq!(placeholder.shape(), &[0, 0]);
        assert_eq!(*placeholder.get([0, 0]), 0.0);
    }

    #[test]
    fn from_fn_visits_coordinates() {
        let m = Dense::<i32, 2>::from_fn([2, 3], |[i, j]| (10 * i + j) as i32);
        assert_eq!(m.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(*m.get([1, 2]), 12);
    }

    #[test]
    #[should_panic(expected = "cannot have shape")]
    fn from_vec_checks_length() {
        let _ = Dense::<f64, 2>::from_vec([2, 2], vec![1.0; 3]);
    }

    #[test]
    fn weak_transpose_maps_coordinates() {
        let mut m = Dense::<i32, 2>::from_fn([2, 3], |[i, j]| (10 * i + j) as i32);
        let before = m.clone();
        m.transpose();

        assert_eq!(m.shape(), &[3, 2]);
        assert_eq!(m.as_slice(), before.as_slice());
        for i in 0..3 {
            for j in 0..2 {
                assert_eq!(m.get([i, j]), before.get([j, i]));
            }
        }
        // flat indices follow the logical layout
        let flat: Vec<_> = (0..m.size()).map(|i| m.at(i)).collect();
        assert_eq!(flat, vec![0, 10, 1, 11, 2, 12]);

        m.transpose();
        assert_eq!(m, before);
    }

    fn transposed_3x3() -> Dense<i32, 2> {
        let mut m = Dense::from_vec([3, 3], (1..=9).collect());
        m.transpose();
        m
    }

    #[test]
    #[should_panic(expected = "flat index 9 out of range")]
    fn transposed_read_past_the_end() {
        let _ = transposed_3x3().at(9);
    }

    #[test]
    #[should_panic(expected = "flat index 9 out of range")]
    fn transposed_write_past_the_end() {
        transposed_3x3().set(9, 100);
    }

    #[test]
    fn in_place_unary_ops() {
        let mut m = Dense::<f64, 1>::from_vec([3], vec![1.0, -2.0, 4.0]);
        m.negate().reciprocals();
        assert_eq!(m.as_slice(), &[-1.0, 0.5, -0.25]);
    }

    #[test]
    fn compound_assignment() {
        let mut a = Dense::<f64, 2>::from_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let b = Dense::<f64, 2>::from_vec([2, 2], vec![1.0, 1.0, 2.0, 2.0]);

        a += &b;
        assert_eq!(a.as_slice(), &[2.0, 3.0, 5.0, 6.0]);
        a -= &b;
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        a *= &b;
        assert_eq!(a.as_slice(), &[1.0, 2.0, 6.0, 8.0]);
        a /= &b;
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        // multiplies; it does not add
        a *= 3.0;
        assert_eq!(a.as_slice(), &[3.0, 6.0, 9.0, 12.0]);
        a /= 3.0;
        a += 1.0;
        a -= 2.0;
        assert_eq!(a.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn compound_assignment_respects_transposition() {
        let mut a = Dense::<i32, 2>::from_vec([2, 2], vec![1, 2, 3, 4]);
        a.transpose();
        let b = Dense::<i32, 2>::from_vec([2, 2], vec![10, 20, 30, 40]);
        a += &b;
        assert_eq!(*a.get([0, 1]), 3 + 20);
        assert_eq!(*a.get([1, 0]), 2 + 30);
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn compound_assignment_checks_size() {
        let mut a = Dense::<f64, 1>::new([3]);
        a += &Dense::<f64, 1>::new([4]);
    }

    #[test]
    fn multiply_into() {
        let a = Dense::<i32, 2>::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]);
        let b = Dense::<i32, 2>::from_vec([3, 2], vec![1, 1, 1, -1, 0, 1]);
        let mut c = Dense::<i32, 2>::new([2, 2]);
        c.multiply_into(&a, &b);
        assert_eq!(c.as_slice(), &[3, 2, 9, 5]);
    }
}
