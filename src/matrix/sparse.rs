/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Compressed Sparse Row (CSR) storage.
//!
//! An alternative rank-2 representation for a `Matrix`.  It satisfies the
//! same read/shape/coordinate contract as `Dense`, so it can be used as an
//! operand in expressions, rendered, assigned into, and multiplied; it does
//! not support transposition.

use crate::dense::Dense;
use crate::expr::{Expr, Operand};
use crate::storage::Storage;
use crate::traits::{Element, Ring};

/// A matrix in Compressed Sparse Row format.
#[derive(Debug, Clone, PartialEq)]
pub struct Csr<T> {
    shape: [usize; 2],
    val: Vec<T>,
    idx: Vec<usize>,
    ptr: Vec<usize>, // "insertion indices" between rows
    // handed out by reference for positions that aren't stored
    zero: T,
}

// Class invariants.  `always` checks them in release builds too.
macro_rules! validate_csr {
    (always, $csr:expr) => { validate_csr!([assert], $csr) };
    (debug, $csr:expr) => { validate_csr!([debug_assert], $csr) };
    ([$assert:ident], $csr:expr) => {{
        let csr = $csr;
        {
            let Csr { ref shape, ref val, ref idx, ref ptr, .. } = csr;

            // ptr is a sorted list of endpoints, of length nrows + 1
            $assert!(ptr.len() == shape[0] + 1, "CSR row pointer has the wrong length");
            $assert!(ptr[0] == 0 && ptr[shape[0]] == idx.len(), "CSR row pointer has bad endpoints");
            $assert!(ptr.windows(2).all(|w| w[0] <= w[1]), "CSR row pointer is not sorted");

            // idx is a concatenation of strictly sorted lists whose endpoints are in ptr
            $assert!(idx.len() == val.len(), "CSR columns and values differ in length");
            $assert!(
                ptr.windows(2).all(|w| idx[w[0]..w[1]].windows(2).all(|c| c[0] < c[1])),
                "CSR column indices within a row are not strictly sorted",
            );
            $assert!(idx.iter().all(|&c| c < shape[1]), "CSR column index out of range");
        }
        csr
    }};
}

impl<T: Element> Csr<T> {
    /// An empty (all zero) matrix.
    pub fn new(rows: usize, columns: usize) -> Self {
        Csr {
            shape: [rows, columns],
            val: vec![],
            idx: vec![],
            ptr: vec![0; rows + 1],
            zero: T::zero(),
        }
    }

    /// Build from an iterator of `([row, col], value)`.
    ///
    /// The iterator must be sorted by row then column, must not name any
    /// position twice, and must stay within `[rows, columns]`.
    /// This is validated, with panics on failure.
    pub fn from_row_major_iter<I>(shape: [usize; 2], iter: I) -> Self
    where I: IntoIterator<Item = ([usize; 2], T)>,
    {
        let iter = iter.into_iter();
        let cap = iter.size_hint().0;
        let mut val = Vec::with_capacity(cap);
        let mut idx = Vec::with_capacity(cap);
        let mut ptr = Vec::with_capacity(shape[0] + 1);
        ptr.push(0); // beginning index of first row

        for ([row, col], x) in iter {
            assert!(row < shape[0], "CSR row index out of range");
            assert!(row + 1 >= ptr.len(), "CSR rows are not sorted");
            // terminate the previous row and add any empty rows, if necessary
            while ptr.len() <= row {
                ptr.push(idx.len());
            }
            idx.push(col);
            val.push(x);
        }

        // terminate the last filled row and add empty rows to end
        while ptr.len() <= shape[0] {
            ptr.push(idx.len());
        }

        validate_csr!(always, Csr { shape, val, idx, ptr, zero: T::zero() })
    }

    pub fn rows(&self) -> usize { self.shape[0] }

    pub fn columns(&self) -> usize { self.shape[1] }

    /// Number of explicitly stored entries.
    pub fn nnz(&self) -> usize { self.val.len() }

    /// Iterate over the explicitly stored entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 2], T)> + '_ {
        (0..self.rows()).flat_map(move |row| {
            let range = self.ptr[row]..self.ptr[row + 1];
            self.idx[range.clone()].iter()
                .zip(&self.val[range])
                .map(move |(&col, &x)| ([row, col], x))
        })
    }

    pub fn to_dense(&self) -> Dense<T, 2> {
        let mut out = Dense::new(self.shape);
        for (coords, x) in self.iter() {
            *out.get_mut(coords) = x;
        }
        out
    }

    /// Where column `col` of `row` lives in `idx`/`val`, or where it
    /// would need to be inserted.
    #[inline]
    fn locate(&self, [row, col]: [usize; 2]) -> Result<usize, usize> {
        assert!(
            row < self.shape[0] && col < self.shape[1],
            "coordinates {:?} out of range for shape {:?}", [row, col], self.shape,
        );
        let start = self.ptr[row];
        match self.idx[start..self.ptr[row + 1]].binary_search(&col) {
            Ok(k) => Ok(start + k),
            Err(k) => Err(start + k),
        }
    }

    /// Stored entry at the given position, inserting a zero if absent.
    fn entry(&mut self, coords: [usize; 2]) -> &mut T {
        let k = match self.locate(coords) {
            Ok(k) => k,
            Err(k) => {
                trace!("CSR insertion at {:?} (nnz = {})", coords, self.nnz() + 1);
                self.idx.insert(k, coords[1]);
                self.val.insert(k, T::zero());
                for p in &mut self.ptr[coords[0] + 1..] {
                    *p += 1;
                }
                validate_csr!(debug, &*self);
                k
            },
        };
        &mut self.val[k]
    }

    #[inline]
    fn unravel(&self, index: usize) -> [usize; 2] {
        let columns = self.shape[1].max(1);
        [index / columns, index % columns]
    }
}

impl<T: Ring> Csr<T> {
    /// Additive inverse of each stored element, in place.
    pub fn negate(&mut self) -> &mut Self {
        for x in &mut self.val {
            *x = -*x;
        }
        self
    }
}

impl<T: Element> Expr for Csr<T> {
    type Elem = T;

    #[inline]
    fn at(&self, index: usize) -> T { *self.get(self.unravel(index)) }

    #[inline]
    fn size(&self) -> usize { self.shape[0] * self.shape[1] }

    #[inline]
    fn shape(&self) -> &[usize] { &self.shape }
}

impl<'a, T: Element + 'a> Operand<'a> for Csr<T> {
    type Ref = &'a Csr<T>;

    #[inline(always)]
    fn as_operand(&'a self) -> Self::Ref { self }
}

impl<T: Element> Storage<2> for Csr<T> {
    fn zeroed([rows, columns]: [usize; 2]) -> Self { Csr::new(rows, columns) }

    #[inline]
    fn get(&self, coords: [usize; 2]) -> &T {
        match self.locate(coords) {
            Ok(k) => &self.val[k],
            Err(_) => &self.zero,
        }
    }

    fn get_mut(&mut self, coords: [usize; 2]) -> &mut T { self.entry(coords) }

    /// Zeros are only written over existing entries; they never create one.
    fn set(&mut self, index: usize, value: T) {
        let coords = self.unravel(index);
        match self.locate(coords) {
            Ok(k) => self.val[k] = value,
            Err(_) if value == T::zero() => {},
            Err(_) => *self.entry(coords) = value,
        }
    }
}
