/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Lazily-evaluated expression trees.
//!
//! Arithmetic on matrices doesn't compute anything; it builds one of the node
//! types in this module (`Addition`, `Subtraction`, `Multiplication`,
//! `Division`), each of which holds its two operands and knows how to produce
//! a single element on demand.  Since the nodes are generic over their
//! operands, a whole expression like `5.0 * &a + &b / &c` is a single
//! concrete type, and evaluating element `i` of it is just a chain of
//! inlined calls.
//!
//! Nothing is evaluated until `Matrix::assign` (or `Matrix::eval`) pulls
//! values out of the tree one index at a time.

use crate::traits::Element;

/// The read contract shared by every representation of a matrix:
/// concrete storage, scalar leaves, and expression nodes.
pub trait Expr {
    type Elem: Element;

    /// Value at a flat, row-major logical index.
    fn at(&self, index: usize) -> Self::Elem;

    /// Number of elements.
    ///
    /// Scalar leaves report 0, which is how binary nodes tell them apart
    /// from a real operand.
    fn size(&self) -> usize;

    /// Sizes along each dimension.  Empty for scalar leaves.
    fn shape(&self) -> &[usize];
}

impl<'a, E: Expr + ?Sized> Expr for &'a E {
    type Elem = E::Elem;

    #[inline(always)]
    fn at(&self, index: usize) -> Self::Elem { (**self).at(index) }

    #[inline(always)]
    fn size(&self) -> usize { (**self).size() }

    #[inline(always)]
    fn shape(&self) -> &[usize] { (**self).shape() }
}

/// Decides how an expression node holds onto an operand of this type.
///
/// Containers and nested expressions are borrowed, so that building a node
/// never copies element data.  Scalar leaves are tiny and are stored by
/// value, which is what lets `2.0 * &m` work without a scalar living
/// anywhere else.
///
/// The lifetime ties the node to its operands; the borrow checker then
/// refuses to let an expression outlive (or observe mutation of) any
/// container it reads from.
pub trait Operand<'a>: Expr {
    type Ref: Expr<Elem = Self::Elem> + 'a;

    fn as_operand(&'a self) -> Self::Ref;
}

/// Representations that own no element data: scalar leaves and expression
/// nodes.
///
/// Operators only take these by value; containers are always borrowed.
pub trait Lazy: Expr { }

// ---------------------------------------------------------------------------

/// A single value broadcast over any shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scalar<T>(T);

impl<T: Element> Scalar<T> {
    pub fn new(value: T) -> Self { Scalar(value) }

    pub fn value(&self) -> T { self.0 }
}

impl<T: Element> Expr for Scalar<T> {
    type Elem = T;

    #[inline(always)]
    fn at(&self, _index: usize) -> T { self.0 }

    #[inline(always)]
    fn size(&self) -> usize { 0 }

    #[inline(always)]
    fn shape(&self) -> &[usize] { &[] }
}

impl<T: Element> Lazy for Scalar<T> { }

impl<'a, T: Element + 'a> Operand<'a> for Scalar<T> {
    type Ref = Scalar<T>;

    #[inline(always)]
    fn as_operand(&'a self) -> Scalar<T> { *self }
}

// ---------------------------------------------------------------------------

/// Whether an expression is built only from scalars.
///
/// An empty matrix also has size 0, but it still has a shape.
#[inline(always)]
pub(crate) fn is_scalar_leaf<E: Expr>(e: &E) -> bool {
    e.size() == 0 && e.shape().is_empty()
}

/// Panics unless the operands can be combined elementwise.
///
/// Scalar leaves combine with anything.
#[inline]
fn check_operand_shapes<A: Expr, B: Expr>(op: &str, lhs: &A, rhs: &B) {
    if !is_scalar_leaf(lhs) && !is_scalar_leaf(rhs) {
        assert!(
            lhs.shape() == rhs.shape(),
            "shape mismatch in {}: {:?} vs {:?}", op, lhs.shape(), rhs.shape(),
        );
    }
}

macro_rules! binary_nodes {
    ($(
        $(#[$meta:meta])*
        $Node:ident, $symbol:tt, $name:expr;
    )+) => {$(
        $(#[$meta])*
        #[derive(Debug, Copy, Clone)]
        pub struct $Node<A, B> {
            lhs: A,
            rhs: B,
        }

        impl<A, B> $Node<A, B>
        where
            A: Expr,
            B: Expr<Elem = A::Elem>,
        {
            /// Panics if both operands are matrices and their shapes differ.
            pub fn new(lhs: A, rhs: B) -> Self {
                check_operand_shapes($name, &lhs, &rhs);
                $Node { lhs, rhs }
            }

            pub fn lhs(&self) -> &A { &self.lhs }
            pub fn rhs(&self) -> &B { &self.rhs }
        }

        impl<A, B> Expr for $Node<A, B>
        where
            A: Expr,
            B: Expr<Elem = A::Elem>,
        {
            type Elem = A::Elem;

            #[inline(always)]
            fn at(&self, index: usize) -> A::Elem
            { self.lhs.at(index) $symbol self.rhs.at(index) }

            #[inline(always)]
            fn size(&self) -> usize {
                match is_scalar_leaf(&self.lhs) {
                    true => self.rhs.size(),
                    false => self.lhs.size(),
                }
            }

            #[inline(always)]
            fn shape(&self) -> &[usize] {
                match is_scalar_leaf(&self.lhs) {
                    true => self.rhs.shape(),
                    false => self.lhs.shape(),
                }
            }
        }

        impl<A, B> Lazy for $Node<A, B>
        where
            A: Expr,
            B: Expr<Elem = A::Elem>,
        { }

        impl<'a, A, B> Operand<'a> for $Node<A, B>
        where
            A: Expr + 'a,
            B: Expr<Elem = A::Elem> + 'a,
        {
            type Ref = &'a $Node<A, B>;

            #[inline(always)]
            fn as_operand(&'a self) -> Self::Ref { self }
        }
    )+};
}

binary_nodes!{
    /// Lazy elementwise sum.
    Addition, +, "addition";
    /// Lazy elementwise difference.
    Subtraction, -, "subtraction";
    /// Lazy elementwise (Hadamard) product.
    ///
    /// This is not the matrix product; see `Matrix::multiply` for that.
    Multiplication, *, "multiplication";
    /// Lazy elementwise quotient.
    Division, /, "division";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dense;

    fn dense(shape: [usize; 2], data: Vec<f64>) -> Dense<f64, 2> {
        Dense::from_vec(shape, data)
    }

    #[test]
    fn scalar_is_degenerate() {
        let s = Scalar::new(2.5);
        assert_eq!(s.size(), 0);
        assert_eq!(s.shape(), &[] as &[usize]);
        assert_eq!(s.at(0), 2.5);
        assert_eq!(s.at(1000), 2.5);
    }

    #[test]
    fn nodes_combine_elementwise() {
        let a = dense([2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let b = dense([2, 2], vec![4.0, 3.0, 2.0, 1.0]);

        let sum = Addition::new(&a, &b);
        let diff = Subtraction::new(&a, &b);
        let prod = Multiplication::new(&a, &b);
        let quot = Division::new(&a, &b);
        for i in 0..4 {
            assert_eq!(sum.at(i), a.at(i) + b.at(i));
            assert_eq!(diff.at(i), a.at(i) - b.at(i));
            assert_eq!(prod.at(i), a.at(i) * b.at(i));
            assert_eq!(quot.at(i), a.at(i) / b.at(i));
        }
        assert_eq!(sum.size(), 4);
        assert_eq!(sum.shape(), &[2, 2]);
    }

    #[test]
    fn scalar_never_masks_shape() {
        let a = dense([3, 1], vec![1.0, 2.0, 3.0]);

        let left = Multiplication::new(Scalar::new(2.0), &a);
        assert_eq!(left.size(), 3);
        assert_eq!(left.shape(), &[3, 1]);

        let right = Addition::new(&a, Scalar::new(2.0));
        assert_eq!(right.size(), 3);
        assert_eq!(right.shape(), &[3, 1]);
        assert_eq!(right.at(2), 5.0);
    }

    #[test]
    fn empty_matrix_keeps_its_shape() {
        let z = dense([0, 3], vec![]);
        let left = Addition::new(&z, Scalar::new(1.0));
        assert_eq!(left.size(), 0);
        assert_eq!(left.shape(), &[0, 3]);

        let right = Multiplication::new(Scalar::new(2.0), &z);
        assert_eq!(right.shape(), &[0, 3]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch in subtraction")]
    fn empty_matrices_still_check_shapes() {
        let a = dense([0, 3], vec![]);
        let b = dense([3, 0], vec![]);
        let _ = Subtraction::new(&a, &b);
    }

    #[test]
    fn nested_nodes_borrow_their_children() {
        let a = dense([1, 2], vec![1.0, 2.0]);
        let inner = Addition::new(&a, &a);
        let outer = Subtraction::new(inner.as_operand(), Scalar::new(1.0));
        assert_eq!(outer.at(0), 1.0);
        assert_eq!(outer.at(1), 3.0);
    }

    #[test]
    #[should_panic(expected = "shape mismatch in addition")]
    fn mismatched_shapes_panic_on_construction() {
        let a = dense([2, 2], vec![0.0; 4]);
        let b = dense([4, 1], vec![0.0; 4]);
        let _ = Addition::new(&a, &b);
    }
}
