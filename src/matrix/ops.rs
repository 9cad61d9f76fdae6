/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Operator impls for `Matrix`.
//!
//! Binary arithmetic builds expression nodes and never computes anything.
//! Borrowed operands are held by reference (via `Operand`).  Only matrices
//! that own no data (expressions and scalars; see `Lazy`) can be taken by
//! value, in which case they are moved into the new node.
//!
//! Compound assignment, on the other hand, is eager and in place.

use crate::expr::{Expr, Lazy, Operand, Scalar};
use crate::expr::{Addition, Subtraction, Multiplication, Division};
use crate::matrix::Matrix;
use crate::storage::Storage;
use crate::traits::{Element, Ring};

use std::ops::{Add, Sub, Mul, Div, Neg};
use std::ops::{AddAssign, SubAssign, MulAssign, DivAssign};

macro_rules! impl_binary_ops {
    ($( $Trait:ident $method:ident $Node:ident; )+) => {$(
        // &matrix op &matrix
        impl<'a, 'b, T, const N: usize, R1, R2> $Trait<&'b Matrix<T, N, R2>> for &'a Matrix<T, N, R1>
        where
            T: Element,
            R1: Operand<'a, Elem = T>,
            R2: Operand<'b, Elem = T>,
        {
            type Output = Matrix<T, N, $Node<R1::Ref, R2::Ref>>;

            #[inline]
            fn $method(self, other: &'b Matrix<T, N, R2>) -> Self::Output {
                Matrix::from_rep($Node::new(self.rep().as_operand(), other.rep().as_operand()))
            }
        }

        // matrix op matrix
        impl<T, const N: usize, R1, R2> $Trait<Matrix<T, N, R2>> for Matrix<T, N, R1>
        where
            T: Element,
            R1: Lazy<Elem = T>,
            R2: Lazy<Elem = T>,
        {
            type Output = Matrix<T, N, $Node<R1, R2>>;

            #[inline]
            fn $method(self, other: Matrix<T, N, R2>) -> Self::Output {
                Matrix::from_rep($Node::new(self.into_rep(), other.into_rep()))
            }
        }

        // &matrix op matrix
        impl<'a, T, const N: usize, R1, R2> $Trait<Matrix<T, N, R2>> for &'a Matrix<T, N, R1>
        where
            T: Element,
            R1: Operand<'a, Elem = T>,
            R2: Lazy<Elem = T>,
        {
            type Output = Matrix<T, N, $Node<R1::Ref, R2>>;

            #[inline]
            fn $method(self, other: Matrix<T, N, R2>) -> Self::Output {
                Matrix::from_rep($Node::new(self.rep().as_operand(), other.into_rep()))
            }
        }

        // matrix op &matrix
        impl<'b, T, const N: usize, R1, R2> $Trait<&'b Matrix<T, N, R2>> for Matrix<T, N, R1>
        where
            T: Element,
            R1: Lazy<Elem = T>,
            R2: Operand<'b, Elem = T>,
        {
            type Output = Matrix<T, N, $Node<R1, R2::Ref>>;

            #[inline]
            fn $method(self, other: &'b Matrix<T, N, R2>) -> Self::Output {
                Matrix::from_rep($Node::new(self.into_rep(), other.rep().as_operand()))
            }
        }
    )+};
}

impl_binary_ops!{
    Add add Addition;
    Sub sub Subtraction;
    Mul mul Multiplication;
    Div div Division;
}

// Scalars on either side.
//
// NOTE: Scalar on the left has to be written out per type because of
//       orphan rules; we do the right side the same way for symmetry.
macro_rules! impl_scalar_binary_ops {
    (@imp $X:ty; $Trait:ident $method:ident $Node:ident) => {
        // &matrix op scalar
        impl<'a, const N: usize, R1> $Trait<$X> for &'a Matrix<$X, N, R1>
        where R1: Operand<'a, Elem = $X>,
        {
            type Output = Matrix<$X, N, $Node<R1::Ref, Scalar<$X>>>;

            #[inline]
            fn $method(self, other: $X) -> Self::Output {
                Matrix::from_rep($Node::new(self.rep().as_operand(), Scalar::new(other)))
            }
        }

        // matrix op scalar
        impl<const N: usize, R1> $Trait<$X> for Matrix<$X, N, R1>
        where R1: Lazy<Elem = $X>,
        {
            type Output = Matrix<$X, N, $Node<R1, Scalar<$X>>>;

            #[inline]
            fn $method(self, other: $X) -> Self::Output {
                Matrix::from_rep($Node::new(self.into_rep(), Scalar::new(other)))
            }
        }

        // scalar op &matrix
        impl<'b, const N: usize, R2> $Trait<&'b Matrix<$X, N, R2>> for $X
        where R2: Operand<'b, Elem = $X>,
        {
            type Output = Matrix<$X, N, $Node<Scalar<$X>, R2::Ref>>;

            #[inline]
            fn $method(self, other: &'b Matrix<$X, N, R2>) -> Self::Output {
                Matrix::from_rep($Node::new(Scalar::new(self), other.rep().as_operand()))
            }
        }

        // scalar op matrix
        impl<const N: usize, R2> $Trait<Matrix<$X, N, R2>> for $X
        where R2: Lazy<Elem = $X>,
        {
            type Output = Matrix<$X, N, $Node<Scalar<$X>, R2>>;

            #[inline]
            fn $method(self, other: Matrix<$X, N, R2>) -> Self::Output {
                Matrix::from_rep($Node::new(Scalar::new(self), other.into_rep()))
            }
        }
    };

    ($X:ty) => {
        impl_scalar_binary_ops!{@imp $X; Add add Addition}
        impl_scalar_binary_ops!{@imp $X; Sub sub Subtraction}
        impl_scalar_binary_ops!{@imp $X; Mul mul Multiplication}
        impl_scalar_binary_ops!{@imp $X; Div div Division}
    };
}

for_each_element!{impl_scalar_binary_ops}

// ---------------------------------------------------------------------------
// compound assignment

#[inline]
fn check_compound_shapes(op: &str, lhs: &[usize], rhs: &[usize]) {
    assert!(lhs == rhs, "shape mismatch in {}: {:?} vs {:?}", op, lhs, rhs);
}

macro_rules! impl_assign_ops {
    ($( $Trait:ident $method:ident $op:tt $name:expr; )+) => {$(
        // matrix op= &matrix
        impl<'b, T, const N: usize, R1, R2> $Trait<&'b Matrix<T, N, R2>> for Matrix<T, N, R1>
        where
            T: Element,
            R1: Storage<N, Elem = T>,
            R2: Expr<Elem = T>,
        {
            fn $method(&mut self, other: &'b Matrix<T, N, R2>) {
                check_compound_shapes($name, self.shape(), other.shape());
                self.rep_mut().zip_assign(other.rep(), |a, b| a $op b);
            }
        }

        // matrix op= matrix (usually an expression)
        impl<T, const N: usize, R1, R2> $Trait<Matrix<T, N, R2>> for Matrix<T, N, R1>
        where
            T: Element,
            R1: Storage<N, Elem = T>,
            R2: Expr<Elem = T>,
        {
            #[inline]
            fn $method(&mut self, other: Matrix<T, N, R2>) { $Trait::$method(self, &other) }
        }
    )+};
}

impl_assign_ops!{
    AddAssign add_assign + "addition";
    SubAssign sub_assign - "subtraction";
    MulAssign mul_assign * "multiplication";
    DivAssign div_assign / "division";
}

macro_rules! impl_scalar_assign_ops {
    ($X:ty) => {
        impl<const N: usize, R: Storage<N, Elem = $X>> AddAssign<$X> for Matrix<$X, N, R> {
            #[inline]
            fn add_assign(&mut self, s: $X) { self.rep_mut().map_assign(|x| x + s) }
        }

        impl<const N: usize, R: Storage<N, Elem = $X>> SubAssign<$X> for Matrix<$X, N, R> {
            #[inline]
            fn sub_assign(&mut self, s: $X) { self.rep_mut().map_assign(|x| x - s) }
        }

        impl<const N: usize, R: Storage<N, Elem = $X>> MulAssign<$X> for Matrix<$X, N, R> {
            #[inline]
            fn mul_assign(&mut self, s: $X) { self.rep_mut().map_assign(|x| x * s) }
        }

        impl<const N: usize, R: Storage<N, Elem = $X>> DivAssign<$X> for Matrix<$X, N, R> {
            #[inline]
            fn div_assign(&mut self, s: $X) { self.rep_mut().map_assign(|x| x / s) }
        }
    };
}

for_each_element!{impl_scalar_assign_ops}

// ---------------------------------------------------------------------------

impl<T: Ring, const N: usize> Neg for Matrix<T, N> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::{Matrix, Vector, Scalar};
    use crate::{Addition, Multiplication, Division};
    use crate::Dense;

    fn a() -> Matrix<f64, 2> {
        Matrix::from_fn([3, 3], |[i, j]| (1 + i + 2 * j) as f64)
    }

    fn b() -> Vector<f64> {
        Vector::from_vec([3, 1], vec![1.0, 2.0, 3.0])
    }

    #[test]
    fn operators_build_nodes() {
        let (a, b) = (a(), b());

        // the types say it all; nothing has been computed yet
        let _: Matrix<f64, 2, Addition<&Dense<f64, 2>, &Dense<f64, 2>>> = &a + &a;
        let _: Matrix<f64, 2, Multiplication<Scalar<f64>, &Dense<f64, 2>>> = 2.0 * &b;
        let _: Matrix<f64, 2, Division<&Dense<f64, 2>, Scalar<f64>>> = &b / 2.0;

        let nested = 2.0 * &b + &b / &b;
        assert_eq!(nested.shape(), &[3, 1]);
        assert_eq!(nested.at(1), 5.0);
    }

    #[test]
    fn by_reference_and_by_value() {
        let (a, b) = (a(), b());
        let ab = a.multiply(&b);

        let mut c = Vector::<f64>::new([3, 1]);
        c.assign(2.0 * &b + &ab);
        assert_eq!(c.as_slice(), &[24.0, 32.0, 40.0]);

        // every mix of borrowed and owned operands
        let sum = &b + &b;
        let value = (&b - (&b + &b)) * (sum / &b) + (&b + &b);
        c.assign(value);
        assert_eq!(c.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn scalar_both_sides() {
        let b = b();
        let mut c = Vector::<f64>::new([3, 1]);

        c.assign(10.0 - &b);
        assert_eq!(c.as_slice(), &[9.0, 8.0, 7.0]);
        c.assign(&b - 10.0);
        assert_eq!(c.as_slice(), &[-9.0, -8.0, -7.0]);
        c.assign(6.0 / &b);
        assert_eq!(c.as_slice(), &[6.0, 3.0, 2.0]);
        c.assign(&b * 2.0 + 1.0);
        assert_eq!(c.as_slice(), &[3.0, 5.0, 7.0]);

        let mut i = Matrix::<i32, 1>::from_vec([3], vec![1, 2, 3]);
        let doubled = (2 * &i).eval();
        i.assign(&doubled - 1);
        assert_eq!(i.as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn composite_expression() {
        let (a, b) = (a(), b());
        let ab = a.multiply(&b);

        let mut c = Vector::<f64>::new([3, 1]);
        c.assign(2.0 * &b + &ab);

        // an operand that is also the destination has to be copied first
        let prev = c.clone();
        c.assign(5.0 * &ab + 2.3 * &b + &prev / &prev);
        for i in 0..3 {
            assert_eq!(c.at(i), 5.0 * ab.at(i) + 2.3 * b.at(i) + 1.0);
        }
    }

    #[test]
    #[should_panic(expected = "shape mismatch in subtraction")]
    fn operators_check_shapes() {
        let (a, b) = (a(), b());
        let _ = &a - &b;
    }

    #[test]
    fn compound_assignment() {
        let mut m = Matrix::<f64, 2>::from_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let n = Matrix::<f64, 2>::from_vec([2, 2], vec![1.0, 1.0, 2.0, 2.0]);

        m += &n;
        assert_eq!(m.as_slice(), &[2.0, 3.0, 5.0, 6.0]);
        m -= &n;
        m *= &n;
        assert_eq!(m.as_slice(), &[1.0, 2.0, 6.0, 8.0]);
        m /= &n;
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        // expressions on the right
        m += &n * 2.0;
        assert_eq!(m.as_slice(), &[3.0, 4.0, 7.0, 8.0]);

        m *= 2.0;
        assert_eq!(m.as_slice(), &[6.0, 8.0, 14.0, 16.0]);
        m /= 2.0;
        m -= 1.0;
        m += 0.5;
        assert_eq!(m.as_slice(), &[2.5, 3.5, 6.5, 7.5]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch in addition")]
    fn compound_assignment_checks_shapes() {
        let mut m = Matrix::<f64, 2>::new([2, 3]);
        m += &Matrix::<f64, 2>::new([3, 2]);
    }

    #[test]
    fn negation() {
        let m = Matrix::<i64, 1>::from_vec([3], vec![1, -2, 0]);
        assert_eq!((-m).as_slice(), &[-1, 2, 0]);
    }

    #[test]
    fn weakly_transposed_operands() {
        let mut t = Matrix::<i32, 2>::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        t.transpose();
        let u = Matrix::<i32, 2>::from_rows(&[[1, 1], [2, 2], [3, 3]]);

        let mut out = Matrix::<i32, 2>::new([3, 2]);
        out.assign(&t + &u);
        assert_eq!(out.as_slice(), &[2, 5, 4, 7, 6, 9]);
    }
}
