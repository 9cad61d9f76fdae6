/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Approximate equality assertions for floats and collections of floats.
//!
//! ```
//! #[macro_use] extern crate lazymat_assert_close;
//! # fn main() {
//! assert_close!(0.1 + 0.2, 0.3);
//! assert_close!(abs=1e-3, &[1.0, 2.0][..], &[1.0004, 1.9997][..]);
//! # }
//! ```

use std::fmt;

/// Relative tolerance used when none is given.
pub const DEFAULT_REL_TOL: f64 = 1e-9;

/// Panics unless two values are approximately equal.
///
/// Tolerances may be given up front as `rel=` and/or `abs=`; a custom
/// message may be given after the two values, as with `assert!`.
#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        $crate::__assert_close_impl!{@parse [$($t)*] [$crate::DEFAULT_REL_TOL] [0.0]}
    };
}

/// `assert_close!` in debug builds, nothing in release builds.
#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            $crate::assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close_impl {
    (@parse [rel=$tol:expr, $($rest:tt)*] [$rel:expr] [$abs:expr]) => {
        $crate::__assert_close_impl!{@parse [$($rest)*] [$tol] [$abs]}
    };
    (@parse [abs=$tol:expr, $($rest:tt)*] [$rel:expr] [$abs:expr]) => {
        $crate::__assert_close_impl!{@parse [$($rest)*] [$rel] [$tol]}
    };
    (@parse [$a:expr, $b:expr $(,)*] [$rel:expr] [$abs:expr]) => {
        $crate::__assert_close_impl!{@check [$a, $b] [$rel] [$abs] ["values are not close"]}
    };
    (@parse [$a:expr, $b:expr, $($fmt:tt)+] [$rel:expr] [$abs:expr]) => {
        $crate::__assert_close_impl!{@check [$a, $b] [$rel] [$abs] [$($fmt)+]}
    };
    (@check [$a:expr, $b:expr] [$rel:expr] [$abs:expr] [$($fmt:tt)+]) => {{
        let (a, b) = (&$a, &$b);
        let tol = $crate::Tolerances { rel: $rel, abs: $abs };
        if let Err(e) = $crate::CheckClose::check_close(a, b, tol) {
            panic!(
                "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                format!($($fmt)+), tol.rel, tol.abs, a, b, e,
            );
        }
    }};
}

/// Closeness test for a single pair of floats.
///
/// Same semantics as Python's `math.isclose`: infinities are only close to
/// themselves, and NaN is close to nothing.
#[inline]
pub fn is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0, "negative relative tolerance");
    assert!(abs >= 0.0, "negative absolute tolerance");

    if a == b { return true; }
    if a.is_infinite() || b.is_infinite() { return false; }

    (a - b).abs() <= abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub rel: f64,
    pub abs: f64,
}

impl Default for Tolerances {
    fn default() -> Self { Tolerances { rel: DEFAULT_REL_TOL, abs: 0.0 } }
}

/// The first pair of values found to differ.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("first difference at position {position}:\n  left: {left}\n right: {right}")]
pub struct CheckCloseError {
    /// Flat position within the compared collections (0 for plain floats).
    pub position: usize,
    pub left: String,
    pub right: String,
}

impl CheckCloseError {
    fn new<T: fmt::Debug>(left: T, right: T) -> Self {
        CheckCloseError { position: 0, left: format!("{:?}", left), right: format!("{:?}", right) }
    }

    /// Shift the position of an error found within an element of a collection.
    pub fn offset(mut self, by: usize) -> Self {
        self.position += by;
        self
    }
}

/// Types whose values can be compared approximately.
pub trait CheckClose<Rhs: ?Sized = Self> {
    /// Check that every value in `self` is close to the one in `other`.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    #[inline]
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        match is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError::new(*self, *other)),
        }
    }
}

impl CheckClose for f32 {
    #[inline]
    fn check_close(&self, other: &f32, tol: Tolerances) -> Result<(), CheckCloseError> {
        match is_close(f64::from(*self), f64::from(*other), tol) {
            true => Ok(()),
            false => Err(CheckCloseError::new(*self, *other)),
        }
    }
}

impl<'a, A: ?Sized + CheckClose<B>, B: ?Sized> CheckClose<&'a B> for &'a A {
    #[inline]
    fn check_close(&self, other: &&'a B, tol: Tolerances) -> Result<(), CheckCloseError> {
        (**self).check_close(*other, tol)
    }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError> {
        assert_eq!(self.len(), other.len(), "cannot compare slices of different lengths");
        for (position, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| e.offset(position))?;
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    fn check_close(&self, other: &Vec<T>, tol: Tolerances) -> Result<(), CheckCloseError> {
        self[..].check_close(&other[..], tol)
    }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    fn check_close(&self, other: &[T; N], tol: Tolerances) -> Result<(), CheckCloseError> {
        self[..].check_close(&other[..], tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_forms_compile() {
        assert_close!(1.0, 1.0);
        assert_close!(abs=1e-8, 1.0, 1.0);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0);
        assert_close!(abs=1e-8, rel=1e-8, 1.0, 1.0,);
        assert_close!(1.0, 1.0, "{} {}", "with", "message");
        debug_assert_close!(rel=1e-3, 1.0, 1.0001);
    }

    #[test]
    fn python_semantics() {
        let tol = Tolerances { rel: 1e-9, abs: 0.0 };
        assert!(is_close(1e10, 1e10 + 1.0, tol));
        assert!(!is_close(1.0, 1.0 + 1e-8, tol));
        assert!(!is_close(0.0, 1e-300, tol));
        assert!(is_close(0.0, 1e-300, Tolerances { rel: 0.0, abs: 1e-299 }));
        assert!(is_close(f64::INFINITY, f64::INFINITY, tol));
        assert!(!is_close(f64::INFINITY, f64::NEG_INFINITY, Tolerances { rel: 1.0, abs: 1.0 }));
        assert!(!is_close(f64::NAN, f64::NAN, tol));
    }

    #[test]
    fn collections() {
        assert_close!(vec![1.0, 2.0], vec![1.0, 2.0 + 1e-12]);
        assert_close!([1.0f32, 2.0], [1.0f32, 2.0]);
        assert_close!(&[0.1 + 0.2][..], &[0.3][..]);
    }

    #[test]
    fn error_reports_position() {
        let tol = Tolerances::default();
        let err = [1.0f64, 2.0, 3.0].check_close(&[1.0, 2.0, 3.5], tol).unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.left, "3.0");
        assert_eq!(err.right, "3.5");
    }

    #[test]
    #[should_panic(expected = "values are not close")]
    fn not_close() {
        assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic)]
    fn debug_not_close() {
        debug_assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }
}
