/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Element traits exposed in public interfaces.
//
// These are implemented on a finite set of primitive types rather than
// expressed as open-ended generic bounds, so that client crates aren't
// coupled to whatever combination of `std::ops` traits we happen to need.

use std::fmt;
use std::ops::{Add, Sub, Mul, Div, Neg};
use std::ops::{AddAssign, SubAssign, MulAssign, DivAssign};

pub use self::element::Element;
mod element {
    use super::*;

    /// Trait for the element type of a matrix.
    ///
    /// Anything that supports the four arithmetic operators elementwise.
    /// You get the primitive integers and floats, and that's it.
    /// This trait is sealed to avoid accidental commitments.
    pub trait Element
        : Sized + Copy + Default + PartialEq + PartialOrd
        + fmt::Debug + fmt::Display
        + Add<Output=Self> + Sub<Output=Self>
        + Mul<Output=Self> + Div<Output=Self>
        + AddAssign + SubAssign + MulAssign + DivAssign
        + num_traits::Zero + num_traits::One
        + Sealed
    { }

    pub(crate) use self::private::Sealed;
    pub(crate) mod private {
        pub trait Sealed { }
    }
}

pub use self::ring::Ring;
mod ring {
    use super::*;

    /// Elements that are closed under negation.
    ///
    /// No unsigned integers here.
    pub trait Ring: Element + Neg<Output=Self> + Sealed { }

    pub(crate) use self::private::Sealed;
    pub(crate) mod private {
        pub trait Sealed { }
    }
}

pub use self::field::Field;
mod field {
    use super::*;

    /// Elements with a well-behaved division; i.e. primitive floats.
    ///
    /// Required by anything that does substitution.
    pub trait Field: Ring + Sealed { }

    pub(crate) use self::private::Sealed;
    pub(crate) mod private {
        pub trait Sealed { }
    }
}

macro_rules! impl_element_traits {
    (@element $($T:ty)*) => {$(
        impl Element for $T { }
        impl element::Sealed for $T { }
    )*};
    (@ring $($T:ty)*) => {$(
        impl Ring for $T { }
        impl ring::Sealed for $T { }
    )*};
    (@field $($T:ty)*) => {$(
        impl Field for $T { }
        impl field::Sealed for $T { }
    )*};
}

impl_element_traits!{@element u8 u16 u32 u64 usize i8 i16 i32 i64 isize f32 f64}
impl_element_traits!{@ring i8 i16 i32 i64 isize f32 f64}
impl_element_traits!{@field f32 f64}

/// Invokes a macro once for each element type, for impls that the orphan
/// rules forbid us from writing generically (e.g. `impl Add<Matrix<T>> for T`).
macro_rules! for_each_element {
    ($mac:ident) => {
        $mac!{u8} $mac!{u16} $mac!{u32} $mac!{u64} $mac!{usize}
        $mac!{i8} $mac!{i16} $mac!{i32} $mac!{i64} $mac!{isize}
        $mac!{f32} $mac!{f64}
    };
}
