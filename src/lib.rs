/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Lazily-evaluated dense and sparse matrices.
//!
//! This is a facade over the workspace crates; the library itself lives in
//! `lazymat-matrix`.

pub use lazymat_matrix::*;
