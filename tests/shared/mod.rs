/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Matrices shared by several test files.
#![allow(dead_code)]

use lazymat::{Matrix, Vector};

/// `A(i, j) = 1 + i + 2j`
pub fn a() -> Matrix<f64, 2> {
    Matrix::from_fn([3, 3], |[i, j]| (1 + i + 2 * j) as f64)
}

pub fn b() -> Vector<f64> {
    Vector::from_vec([3, 1], vec![1.0, 2.0, 3.0])
}

/// Lower triangular.
pub fn e() -> Matrix<f64, 2> {
    Matrix::from_rows(&[
        [1.0, 0.0, 0.0],
        [2.0, 3.0, 0.0],
        [4.0, 5.0, 6.0],
    ])
}

pub fn random(shape: [usize; 2]) -> Matrix<f64, 2> {
    Matrix::from_fn(shape, |_| rand::random::<f64>() - 0.5)
}

/// A random triangular matrix with a comfortably nonzero diagonal.
pub fn random_triangular(n: usize, lower: bool) -> Matrix<f64, 2> {
    Matrix::from_fn([n, n], |[i, j]| match () {
        _ if i == j => 1.0 + rand::random::<f64>(),
        _ if (j < i) == lower => rand::random::<f64>() - 0.5,
        _ => 0.0,
    })
}
