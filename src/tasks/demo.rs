/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::config::{Settings, Benchmark};

use lazymat_matrix::{Matrix, Vector, SparseMatrix};
use std::io::Write;
use std::time::Instant;

/// Walk through what the library can do, writing results to `out`.
pub fn run_demo<W: Write>(settings: &Settings, out: &mut W) -> FailResult<()> {
    let zero = Matrix::<f64, 2>::new([3, 3]);
    writeln!(out, "A freshly constructed 3x3 matrix:\n{}", zero)?;

    let mut a = Matrix::<f64, 2>::from_fn([3, 3], |[i, j]| (1 + i + 2 * j) as f64);
    writeln!(out, "A, where A(i, j) = 1 + i + 2j:\n{}", a)?;

    let mut b = Vector::<f64>::new([3, 1]);
    b[[0, 0]] = 1.0;
    b[[1, 0]] = 2.0;
    b[[2, 0]] = 3.0;
    writeln!(out, "B:\n{}", b)?;

    let mut x = Matrix::<u8, 4>::new([5, 6, 7, 8]);
    x[[2, 2, 2, 2]] = 1;
    writeln!(out, "X is rank {} with {} elements; X(2, 2, 2, 2) = {}\n", x.dimension(), x.size(), x[[2, 2, 2, 2]])?;

    // transposition
    writeln!(out, "A(2, 0) = {}", a[[2, 0]])?;
    a.transpose();
    writeln!(out, "after a weak transpose, A(0, 2) = {}:\n{}", a[[0, 2]], a)?;
    a.strong_transpose();
    writeln!(out, "after a strong transpose of that:\n{}", a)?;

    // lazy expressions
    let ab = a.multiply(&b);
    let mut c = Vector::<f64>::new([3, 1]);
    c.assign(2.0 * &b + &ab);
    writeln!(out, "C = 2B + AB:\n{}", c)?;

    let mut p = Matrix::<f64, 2>::new([1, 1]);
    p[[0, 0]] = 1.0;
    let mut q = Matrix::<f64, 2>::new([1, 1]);
    q.assign(2.3 + &p + 2.5);
    writeln!(out, "Q = 2.3 + P + 2.5:\n{}", q)?;

    let prev = c.clone();
    c.assign(5.0 * &ab + 2.3 * &b + &prev / &prev);
    writeln!(out, "C = 5(AB) + 2.3B + C/C:\n{}", c)?;

    if settings.benchmark.enabled {
        benchmark(&settings.benchmark, out)?;
    }

    // triangular systems
    let d = Matrix::<f64, 2>::from_rows(&[
        [1.0, 2.0, 3.0],
        [0.0, 4.0, 0.0],
        [5.0, 6.0, 7.0],
    ]);
    let e = Matrix::<f64, 2>::from_rows(&[
        [1.0, 0.0, 0.0],
        [2.0, 3.0, 0.0],
        [4.0, 5.0, 6.0],
    ]);
    writeln!(out, "D:\n{}", d)?;
    writeln!(out, "D is lower triangular: {}", d.is_lower_triangular())?;
    writeln!(out, "D is upper triangular: {}\n", d.is_upper_triangular())?;
    writeln!(out, "E:\n{}", e)?;
    writeln!(out, "E is lower triangular: {}", e.is_lower_triangular())?;
    writeln!(out, "E is upper triangular: {}\n", e.is_upper_triangular())?;

    let coefficients = e.span(&b)?;
    writeln!(out, "coefficients for B in the span of the columns of E:\n{}", coefficients)?;

    // sparse storage
    let mut s = SparseMatrix::<f64>::new([3, 3]);
    s[[0, 0]] = 4.0;
    s[[1, 2]] = -1.0;
    s[[2, 1]] = 0.5;
    writeln!(out, "S, sparse with {} stored entries:\n{}", s.nnz(), s)?;
    let mut sum = Matrix::<f64, 2>::new([3, 3]);
    sum.assign(&s + &e);
    writeln!(out, "S + E:\n{}", sum)?;

    Ok(())
}

fn benchmark<W: Write>(settings: &Benchmark, out: &mut W) -> FailResult<()> {
    let k = Matrix::<f64, 3>::from_fn(settings.shape, |[i, j, l]| (i + j + l) as f64);
    let mut result = Matrix::<f64, 3>::new(settings.shape);
    info!("benchmarking a {:?} matrix", settings.shape);

    for trial in 0..settings.repeats {
        let start = Instant::now();
        result.assign((&k + &k) + (&k + (&k + &k)));
        let elapsed = start.elapsed();
        debug!("trial {}: {:?}", trial, elapsed);
        writeln!(
            out, "K = (K + K) + (K + (K + K)) on a {:?} matrix took {}.{:06}s",
            settings.shape, elapsed.as_secs(), elapsed.subsec_micros(),
        )?;
    }
    if let Some(last) = result.size().checked_sub(1) {
        writeln!(out, "last element of K: {}\n", result.at(last))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(settings: &Settings) -> String {
        let mut out = vec![];
        run_demo(settings, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn without_benchmark() -> Settings {
        let mut settings = Settings::default();
        settings.benchmark.enabled = false;
        settings
    }

    #[test]
    fn walkthrough() {
        let text = run(&without_benchmark());
        assert!(text.contains("A, where A(i, j) = 1 + i + 2j:\n1,3,5\n2,4,6\n3,5,7\n"));
        assert!(text.contains("after a weak transpose, A(0, 2) = 3:\n1,2,3\n3,4,5\n5,6,7\n"));
        assert!(text.contains("Q = 2.3 + P + 2.5:\n5.8\n"));
        assert!(text.contains("E is lower triangular: true"));
        assert!(text.contains("X is rank 4 with 1680 elements; X(2, 2, 2, 2) = 1\n"));
        assert!(text.contains("D is lower triangular: false"));
        assert!(text.contains("D is upper triangular: false"));
        assert!(!text.contains("took"));
    }

    #[test]
    fn small_benchmark() {
        let mut settings = Settings::default();
        settings.benchmark.shape = [2, 3, 4];
        settings.benchmark.repeats = 2;
        let text = run(&settings);
        assert_eq!(text.matches("took").count(), 2);
        // (1 + 2 + 3) * 6
        assert!(text.contains("last element of K: 36\n"));
    }
}
