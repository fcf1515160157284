//! Dense determinant, factorial, and small integer-power helpers.
//!
//! The determinant kernel is dimension-agnostic: it operates on whatever
//! square matrix it is handed, with no compile-time size. Callers in
//! [crate::geometry] and [crate::envelope] are responsible for passing a
//! square matrix; a ragged one is a contract violation, reported as
//! [PavageError::MalformedMatrix] rather than panicking.
use crate::error::PavageError;

/// Computes the determinant of a square matrix given as an ordered slice
/// of rows, each an ordered slice of the same length.
///
/// - size 0 -> 0
/// - size 1 -> the single entry
/// - size 2 -> `a*d - b*c`
/// - size k >= 3 -> Laplace expansion along row 0, alternating signs,
///   recursing on the `(k-1)x(k-1)` minors obtained by deleting row 0 and
///   column `j`.
///
/// Intentionally `O(k!)`; the outer dimension cap of 15 keeps this
/// tractable. No pivoting or scaling is performed, so numeric stability
/// is not guaranteed for poorly conditioned inputs.
pub fn determinant(m: &[Vec<f64>]) -> Result<f64, PavageError> {
    let rows = m.len();
    if rows == 0 {
        return Ok(0.0);
    }
    let cols = m[0].len();
    for row in m {
        if row.len() != cols {
            return Err(PavageError::MalformedMatrix {
                rows,
                cols: row.len(),
            });
        }
    }
    if rows != cols {
        return Err(PavageError::MalformedMatrix { rows, cols });
    }

    Ok(determinant_unchecked(m))
}

fn determinant_unchecked(m: &[Vec<f64>]) -> f64 {
    match m.len() {
        0 => 0.0,
        1 => m[0][0],
        2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
        k => {
            let mut det = 0.0;
            for j in 0..k {
                let epsilon = if j % 2 == 0 { 1.0 } else { -1.0 };
                let minor: Vec<Vec<f64>> = m[1..]
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(p, _)| *p != j)
                            .map(|(_, &v)| v)
                            .collect()
                    })
                    .collect();
                det += epsilon * m[0][j] * determinant_unchecked(&minor);
            }
            det
        }
    }
}

/// Factorial of a small non-negative integer.
pub fn factorial(n: u32) -> u64 {
    (1..=n as u64).product()
}

/// `x` raised to the non-negative integer power `n`.
pub fn pow(x: f64, n: u32) -> f64 {
    (0..n).fold(1.0, |acc, _| acc * x)
}
