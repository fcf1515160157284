//! Signed volume and the point-in-simplex location test.
//!
//! Both are built on [crate::matrix::determinant]; neither one owns or
//! mutates anything — they take already-resolved coordinates (slices of
//! [Point]) and return a number or a boolean, exactly mirroring the
//! teacher's small free functions over resolved data (e.g.
//! `distance_matrix::EdgeIterator`).
use crate::error::PavageError;
use crate::matrix::{determinant, factorial};
use crate::point::Point;

/// Signed volume of an `(n+1)`-point simplex in `R^n`, via the edge-form
/// determinant: an `n x n` matrix whose column `k` (`k` in `1..=n`) is
/// `points[k] - points[0]`, divided by `n!`.
///
/// Simplices of 0 or 1 points have volume 0 by definition. The sign is
/// not normalized; callers take the absolute value wherever a
/// volume/area magnitude is needed.
pub fn signed_volume(points: &[&Point]) -> Result<f64, PavageError> {
    if points.len() < 2 {
        return Ok(0.0);
    }
    let n = points[0].dim();
    let p0: Vec<f64> = points[0].coords_slice().collect();

    // Row j holds, across columns k = 1..=n, the value points[k][j] - p0[j].
    let mut rows: Vec<Vec<f64>> = vec![Vec::with_capacity(n); n];
    for p in &points[1..] {
        let coords: Vec<f64> = p.coords_slice().collect();
        for j in 0..n {
            rows[j].push(coords[j] - p0[j]);
        }
    }

    let det = determinant(&rows)?;
    Ok(det / factorial(n as u32) as f64)
}

/// Strict-interior point-in-simplex test via the determinant-pair
/// criterion: for each vertex `i` of `simplex`, form the `n x n` matrices
/// `D1(i)` (rows `q[j] - simplex[k][j]` for `k != i`) and `D2(i)` (rows
/// `simplex[i][j] - simplex[k][j]` for `k != i`). `q` is inside iff
/// `det(D1(i)) * det(D2(i))` is strictly positive for every `i`; a
/// non-positive product for any `i` (including exactly zero, i.e. `q` on
/// a face) reports outside.
pub fn contains_strict(simplex: &[&Point], q: &Point) -> Result<bool, PavageError> {
    let n = q.dim();
    for i in 0..simplex.len() {
        let mut d1 = Vec::with_capacity(n);
        let mut d2 = Vec::with_capacity(n);
        for j in 0..n {
            let mut row1 = Vec::with_capacity(n);
            let mut row2 = Vec::with_capacity(n);
            for (k, pk) in simplex.iter().enumerate() {
                if k == i {
                    continue;
                }
                row1.push(q.coord(j)? - pk.coord(j)?);
                row2.push(simplex[i].coord(j)? - pk.coord(j)?);
            }
            d1.push(row1);
            d2.push(row2);
        }
        let det1 = determinant(&d1)?;
        let det2 = determinant(&d2)?;
        if det1 * det2 <= 0.0 {
            return Ok(false);
        }
    }
    Ok(true)
}
