//! The canonical bounding-envelope constructor.
//!
//! Builds an axis-aligned covering complex of `2*N` boundary vertices and
//! `sum_{i=0}^{N-1} C(N-1, i) = 2^(N-1)` `N`-simplices, before any user
//! insertion. See [crate::complex::Complex::new_with_envelope].
use crate::complex::Complex;
use crate::point::Point;
use crate::simplex::Simplex;
use crate::vertex::VertexId;

const ROTATION_THETA: f64 = std::f64::consts::FRAC_PI_4;

/// Builds a `Complex` whose sole content is the envelope: two axis-1
/// extreme points `Pmin = (-scale, 0, ..., 0)` and
/// `Pmax = (+scale, 0, ..., 0)`, plus, for every other axis, every
/// sign assignment of that axis's corner points, joined to `Pmin`/`Pmax`
/// to form a covering `N`-simplex.
///
/// `display` additionally rotates every boundary vertex by `pi/4` around
/// the origin when `n == 2` — a diamond orientation that reads better in
/// a 2-D viewer. It has no effect for `n != 2`.
pub fn build_envelope(n: usize, scale: f64, display: bool) -> Complex {
    let mut complex = Complex::raw(n);

    let p_min = {
        let mut p = Point::new(&[-scale], n);
        p.mark_boundary();
        p
    };
    let p_max = {
        let mut p = Point::new(&[scale], n);
        p.mark_boundary();
        p
    };
    let id_min = complex.vertices.push(p_min, 0.0);
    let id_max = complex.vertices.push(p_max, 0.0);

    for i in 0..n {
        // v holds N-1 signs over axes 2..N: i of them +scale, the rest
        // -scale, built max-first so it is already in descending order —
        // the starting point a reverse-permutation walk needs to visit
        // every distinct arrangement of this multiset exactly once.
        let mut v: Vec<f64> = std::iter::repeat(scale)
            .take(i)
            .chain(std::iter::repeat(-scale).take(n - 1 - i))
            .collect();

        loop {
            let mut ids: Vec<VertexId> = Vec::with_capacity(n + 1);
            ids.push(id_min);
            ids.push(id_max);
            for (k, &value) in v.iter().enumerate() {
                let mut q = Point::new(&[], n);
                q.set_coord(k + 1, value).expect("k+1 < n by construction");
                q.mark_boundary();
                let id = match complex.vertices.find(&q) {
                    Some(existing) => existing,
                    None => complex.vertices.push(q, 0.0),
                };
                ids.push(id);
            }
            complex.simplices.insert(Simplex::new(ids));

            if !prev_permutation(&mut v) {
                break;
            }
        }
    }

    if n == 2 && display {
        rotate_boundary_diamond(&mut complex);
    }

    complex
}

/// Rotates every boundary vertex's first two coordinates by `pi/4`
/// around the origin, rounding to the nearest integer, as the source
/// does to orient a 2-D envelope for on-screen display.
fn rotate_boundary_diamond(complex: &mut Complex) {
    let ids: Vec<VertexId> = complex
        .vertices
        .iter()
        .filter(|(_, lp)| lp.point.is_boundary())
        .map(|(id, _)| id)
        .collect();
    for id in ids {
        let lp = complex.vertices.get_mut(id);
        let x = lp.point.coord(0).unwrap();
        let y = lp.point.coord(1).unwrap();
        let new_x = (ROTATION_THETA.sin() * y + ROTATION_THETA.cos() * x).round();
        let new_y = (ROTATION_THETA.cos() * y - ROTATION_THETA.sin() * x).round();
        lp.point.set_coord(0, new_x).unwrap();
        lp.point.set_coord(1, new_y).unwrap();
    }
}

/// In-place mirror of `std::prev_permutation`: rearranges `v` into the
/// lexicographically previous permutation and returns `true`, or, if `v`
/// is already the smallest permutation, rearranges it into the largest
/// and returns `false`. Over a multiset this visits every *distinct*
/// arrangement exactly once, which is exactly what the envelope
/// constructor needs from a max-first starting vector.
fn prev_permutation(v: &mut [f64]) -> bool {
    let n = v.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && v[i - 1] <= v[i] {
        i -= 1;
    }
    if i == 0 {
        v.reverse();
        return false;
    }
    let mut j = n - 1;
    while v[j] >= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prev_permutation_enumerates_every_distinct_arrangement() {
        let mut v = vec![1.0, 1.0, -1.0];
        let mut seen = vec![v.clone()];
        while prev_permutation(&mut v) {
            seen.push(v.clone());
        }
        // multiset {1,1,-1} has 3!/2! = 3 distinct arrangements.
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn envelope_2d_computational_has_two_boundary_points_and_one_simplex_per_axis() {
        let complex = build_envelope(2, 25_000.0, false);
        assert_eq!(complex.vertices.len(), 4);
        assert_eq!(complex.simplices.len(), 2);
        for s in complex.simplices.iter() {
            assert_eq!(s.vertices().len(), 3);
        }
    }

    #[test]
    fn envelope_3d_has_six_boundary_points() {
        let complex = build_envelope(3, 25_000.0, false);
        assert_eq!(complex.vertices.len(), 6);
        for s in complex.simplices.iter() {
            assert_eq!(s.vertices().len(), 4);
        }
    }

    #[test]
    fn every_simplex_contains_pmin_and_pmax() {
        let complex = build_envelope(3, 25_000.0, false);
        // The first two vertices pushed are Pmin and Pmax; every simplex
        // must reference both.
        let id_min = VertexId(0);
        let id_max = VertexId(1);
        for s in complex.simplices.iter() {
            assert!(s.vertices().contains(&id_min));
            assert!(s.vertices().contains(&id_max));
        }
    }

    #[test]
    fn display_rotation_only_applies_to_2d() {
        let rotated = build_envelope(2, 300.0, true);
        let unrotated = build_envelope(2, 300.0, false);
        // Coordinates differ after rotation (diamond vs axis-aligned).
        let rotated_coords: Vec<f64> = rotated
            .vertices
            .iter()
            .map(|(_, lp)| lp.point.coord(0).unwrap())
            .collect();
        let unrotated_coords: Vec<f64> = unrotated
            .vertices
            .iter()
            .map(|(_, lp)| lp.point.coord(0).unwrap())
            .collect();
        assert_ne!(rotated_coords, unrotated_coords);
    }
}
