//! The mutable aggregate: vertex store + simplex registry, and every
//! operation that reads or mutates them — insertion (star-split),
//! interpolation, and boundary value propagation.
use crate::envelope;
use crate::error::PavageError;
use crate::geometry::{contains_strict, signed_volume};
use crate::point::Point;
use crate::simplex::{Simplex, SimplexRegistry};
use crate::vertex::{LabeledPoint, VertexId, VertexStore};
use crate::{check_dimension, MAX_DIMENSION, MIN_DIMENSION};

/// Scale of the bounding envelope used for ordinary (non-display)
/// computation, per spec.
pub const COMPUTATIONAL_SCALE: f64 = 25_000.0;

/// Scale of the bounding envelope used when the complex will be shown in
/// a 2-D viewer.
pub const DISPLAY_SCALE: f64 = 300.0;

/// Number of insertions between automatic boundary-value propagation
/// passes (see [Complex::add_point]).
const PROPAGATION_THRESHOLD: u32 = 5;

/// The tessellation: an append-only vertex store, a set of `N`-simplices
/// partitioning the envelope, and a small counter throttling how often
/// boundary values are recomputed.
#[derive(Debug, Clone)]
pub struct Complex {
    dim: usize,
    pub(crate) vertices: VertexStore,
    pub(crate) simplices: SimplexRegistry,
    pending_updates: u32,
}

impl Complex {
    /// Builds a `Complex` with no dimension validation, for use by
    /// [crate::envelope], which has already gone through
    /// [Complex::new_with_envelope]'s dimension check.
    pub(crate) fn raw(dim: usize) -> Complex {
        Complex {
            dim,
            vertices: VertexStore::new(),
            simplices: SimplexRegistry::new(),
            pending_updates: 0,
        }
    }

    /// Builds an empty complex of dimension `n`. Fails with
    /// [PavageError::DimensionOutOfRange] unless `2 <= n <= 15`.
    pub fn new_empty(n: usize) -> Result<Complex, PavageError> {
        check_dimension(n)?;
        Ok(Complex::raw(n))
    }

    /// Builds a complex seeded with the canonical bounding envelope.
    /// `display` selects scale `300` plus the `n == 2` rotation fixup;
    /// otherwise scale `25000` is used untouched. Fails with
    /// [PavageError::DimensionOutOfRange] unless `2 <= n <= 15`.
    pub fn new_with_envelope(n: usize, display: bool) -> Result<Complex, PavageError> {
        check_dimension(n)?;
        let scale = if display {
            DISPLAY_SCALE
        } else {
            COMPUTATIONAL_SCALE
        };
        Ok(envelope::build_envelope(n, scale, display))
    }

    /// The dimension this complex was constructed with.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// True iff no simplex has been formed yet.
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// All simplices currently in the registry.
    pub fn figures(&self) -> impl Iterator<Item = &Simplex> {
        self.simplices.iter()
    }

    /// All vertices ever inserted, boundary and interior alike.
    pub fn single_points(&self) -> impl Iterator<Item = (VertexId, &LabeledPoint)> {
        self.vertices.iter()
    }

    fn resolve<'a>(&'a self, simplex: &Simplex) -> Vec<&'a Point> {
        simplex
            .vertices()
            .iter()
            .map(|&id| &self.vertices.get(id).point)
            .collect()
    }

    /// Inserts `(q, v)` into the complex, refining whichever simplex
    /// encloses `q` by a star-split.
    ///
    /// - If the vertex store has fewer than `dim` entries, `(q, v)` is
    ///   simply appended — no simplex is formed yet.
    /// - If the store has exactly `dim` entries and no simplex exists,
    ///   `(q, v)` is appended and the single simplex of all `dim + 1`
    ///   stored vertices is formed.
    /// - Otherwise, if `q` equals an already-stored point, that vertex's
    ///   value is overwritten with `v`. Else `(q, v)` is appended and
    ///   every enclosing simplex (per [contains_strict]) is replaced by
    ///   `dim + 1` children, one per vertex substituted for the new
    ///   point; children of zero volume are discarded.
    ///
    /// A point lying exactly on a shared face is enclosed by no simplex
    /// (see [contains_strict]); in that case the new vertex is still
    /// appended to the store but no simplex references it — a silent
    /// quirk inherited from the original design (`InsertionOutsideEnvelope`
    /// in spec terms), not an error.
    ///
    /// Every call, on every path, increments the internal pending-update
    /// counter; once it exceeds [PROPAGATION_THRESHOLD] it is reset and
    /// [Complex::propagate_boundary_values] runs automatically.
    pub fn add_point(&mut self, q: Point, v: f64) -> Result<(), PavageError> {
        if self.vertices.len() < self.dim {
            self.vertices.push(q, v);
        } else if self.simplices.is_empty() {
            self.vertices.push(q, v);
            let ids: Vec<VertexId> = (0..self.vertices.len()).map(VertexId).collect();
            self.simplices.insert(Simplex::new(ids));
        } else if let Some(existing) = self.vertices.find(&q) {
            self.vertices.set_value(existing, v);
        } else {
            self.star_split(q, v)?;
        }

        self.pending_updates += 1;
        if self.pending_updates > PROPAGATION_THRESHOLD {
            self.pending_updates = 0;
            self.propagate_boundary_values();
        }
        Ok(())
    }

    fn star_split(&mut self, q: Point, v: f64) -> Result<(), PavageError> {
        let new_id = self.vertices.push(q, v);

        let new_point = &self.vertices.get(new_id).point;
        let mut enclosing = Vec::new();
        for s in self.simplices.iter() {
            let pts = self.resolve(s);
            if contains_strict(&pts, new_point)? {
                enclosing.push(s.clone());
            }
        }

        let mut children = Vec::with_capacity(enclosing.len() * (self.dim + 1));
        for parent in &enclosing {
            self.simplices.erase(parent);
            for i in 0..parent.vertices().len() {
                let mut ids = parent.vertices().to_vec();
                ids[i] = new_id;
                children.push(Simplex::new(ids));
            }
        }

        for child in children {
            let pts = self.resolve(&child);
            let volume = signed_volume(&pts)?;
            if volume != 0.0 {
                self.simplices.insert(child);
            }
        }
        Ok(())
    }

    /// Locates the simplex enclosing `q` and returns the barycentric
    /// interpolation of the scalar field there, or `0.0` if `q` lies in
    /// no simplex (`OrphanQuery` in spec terms — non-fatal).
    ///
    /// Fails with [PavageError::DegenerateSimplex] if the enclosing
    /// simplex has zero volume, which the insertion path should never
    /// produce but which this function checks rather than assumes.
    pub fn interpolate(&self, q: &Point) -> Result<f64, PavageError> {
        let Some(simplex) = self.locate(q)? else {
            return Ok(0.0);
        };
        let points = self.resolve(simplex);
        let total_volume = signed_volume(&points)?;
        if total_volume == 0.0 {
            return Err(PavageError::DegenerateSimplex);
        }

        let mut result = 0.0;
        for i in 0..points.len() {
            let mut sub = points.clone();
            sub[i] = q;
            let weight = signed_volume(&sub)?.abs() / total_volume.abs();
            let value = self.vertices.get(simplex.vertices()[i]).value;
            result += weight * value;
        }
        Ok(result)
    }

    fn locate(&self, q: &Point) -> Result<Option<&Simplex>, PavageError> {
        for s in self.simplices.iter() {
            let pts = self.resolve(s);
            if contains_strict(&pts, q)? {
                return Ok(Some(s));
            }
        }
        Ok(None)
    }

    /// Recomputes the value of every boundary vertex as the
    /// distance-weighted mean of all interior (non-boundary) vertex
    /// values: `sum(d(B, Pi) * value(Pi)) / sum(d(B, Pi))`.
    ///
    /// Weighting by raw distance — rather than inverse distance — means
    /// farther interior samples dominate. This is the behavior inherited
    /// from the original design; see
    /// [Complex::propagate_boundary_values_inverse_distance] for the
    /// corrected alternative.
    ///
    /// If there are no interior vertices yet, boundary values are left
    /// unchanged (a `0/0` division is treated as "no update").
    pub fn propagate_boundary_values(&mut self) {
        self.propagate_boundary_values_with(|d| d);
    }

    /// As [Complex::propagate_boundary_values], but weighting each
    /// interior sample by `1 / d(B, Pi)` instead of `d(B, Pi)` — an
    /// opt-in corrected mode that is never invoked automatically.
    pub fn propagate_boundary_values_inverse_distance(&mut self) {
        self.propagate_boundary_values_with(|d| if d == 0.0 { 0.0 } else { 1.0 / d });
    }

    fn propagate_boundary_values_with(&mut self, weight_fn: impl Fn(f64) -> f64) {
        let interior: Vec<(Point, f64)> = self
            .vertices
            .iter()
            .filter(|(_, lp)| !lp.point.is_boundary())
            .map(|(_, lp)| (lp.point.clone(), lp.value))
            .collect();
        if interior.is_empty() {
            return;
        }

        let boundary_ids: Vec<VertexId> = self
            .vertices
            .iter()
            .filter(|(_, lp)| lp.point.is_boundary())
            .map(|(id, _)| id)
            .collect();

        for id in boundary_ids {
            let boundary_point = self.vertices.get(id).point.clone();
            let mut sum_w = 0.0;
            let mut sum_wv = 0.0;
            for (p, v) in &interior {
                let w = weight_fn(boundary_point.distance(p));
                sum_w += w;
                sum_wv += w * v;
            }
            if sum_w != 0.0 {
                self.vertices.set_value(id, sum_wv / sum_w);
            }
        }
    }
}

/// The dimension range accepted by [Complex::new_empty] /
/// [Complex::new_with_envelope], re-exported here for callers that only
/// import `complex`.
pub const DIMENSION_RANGE: std::ops::RangeInclusive<usize> = MIN_DIMENSION..=MAX_DIMENSION;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_out_of_range_is_rejected() {
        assert!(matches!(
            Complex::new_empty(1),
            Err(PavageError::DimensionOutOfRange(1))
        ));
        assert!(matches!(
            Complex::new_empty(16),
            Err(PavageError::DimensionOutOfRange(16))
        ));
    }

    #[test]
    fn first_n_points_form_no_simplex() {
        let mut c = Complex::new_empty(2).unwrap();
        c.add_point(Point::new(&[0.0, 0.0], 2), 1.0).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn the_n_plus_first_point_forms_one_simplex() {
        let mut c = Complex::new_empty(2).unwrap();
        c.add_point(Point::new(&[0.0, 0.0], 2), 1.0).unwrap();
        c.add_point(Point::new(&[10.0, 0.0], 2), 2.0).unwrap();
        c.add_point(Point::new(&[0.0, 10.0], 2), 3.0).unwrap();
        assert_eq!(c.figures().count(), 1);
    }

    #[test]
    fn interpolation_is_exact_at_stored_vertices() {
        let mut c = Complex::new_empty(2).unwrap();
        c.add_point(Point::new(&[0.0, 0.0], 2), 1.0).unwrap();
        c.add_point(Point::new(&[10.0, 0.0], 2), 2.0).unwrap();
        c.add_point(Point::new(&[0.0, 10.0], 2), 3.0).unwrap();
        let value = c.interpolate(&Point::new(&[0.0, 0.0], 2)).unwrap();
        assert!((value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn barycentric_sanity_scenario() {
        let mut c = Complex::new_empty(2).unwrap();
        c.add_point(Point::new(&[0.0, 0.0], 2), 0.0).unwrap();
        c.add_point(Point::new(&[10.0, 0.0], 2), 10.0).unwrap();
        c.add_point(Point::new(&[0.0, 10.0], 2), 20.0).unwrap();
        let value = c.interpolate(&Point::new(&[2.0, 2.0], 2)).unwrap();
        // weights (0.6, 0.2, 0.2) against values (0, 10, 20).
        assert!((value - (0.6 * 0.0 + 0.2 * 10.0 + 0.2 * 20.0)).abs() < 1e-9);
    }

    #[test]
    fn insertion_idempotence_on_repeat_value() {
        let mut c = Complex::new_empty(2).unwrap();
        c.add_point(Point::new(&[0.0, 0.0], 2), 1.0).unwrap();
        c.add_point(Point::new(&[10.0, 0.0], 2), 2.0).unwrap();
        c.add_point(Point::new(&[0.0, 10.0], 2), 3.0).unwrap();
        let before = c.figures().count();
        c.add_point(Point::new(&[0.0, 0.0], 2), 1.0).unwrap();
        assert_eq!(c.figures().count(), before);
        assert!((c.interpolate(&Point::new(&[0.0, 0.0], 2)).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn insertion_overwrites_value_on_same_point() {
        let mut c = Complex::new_empty(2).unwrap();
        c.add_point(Point::new(&[0.0, 0.0], 2), 1.0).unwrap();
        c.add_point(Point::new(&[10.0, 0.0], 2), 2.0).unwrap();
        c.add_point(Point::new(&[0.0, 10.0], 2), 3.0).unwrap();
        c.add_point(Point::new(&[0.0, 0.0], 2), 99.0).unwrap();
        assert!((c.interpolate(&Point::new(&[0.0, 0.0], 2)).unwrap() - 99.0).abs() < 1e-9);
    }

    #[test]
    fn star_split_grows_registry_by_dim_per_enclosing_simplex() {
        // (0, 0) sits exactly on the shared edge Pmin-Pmax between the
        // two envelope triangles, which the strict face-exclusion test
        // (see crate::geometry::contains_strict) reports as outside of
        // both — an off-axis point is needed to land strictly inside one.
        let mut c = Complex::new_with_envelope(2, false).unwrap();
        let before = c.figures().count();
        assert_eq!(before, 2);
        c.add_point(Point::new(&[1.0, 1.0], 2), 7.0).unwrap();
        let after = c.figures().count();
        assert_eq!(after, 4);
        assert!((c.interpolate(&Point::new(&[1.0, 1.0], 2)).unwrap() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn star_split_conserves_volume() {
        let mut c = Complex::new_empty(2).unwrap();
        c.add_point(Point::new(&[0.0, 0.0], 2), 1.0).unwrap();
        c.add_point(Point::new(&[10.0, 0.0], 2), 2.0).unwrap();
        c.add_point(Point::new(&[0.0, 10.0], 2), 3.0).unwrap();
        let parent = c.figures().next().unwrap().clone();
        let parent_volume = signed_volume(&c.resolve(&parent)).unwrap().abs();

        // (2, 2) is strictly interior, so the single parent triangle splits
        // into exactly 3 children, none degenerate.
        c.add_point(Point::new(&[2.0, 2.0], 2), 0.0).unwrap();
        let children_volume: f64 = c
            .figures()
            .map(|s| signed_volume(&c.resolve(s)).unwrap().abs())
            .sum();

        assert!((children_volume - parent_volume).abs() < 1e-6 * parent_volume);
    }

    #[test]
    fn orphan_query_returns_zero() {
        let c = Complex::new_with_envelope(3, false).unwrap();
        let far = Point::new(&[1.0e6, 1.0e6, 1.0e6], 3);
        assert_eq!(c.interpolate(&far).unwrap(), 0.0);
    }

    #[test]
    fn boundary_propagation_single_interior_sample() {
        let mut c = Complex::new_with_envelope(2, true).unwrap();
        c.add_point(Point::new(&[50.0, 50.0], 2), 100.0).unwrap();
        c.propagate_boundary_values();
        for (_, lp) in c.single_points() {
            if lp.point.is_boundary() {
                assert!((lp.value - 100.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn boundary_propagation_no_interior_points_is_noop() {
        let mut c = Complex::new_with_envelope(2, false).unwrap();
        let before: Vec<f64> = c.single_points().map(|(_, lp)| lp.value).collect();
        c.propagate_boundary_values();
        let after: Vec<f64> = c.single_points().map(|(_, lp)| lp.value).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn every_simplex_vertex_resolves_in_store() {
        let c = Complex::new_with_envelope(3, false).unwrap();
        for s in c.figures() {
            for &id in s.vertices() {
                assert!(id.index() < c.vertices.len());
            }
        }
    }

    #[test]
    fn every_simplex_has_nonzero_volume() {
        let mut c = Complex::new_with_envelope(2, false).unwrap();
        c.add_point(Point::new(&[1.0, 1.0], 2), 5.0).unwrap();
        for s in c.figures() {
            let pts = c.resolve(s);
            assert!(signed_volume(&pts).unwrap().abs() > 0.0);
        }
    }
}
