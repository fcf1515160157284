//! Simplices and the registry that partitions the envelope.
use rustc_hash::FxHashSet;

use crate::vertex::VertexId;

/// An ordered `(N+1)`-tuple of vertex handles. Two simplices are equal
/// iff their handle tuples are equal as ordered tuples — the registry
/// deduplicates on exactly this key, so the *same* N+1 vertices inserted
/// in a different order form a distinct entry. Every insertion path in
/// [crate::complex] is careful to build simplices in a canonical order
/// (the parent's order, with one vertex substituted) so that this never
/// produces accidental duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Simplex(pub(crate) Box<[VertexId]>);

impl Simplex {
    pub fn new(vertices: Vec<VertexId>) -> Simplex {
        Simplex(vertices.into_boxed_slice())
    }

    /// The N+1 vertex handles of this simplex, in the order they were
    /// built.
    pub fn vertices(&self) -> &[VertexId] {
        &self.0
    }

    /// `N`, i.e. one less than the number of vertices.
    pub fn dim(&self) -> usize {
        self.0.len() - 1
    }
}

/// A deduplicating set of simplices. Ordering of iteration is not
/// observable; membership is keyed by the ordered handle tuple.
#[derive(Debug, Default, Clone)]
pub struct SimplexRegistry {
    simplices: FxHashSet<Simplex>,
}

impl SimplexRegistry {
    pub fn new() -> SimplexRegistry {
        SimplexRegistry {
            simplices: FxHashSet::default(),
        }
    }

    /// Inserts `s`, idempotent on duplicates. Returns `true` if this was
    /// a new simplex.
    pub fn insert(&mut self, s: Simplex) -> bool {
        self.simplices.insert(s)
    }

    /// Removes `s`, returning `true` if it was present.
    pub fn erase(&mut self, s: &Simplex) -> bool {
        self.simplices.remove(s)
    }

    pub fn contains(&self, s: &Simplex) -> bool {
        self.simplices.contains(s)
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Simplex> {
        self.simplices.iter()
    }
}
