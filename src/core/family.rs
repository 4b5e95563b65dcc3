//! The capability abstraction mass-function algorithms are written against.
//!
//! `MassFunction<E>` never touches a concrete representation directly; it
//! only calls through this trait. `DiscreteElement` (`core::element`) is the
//! one concrete family shipped in this crate. An interval-valued family
//! would mirror the discrete case and plug into `core::mass` unchanged, but
//! is not implemented here.

use crate::error::DsResult;
use std::hash::Hash;

/// Set-theoretic operations a mass function's focal elements must support.
pub trait SetAlgebra: Clone + Eq + Hash {
    /// The empty subset of an `n`-world frame.
    fn empty(n: usize) -> Self;

    /// The full frame itself (the "complete" element, i.e. Ω).
    fn complete(n: usize) -> Self;

    /// Size of the frame this element is defined on.
    fn frame_size(&self) -> usize;

    /// `a ∪ b`. Fails with `IncompatibleFrameSize` unless `self` and `other`
    /// share a frame.
    fn union(&self, other: &Self) -> DsResult<Self>;

    /// `a ∩ b`.
    fn intersection(&self, other: &Self) -> DsResult<Self>;

    /// `a \ b`.
    fn difference(&self, other: &Self) -> DsResult<Self>;

    /// `¬a`, relative to this element's frame.
    fn complement(&self) -> Self;

    /// `a ⊆ b`.
    fn is_subset_of(&self, other: &Self) -> DsResult<bool>;

    /// `|a|`, the number of worlds in the subset.
    fn cardinality(&self) -> u32;

    /// `a = ∅`.
    fn is_empty_set(&self) -> bool {
        self.cardinality() == 0
    }
}
