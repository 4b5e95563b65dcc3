//! Contracts for the three external collaborators this crate names but does
//! not implement: persistence, sensor-driven construction, random mass
//! generation. No file parsing, no RNG dependency, no temporal bookkeeping
//! lives in this crate; these traits are the seam a downstream crate
//! implements against.

use crate::core::{DiscreteElement, MassFunction, ReferenceList};
use crate::error::DsResult;

/// Structural read/write hooks for a belief-model store. Two historical file
/// formats exist for this (a directory tree of human-readable files; a
/// single hierarchical-markup document) — this crate does not parse either;
/// an implementor maps its chosen format onto these entries.
pub trait RefinementStore {
    /// Names of every refinement entry held by the store.
    fn refinement_names(&self) -> DsResult<Vec<String>>;

    /// The source frame of a named refinement.
    fn source_frame(&self, name: &str) -> DsResult<ReferenceList>;

    /// The destination frame shared by every refinement in the store.
    fn destination_frame(&self) -> DsResult<ReferenceList>;

    /// The destination-frame image of a single source world.
    fn destination_image(&self, name: &str, source_world: usize) -> DsResult<DiscreteElement>;
}

/// Maps a scalar sensor reading to a mass function via piecewise-linear
/// interpolation between calibration points. Temporal policies
/// (tempo-specificity: discount the last output toward vacuity when no new
/// reading arrives; tempo-fusion: Dempster-combine a new reading with a
/// discounted last output) are caller responsibilities built from
/// [`crate::core::MassFunction::discount`] and
/// [`crate::core::MassFunction::combine_dempster`] — this trait only names
/// the per-reading calibration step.
pub trait SensorModel {
    /// Frame the produced mass functions are defined on.
    fn frame_size(&self) -> usize;

    /// Calibrate a single scalar reading into a mass function.
    fn calibrate(&self, reading: f64) -> DsResult<MassFunction<DiscreteElement>>;
}

/// Draws a random mass function given `(n, k)`: `k` distinct non-empty
/// subsets of an `n`-world frame with uniform-random positive masses,
/// normalised. Implementations must reject `k > 2^n - 1` at construction
/// (there are at most `2^n - 1` non-empty proper-or-not subsets to draw
/// without replacement) rather than looping on redraws that may not
/// terminate as `k` approaches that bound.
pub trait MassFunctionSampler {
    fn sample(&mut self, n: usize, k: usize) -> DsResult<MassFunction<DiscreteElement>>;
}
