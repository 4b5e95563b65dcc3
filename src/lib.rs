//! A Dempster–Shafer evidence theory library: mass functions over a finite
//! frame of discernment, the combination and transformation operators of the
//! theory, and the belief measures they induce.
//!
//! `core` is the dependency-free algebra (elements, sets, mass functions);
//! `transform` propagates mass functions between frames via refinements;
//! `boundary` names the external contracts (persistence, sensors, random
//! generation) this crate consumes but does not implement.

pub mod boundary;
pub mod cli;
pub mod core;
pub mod error;
pub mod transform;

pub use crate::core::{
    CombinationRule, DiscreteElement, DiscreteSet, MassFunction, MaxKind, ReferenceList, SetAlgebra,
};
pub use crate::error::{DsError, DsResult};
pub use crate::transform::{BeliefTransformer, Refinement};
