//! The failure taxonomy shared by every fallible operation in this crate.

use displaydoc::Display;
use thiserror::Error;

/// A single catchable failure category raised by the belief-function core.
/// Every fallible `core`/`transform` operation returns `Result<T, DsError>`
/// so callers can `match` on the kind instead of string-sniffing a message.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum DsError {
    /// operands are defined on frames of different size ({left} vs {right})
    IncompatibleFrameSize { left: usize, right: usize },
    /// reference list has {actual} names but the frame has {expected}
    IncompatibleReferenceList { expected: usize, actual: usize },
    /// focal element is defined on a frame of size {element_n}, mass function is on {frame_n}
    IncompatiblePowerSet { frame_n: usize, element_n: usize },
    /// element needs {needed} bits, which does not fit in a machine integer ({limit})
    ElementTooBigForInteger { needed: usize, limit: usize },
    /// combination is undefined: {reason}
    CombinationUndefined { reason: &'static str },
    /// operation rejects the empty element
    EmptyElement,
    /// mass function has no focal elements
    EmptyMassFunction,
    /// combine requires at least {needed} mass functions, got {got}
    NotEnoughMassFunctions { needed: usize, got: usize },
    /// pairwise combination requires both operands on the same frame ({left} vs {right})
    IncompatibleMassFunction { left: usize, right: usize },
    /// refinement set is not a valid belief model: {reason}
    InvalidBeliefModel { reason: String },
    /// no refinement registered for source frame `{name}`
    ModelDoesNotExist { name: String },
    /// belief-function constructor received invalid parameters: {reason}
    InvalidBeliefConstructor { reason: &'static str },
}

/// Convenience alias used throughout `core` and `transform`.
pub type DsResult<T> = Result<T, DsError>;
