//! The dependency-free algebraic core: frames, elements, sets, mass
//! functions. Nothing in this module touches I/O, CLI parsing, or any
//! boundary adapter.

pub mod element;
pub mod family;
pub mod mass;
pub mod reference_list;
pub mod set;

pub use element::DiscreteElement;
pub use family::SetAlgebra;
pub use mass::{CombinationRule, MassFunction, MaxKind};
pub use reference_list::ReferenceList;
pub use set::DiscreteSet;
