//! Command-line surface for the `dstool` demo binary. Nothing here is part
//! of the library's public contract; it exists to drive `core`/`transform`
//! from literal arguments for ad-hoc inspection.

pub mod mass_spec;
pub mod opts;
