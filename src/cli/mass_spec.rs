//! Parses the tiny textual mini-language `dstool` accepts on the command
//! line for frames, elements, and mass functions.
//!
//! - A frame is a comma-separated list of world names: `A,B,C`.
//! - An element is a brace list of names (`{A,B}`), or the literals `Omega`
//!   (the full frame) / `Empty` (the empty set).
//! - A mass function is semicolon-separated `element:mass` pairs:
//!   `{A}:0.6;{A,B,C}:0.4`.

use anyhow::{bail, Context, Result};

use dempster_shafer::{DiscreteElement, MassFunction, ReferenceList, SetAlgebra};

pub fn parse_reference_list(spec: &str) -> Result<ReferenceList> {
    let names: Vec<&str> = spec.split(',').map(str::trim).collect();
    ReferenceList::new(names).context("invalid --frame")
}

pub fn parse_element(token: &str, refs: &ReferenceList) -> Result<DiscreteElement> {
    let token = token.trim();
    if token.eq_ignore_ascii_case("omega") || token == "Ω" {
        return Ok(DiscreteElement::complete(refs.size()));
    }
    if token.eq_ignore_ascii_case("empty") || token == "∅" {
        return Ok(DiscreteElement::empty(refs.size()));
    }
    let inner = token
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .with_context(|| format!("element `{token}` must be `{{name, ...}}`, `Omega`, or `Empty`"))?;
    let mut element = DiscreteElement::empty(refs.size());
    for name in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let idx = refs
            .index_of(name)
            .with_context(|| format!("`{name}` is not a world of this frame"))?;
        let atom = DiscreteElement::atom(refs.size(), idx)?;
        element = element.union(&atom)?;
    }
    Ok(element)
}

pub fn parse_mass_function(spec: &str, refs: &ReferenceList) -> Result<MassFunction<DiscreteElement>> {
    let mut mf = MassFunction::new(refs.size());
    for term in spec.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (elem_str, mass_str) = term
            .rsplit_once(':')
            .with_context(|| format!("mass term `{term}` must be `element:mass`"))?;
        let element = parse_element(elem_str, refs)?;
        let mass: f64 = mass_str
            .trim()
            .parse()
            .with_context(|| format!("`{mass_str}` is not a valid mass"))?;
        mf.add_mass(element, mass).context("invalid mass term")?;
    }
    if mf.focal_count() == 0 {
        bail!("a mass function needs at least one `element:mass` term");
    }
    Ok(mf)
}
