use dempster_shafer::{DiscreteElement, MassFunction, SetAlgebra};

fn el(n: usize, bits: u64) -> DiscreteElement {
    DiscreteElement::from_bits(n, bits).unwrap()
}

#[test]
fn s1_vacuous_mass_on_yes_no_frame() {
    let n = 2;
    let mut m = MassFunction::new(n);
    m.add_mass(DiscreteElement::complete(n), 1.0).unwrap();

    let yes = DiscreteElement::atom(n, 0).unwrap();
    assert_eq!(m.belief(&yes).unwrap(), 0.0);
    assert_eq!(m.plausibility(&yes).unwrap(), 1.0);
    assert!((m.bet_p(&yes).unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn s2_dempster_combination_of_two_conflicting_sources() {
    let n = 3;
    let mut m1 = MassFunction::new(n);
    m1.add_mass(el(n, 0b001), 0.6).unwrap();
    m1.add_mass(el(n, 0b111), 0.4).unwrap();

    let mut m2 = MassFunction::new(n);
    m2.add_mass(el(n, 0b010), 0.6).unwrap();
    m2.add_mass(el(n, 0b111), 0.4).unwrap();

    let combined = m1.combine_dempster(&m2).unwrap();

    assert!((combined.mass(&el(n, 0b001)) - 0.375).abs() < 1e-9);
    assert!((combined.mass(&el(n, 0b010)) - 0.375).abs() < 1e-9);
    assert!((combined.mass(&el(n, 0b111)) - 0.25).abs() < 1e-9);
}

#[test]
fn s3_bitmap_cardinality_and_complement() {
    let n = 5;
    let e = el(n, 0b01011);
    assert_eq!(e.cardinality(), 3);
    let c = e.complement();
    assert_eq!(c.cardinality(), 2);
    assert_eq!(e.union(&c).unwrap(), DiscreteElement::complete(n));
    assert_eq!(e.intersection(&c).unwrap(), DiscreteElement::empty(n));
}

#[test]
fn s4_discounting_by_one_half() {
    let n = 2;
    let mut m = MassFunction::new(n);
    m.add_mass(el(n, 0b01), 0.7).unwrap();
    m.add_mass(el(n, 0b11), 0.3).unwrap();

    let discounted = m.discount(0.5).unwrap();
    assert!((discounted.mass(&el(n, 0b01)) - 0.35).abs() < 1e-12);
    assert!((discounted.mass(&el(n, 0b11)) - 0.65).abs() < 1e-12);
}

#[test]
fn s6_total_conflict_raises_combination_undefined() {
    let n = 2;
    let mut m1 = MassFunction::new(n);
    m1.add_mass(el(n, 0b01), 1.0).unwrap();

    let mut m2 = MassFunction::new(n);
    m2.add_mass(el(n, 0b10), 1.0).unwrap();

    let err = m1.combine_dempster(&m2).unwrap_err();
    assert!(matches!(
        err,
        dempster_shafer::DsError::CombinationUndefined { .. }
    ));
}

#[test]
fn smets_keeps_conflict_mass_unnormalised() {
    let n = 2;
    let mut m1 = MassFunction::new(n);
    m1.add_mass(el(n, 0b01), 1.0).unwrap();

    let mut m2 = MassFunction::new(n);
    m2.add_mass(el(n, 0b10), 1.0).unwrap();

    let combined = m1.combine_smets(&m2).unwrap();
    assert!((combined.conflict_mass() - 1.0).abs() < 1e-12);
}

#[test]
fn yager_moves_conflict_onto_the_full_frame() {
    let n = 2;
    let mut m1 = MassFunction::new(n);
    m1.add_mass(el(n, 0b01), 1.0).unwrap();

    let mut m2 = MassFunction::new(n);
    m2.add_mass(el(n, 0b10), 1.0).unwrap();

    let combined = m1.combine_yager(&m2).unwrap();
    assert_eq!(combined.conflict_mass(), 0.0);
    assert!((combined.mass(&DiscreteElement::complete(n)) - 1.0).abs() < 1e-12);
}

#[test]
fn conditioning_restricts_to_a_subset_then_deconditioning_round_trips() {
    let n = 3;
    let mut m = MassFunction::new(n);
    m.add_mass(el(n, 0b001), 0.6).unwrap();
    m.add_mass(el(n, 0b111), 0.4).unwrap();

    let e = el(n, 0b011);
    let conditioned = m.condition(&e).unwrap();
    for (f, _) in conditioned.focal_elements() {
        assert!(f.is_subset_of(&e).unwrap());
    }

    let deconditioned = conditioned.decondition(&e).unwrap();
    let recondition = deconditioned.condition(&e).unwrap();
    let a = el(n, 0b001);
    assert!((recondition.mass(&a) - conditioned.mass(&a)).abs() < 1e-9);
}

#[test]
fn normalise_drops_negligible_focals_and_rescales() {
    let n = 2;
    let mut m = MassFunction::new(n);
    m.add_mass(el(n, 0b01), 0.4).unwrap();
    m.add_mass(el(n, 0b10), 0.4).unwrap();
    m.add_mass(el(n, 0b11), 1e-15).unwrap();
    m.normalise().unwrap();

    assert_eq!(m.mass(&el(n, 0b11)), 0.0);
    let total: f64 = m.focal_elements().map(|(_, mass)| mass).sum();
    assert!((total - 1.0).abs() < 1e-9);
}
