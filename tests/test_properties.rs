use dempster_shafer::{CombinationRule, DiscreteElement, DiscreteSet, MassFunction, SetAlgebra};
use proptest::prelude::*;

const N: usize = 3;

fn nonempty_bits() -> impl Strategy<Value = u64> {
    1u64..(1u64 << N)
}

fn mass_function_strategy() -> impl Strategy<Value = MassFunction<DiscreteElement>> {
    prop::collection::vec((nonempty_bits(), 0.01f64..1.0), 1..5).prop_map(|entries| {
        let mut m = MassFunction::new(N);
        for (bits, weight) in entries {
            m.add_mass(DiscreteElement::from_bits(N, bits).unwrap(), weight)
                .unwrap();
        }
        m.normalise().unwrap();
        m
    })
}

fn masses_approx_equal(a: &MassFunction<DiscreteElement>, b: &MassFunction<DiscreteElement>) -> bool {
    let eps = 1e-6;
    let a_focals: Vec<_> = a.focal_elements().collect();
    let b_focals: Vec<_> = b.focal_elements().collect();
    if a_focals.len() != b_focals.len() {
        return false;
    }
    a_focals
        .iter()
        .all(|(e, m)| (b.mass(e) - m).abs() < eps)
}

proptest! {
    #[test]
    fn cardinality_matches_popcount(bits in 0u64..(1u64 << N)) {
        let e = DiscreteElement::from_bits(N, bits).unwrap();
        prop_assert_eq!(e.cardinality(), bits.count_ones());
    }

    #[test]
    fn set_algebra_laws_hold(a in 0u64..(1u64 << N), b in 0u64..(1u64 << N), c in 0u64..(1u64 << N)) {
        let a = DiscreteElement::from_bits(N, a).unwrap();
        let b = DiscreteElement::from_bits(N, b).unwrap();
        let c = DiscreteElement::from_bits(N, c).unwrap();

        prop_assert_eq!(a.union(&b).unwrap(), b.union(&a).unwrap());
        prop_assert_eq!(a.intersection(&b).unwrap(), b.intersection(&a).unwrap());
        prop_assert_eq!(
            a.union(&b).unwrap().union(&c).unwrap(),
            a.union(&b.union(&c).unwrap()).unwrap()
        );
        // De Morgan
        prop_assert_eq!(
            a.union(&b).unwrap().complement(),
            a.complement().intersection(&b.complement()).unwrap()
        );
        // a subset of b iff a n b == a iff a u b == b
        let subset = a.is_subset_of(&b).unwrap();
        prop_assert_eq!(subset, a.intersection(&b).unwrap() == a);
        prop_assert_eq!(subset, a.union(&b).unwrap() == b);
    }

    #[test]
    fn mass_conservation_after_normalise(m in mass_function_strategy()) {
        let total: f64 = m.focal_elements().map(|(_, mass)| mass).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        for (_, mass) in m.focal_elements() {
            prop_assert!(mass > 0.0);
        }
    }

    #[test]
    fn belief_never_exceeds_plausibility(m in mass_function_strategy(), query_bits in 0u64..(1u64 << N)) {
        let e = DiscreteElement::from_bits(N, query_bits).unwrap();
        let bel = m.belief(&e).unwrap();
        let pl = m.plausibility(&e).unwrap();
        prop_assert!(bel <= pl + 1e-9);
        prop_assert!(pl <= 1.0 + 1e-9);
    }

    #[test]
    fn bet_p_is_a_probability_distribution_over_singletons(m in mass_function_strategy()) {
        prop_assume!(m.conflict_mass() < 1e-9);
        let total: f64 = (0..N)
            .map(|k| m.bet_p(&DiscreteElement::atom(N, k).unwrap()).unwrap())
            .sum();
        prop_assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dempster_identity_with_vacuous_is_a_no_op(m in mass_function_strategy()) {
        let mut vacuous = MassFunction::new(N);
        vacuous.add_mass(DiscreteElement::complete(N), 1.0).unwrap();
        let combined = m.combine_dempster(&vacuous).unwrap();
        prop_assert!(masses_approx_equal(&m, &combined));
    }

    #[test]
    fn dempster_is_associative_on_zero_conflict_operands(
        m1 in mass_function_strategy(),
        m2 in mass_function_strategy(),
        m3 in mass_function_strategy(),
    ) {
        let (Ok(ab), Ok(bc)) = (m1.combine_dempster(&m2), m2.combine_dempster(&m3)) else {
            return Ok(());
        };
        prop_assume!(ab.conflict_mass() < 1e-9 && bc.conflict_mass() < 1e-9);

        let (Ok(left), Ok(right)) = (ab.combine_dempster(&m3), m1.combine_dempster(&bc)) else {
            return Ok(());
        };
        prop_assert!(masses_approx_equal(&left, &right));
    }

    #[test]
    fn binary_rules_are_commutative(m1 in mass_function_strategy(), m2 in mass_function_strategy()) {
        for rule in [
            CombinationRule::Smets,
            CombinationRule::Yager,
            CombinationRule::Disjunctive,
            CombinationRule::Averaging,
        ] {
            let ab = MassFunction::combine(&[m1.clone(), m2.clone()], rule).unwrap();
            let ba = MassFunction::combine(&[m2.clone(), m1.clone()], rule).unwrap();
            prop_assert!(masses_approx_equal(&ab, &ba));
        }

        if let (Ok(ab), Ok(ba)) = (m1.combine_dempster(&m2), m2.combine_dempster(&m1)) {
            prop_assert!(masses_approx_equal(&ab, &ba));
        }
    }
}

#[test]
fn power_set_size_is_two_to_the_n() {
    for n in 0..6 {
        let power_set = DiscreteSet::generate_power_set(n);
        assert_eq!(power_set.cardinality(), 1usize << n);
        assert_eq!(DiscreteSet::generate_atoms(n).cardinality(), n);
    }
}
