use dempster_shafer::{DiscreteElement, DiscreteSet, SetAlgebra};

#[test]
fn generate_atoms_and_power_set_sizes() {
    let atoms = DiscreteSet::generate_atoms(4);
    assert_eq!(atoms.cardinality(), 4);

    let power_set = DiscreteSet::generate_power_set(4);
    assert_eq!(power_set.cardinality(), 16);

    let mut seen = std::collections::HashSet::new();
    for e in power_set.iter() {
        assert!(seen.insert(format!("{e}")), "duplicate element in power set");
    }
}

#[test]
fn supersets_and_subsets_of_an_atom_on_a_three_world_frame() {
    let atom = DiscreteElement::atom(3, 1).unwrap();

    let supersets = DiscreteSet::supersets_of(&atom).unwrap();
    assert_eq!(supersets.cardinality(), 4);
    for e in supersets.iter() {
        assert!(atom.is_subset_of(e).unwrap());
    }

    let subsets = DiscreteSet::subsets_of(&atom).unwrap();
    assert_eq!(subsets.cardinality(), 2);
    for e in subsets.iter() {
        assert!(e.is_subset_of(&atom).unwrap());
    }
}

#[test]
fn add_is_duplicate_free_and_frame_checked() {
    let mut set = DiscreteSet::new(3);
    let e = DiscreteElement::from_bits(3, 0b101).unwrap();
    assert!(set.add(e.clone()).unwrap());
    assert!(!set.add(e.clone()).unwrap());
    assert_eq!(set.cardinality(), 1);
    assert!(set.add(DiscreteElement::empty(4)).is_err());
}

#[test]
fn remove_drops_membership() {
    let mut set = DiscreteSet::generate_atoms(3);
    let atom = DiscreteElement::atom(3, 0).unwrap();
    assert!(set.contains(&atom));
    assert!(set.remove(&atom));
    assert!(!set.contains(&atom));
    assert_eq!(set.cardinality(), 2);
}
