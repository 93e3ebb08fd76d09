//! End-to-end scenarios and algebraic laws of the A-BOX.

use oxabox::{
    ClassId, ClassMembership, DiagnosticKind, Individual, IndividualStore, PropertyId,
    Restriction, RestrictionKind, TBox,
};
use oxrdf::NamedNode;
use rustc_hash::FxHashSet;

fn test_individual(name: &str) -> Individual {
    NamedNode::new(format!("http://example.org/{name}"))
        .unwrap()
        .into()
}

fn test_class(name: &str) -> ClassId {
    ClassId::new_from_iri(format!("http://example.org/{name}")).unwrap()
}

fn test_property(name: &str) -> PropertyId {
    PropertyId::new_from_iri(format!("http://example.org/{name}")).unwrap()
}

fn set<const N: usize>(names: [&str; N]) -> FxHashSet<Individual> {
    names.into_iter().map(test_individual).collect()
}

#[test]
fn test_max_cardinality_scenario() {
    let p = test_property("objProp");
    let mut store = IndividualStore::new();
    for name in ["i1", "i2", "i3"] {
        assert!(store.declare_individual(test_individual(name)).is_applied());
    }
    assert!(
        store
            .assert_object(test_individual("i1"), p.clone(), test_individual("i2"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("i1"), p.clone(), test_individual("i3"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("i2"), p.clone(), test_individual("i3"))
            .is_applied()
    );

    let mut tbox = TBox::new();
    tbox.declare_restriction(
        test_class("R"),
        Restriction::new(p, RestrictionKind::MaxCardinality(1)).unwrap(),
    );
    let membership = ClassMembership::new(&store, &tbox);
    assert_eq!(
        membership.individuals_of(&test_class("R")).unwrap(),
        set(["i2", "i3"])
    );
}

#[test]
fn test_same_as_chain_scenario() {
    let mut store = IndividualStore::new();
    assert!(
        store
            .declare_same_as(test_individual("A"), test_individual("B"))
            .unwrap()
            .is_applied()
    );
    assert!(
        store
            .declare_same_as(test_individual("B"), test_individual("C"))
            .unwrap()
            .is_applied()
    );

    assert!(store.is_same(&test_individual("A"), &test_individual("C")));
    assert!(store.is_same(&test_individual("C"), &test_individual("A")));
    assert_eq!(store.same_as_closure(&test_individual("A")), set(["B", "C"]));
}

#[test]
fn test_different_from_blocks_same_as_scenario() {
    let mut store = IndividualStore::new();
    assert!(
        store
            .declare_different_from(test_individual("A"), test_individual("B"))
            .unwrap()
            .is_applied()
    );
    let outcome = store
        .declare_same_as(test_individual("A"), test_individual("B"))
        .unwrap();
    assert_eq!(
        outcome.diagnostic().map(|d| d.kind()),
        Some(DiagnosticKind::SameAsConflictsWithDifferentFrom)
    );
    assert!(!store.is_same(&test_individual("A"), &test_individual("B")));
    assert!(store.same_as_facts().is_empty());
    assert_eq!(store.different_from_facts().len(), 1);
}

#[test]
fn test_has_self_scenario() {
    let p = test_property("objProp");
    let mut store = IndividualStore::new();
    assert!(
        store
            .assert_object(test_individual("i1"), p.clone(), test_individual("i1"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("i1"), p.clone(), test_individual("i3"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("i3"), p.clone(), test_individual("i3"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("i4"), p.clone(), test_individual("i1"))
            .is_applied()
    );

    let mut tbox = TBox::new();
    tbox.declare_restriction(
        test_class("Self"),
        Restriction::new(p.clone(), RestrictionKind::HasSelf(true)).unwrap(),
    )
    .declare_restriction(
        test_class("NotSelf"),
        Restriction::new(p, RestrictionKind::HasSelf(false)).unwrap(),
    );
    let membership = ClassMembership::new(&store, &tbox);
    assert_eq!(
        membership.individuals_of(&test_class("Self")).unwrap(),
        set(["i1", "i3"])
    );
    assert_eq!(
        membership.individuals_of(&test_class("NotSelf")).unwrap(),
        set(["i4"])
    );
}

#[test]
fn test_symmetry() {
    let mut store = IndividualStore::new();
    assert!(
        store
            .declare_same_as(test_individual("a"), test_individual("b"))
            .unwrap()
            .is_applied()
    );
    assert!(
        store
            .declare_different_from(test_individual("c"), test_individual("d"))
            .unwrap()
            .is_applied()
    );
    assert!(store.is_same(&test_individual("b"), &test_individual("a")));
    assert!(store.is_different(&test_individual("d"), &test_individual("c")));
}

#[test]
fn test_long_same_as_cycle_terminates() {
    let mut store = IndividualStore::new();
    let length = 500;
    for i in 0..length {
        let outcome = store
            .declare_same_as(
                test_individual(&format!("n{i}")),
                test_individual(&format!("n{}", (i + 1) % length)),
            )
            .unwrap();
        assert!(outcome.is_applied());
    }
    let closure = store.same_as_closure(&test_individual("n0"));
    assert_eq!(closure.len(), length - 1);
    assert!(store.is_same(&test_individual("n250"), &test_individual("n0")));
}

#[test]
fn test_all_different_is_pairwise() {
    let mut store = IndividualStore::new();
    assert!(
        store
            .declare_all_different([
                test_individual("a"),
                test_individual("b"),
                test_individual("c"),
            ])
            .unwrap()
            .is_applied()
    );
    let mut pairwise = IndividualStore::new();
    for (x, y) in [("a", "b"), ("b", "c"), ("a", "c")] {
        assert!(
            pairwise
                .declare_different_from(test_individual(x), test_individual(y))
                .unwrap()
                .is_applied()
        );
    }
    for (x, y) in [("a", "b"), ("b", "c"), ("a", "c"), ("c", "a")] {
        assert!(store.is_different(&test_individual(x), &test_individual(y)));
        assert!(pairwise.is_different(&test_individual(x), &test_individual(y)));
    }
    for name in ["a", "b", "c"] {
        assert_eq!(
            store.different_from_closure(&test_individual(name)),
            pairwise.different_from_closure(&test_individual(name))
        );
    }
}

#[test]
fn test_cardinality_boundaries() {
    let p = test_property("p");
    let c = test_class("C");
    let mut store = IndividualStore::new();
    assert!(store.declare_individual(test_individual("none")).is_applied());
    assert!(
        store
            .assert_object(test_individual("one"), p.clone(), test_individual("x"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("two"), p.clone(), test_individual("x"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("two"), p.clone(), test_individual("y"))
            .is_applied()
    );
    assert!(store.declare_type(test_individual("y"), c.clone()).is_applied());

    let mut tbox = TBox::new();
    let restrictions = [
        ("Min0", RestrictionKind::MinCardinality(0)),
        ("Max0", RestrictionKind::MaxCardinality(0)),
        ("Exactly1", RestrictionKind::Cardinality(1)),
        ("Exactly2", RestrictionKind::Cardinality(2)),
        ("Between1And2", RestrictionKind::MinMaxCardinality { min: 1, max: 2 }),
        (
            "QualifiedMax0",
            RestrictionKind::MaxQualifiedCardinality {
                max: 0,
                on_class: c.clone(),
            },
        ),
        (
            "QualifiedExactly1",
            RestrictionKind::QualifiedCardinality {
                cardinality: 1,
                on_class: c,
            },
        ),
    ];
    for (name, kind) in restrictions {
        tbox.declare_restriction(test_class(name), Restriction::new(p.clone(), kind).unwrap());
    }
    let membership = ClassMembership::new(&store, &tbox);
    let members = |name: &str| membership.individuals_of(&test_class(name)).unwrap();

    assert_eq!(members("Min0"), set(["none", "one", "two", "x", "y"]));
    assert_eq!(members("Max0"), set(["none", "x", "y"]));
    assert_eq!(members("Exactly1"), set(["one"]));
    assert_eq!(members("Exactly2"), set(["two"]));
    assert_eq!(members("Between1And2"), set(["one", "two"]));
    // "one" asserts p but never towards a C
    assert_eq!(members("QualifiedMax0"), set(["none", "one", "x", "y"]));
    assert_eq!(members("QualifiedExactly1"), set(["two"]));
}

#[test]
fn test_qualified_cardinality_uses_same_as_of_on_class_members() {
    let p = test_property("p");
    let c = test_class("C");
    let mut store = IndividualStore::new();
    assert!(store.declare_type(test_individual("x"), c.clone()).is_applied());
    assert!(
        store
            .declare_same_as(test_individual("x"), test_individual("x2"))
            .unwrap()
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("a"), p.clone(), test_individual("x2"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("b"), p.clone(), test_individual("z"))
            .is_applied()
    );

    let mut tbox = TBox::new();
    tbox.declare_restriction(
        test_class("R"),
        Restriction::new(
            p,
            RestrictionKind::MinQualifiedCardinality {
                min: 1,
                on_class: c,
            },
        )
        .unwrap(),
    );
    let membership = ClassMembership::new(&store, &tbox);
    assert_eq!(membership.individuals_of(&test_class("R")).unwrap(), set(["a"]));
}

#[test]
fn test_values_from_need_an_assertion() {
    let p = test_property("p");
    let c = test_class("C");
    let mut store = IndividualStore::new();
    assert!(store.declare_type(test_individual("x"), c.clone()).is_applied());
    assert!(store.declare_individual(test_individual("lonely")).is_applied());
    assert!(
        store
            .assert_object(test_individual("all"), p.clone(), test_individual("x"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("mixed"), p.clone(), test_individual("x"))
            .is_applied()
    );
    assert!(
        store
            .assert_object(test_individual("mixed"), p.clone(), test_individual("y"))
            .is_applied()
    );

    let mut tbox = TBox::new();
    tbox.declare_restriction(
        test_class("All"),
        Restriction::new(p.clone(), RestrictionKind::AllValuesFrom(c.clone())).unwrap(),
    )
    .declare_restriction(
        test_class("Some"),
        Restriction::new(p, RestrictionKind::SomeValuesFrom(c)).unwrap(),
    );
    let membership = ClassMembership::new(&store, &tbox);
    let all = membership.individuals_of(&test_class("All")).unwrap();
    let some = membership.individuals_of(&test_class("Some")).unwrap();
    assert_eq!(all, set(["all"]));
    assert_eq!(some, set(["all", "mixed"]));
    assert!(!all.contains(&test_individual("lonely")));
    assert!(!some.contains(&test_individual("lonely")));
}

#[test]
fn test_composite_algebra() {
    let mut store = IndividualStore::new();
    assert!(store.declare_type(test_individual("a"), test_class("A")).is_applied());
    assert!(store.declare_type(test_individual("ab"), test_class("A")).is_applied());
    assert!(store.declare_type(test_individual("ab"), test_class("B")).is_applied());
    assert!(store.declare_type(test_individual("b"), test_class("B")).is_applied());
    assert!(store.declare_individual(test_individual("none")).is_applied());

    let mut tbox = TBox::new();
    tbox.declare_union(test_class("Union"), [test_class("A"), test_class("B")])
        .declare_intersection(test_class("Intersection"), [test_class("A"), test_class("B")])
        .declare_complement(test_class("NotA"), test_class("A"))
        .declare_complement(test_class("NotNotA"), test_class("NotA"));
    let membership = ClassMembership::new(&store, &tbox);
    let members = |name: &str| membership.individuals_of(&test_class(name)).unwrap();

    let a = members("A");
    let b = members("B");
    assert_eq!(members("Union"), a.union(&b).cloned().collect());
    assert_eq!(members("Intersection"), a.intersection(&b).cloned().collect());
    assert_eq!(members("NotA"), set(["b", "none"]));
    assert_eq!(members("NotNotA"), a);
}

#[test]
fn test_enumeration_is_closed() {
    let mut store = IndividualStore::new();
    assert!(
        store
            .declare_same_as(test_individual("a"), test_individual("a2"))
            .unwrap()
            .is_applied()
    );
    let mut tbox = TBox::new();
    tbox.declare_enumeration(test_class("E"), [test_individual("a"), test_individual("z")]);
    let membership = ClassMembership::new(&store, &tbox);
    assert_eq!(
        membership.individuals_of(&test_class("E")).unwrap(),
        set(["a", "z"])
    );
}
