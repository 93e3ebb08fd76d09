//! Indexed fact storage.

use crate::entity::{ClassId, Individual, PropertyId, Value};
use oxrdf::{BlankNode, Literal};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// Whether an assertion states or denies a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    /// An `owl:NegativePropertyAssertion`.
    Negative,
}

/// A property assertion as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assertion {
    pub subject: Individual,
    pub property: PropertyId,
    /// An individual for object assertions, a literal for datatype assertions.
    pub object: Value,
    pub polarity: Polarity,
}

impl Assertion {
    /// `true` for object property assertions.
    pub fn is_object(&self) -> bool {
        matches!(self.object, Value::Individual(_))
    }
}

/// A non-logical statement about an individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub subject: Individual,
    pub property: PropertyId,
    pub value: Value,
}

/// An `owl:AllDifferent` axiom: its members are pairwise different.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllDifferentGroup {
    id: BlankNode,
    members: Vec<Individual>,
}

impl AllDifferentGroup {
    pub(crate) fn new(members: Vec<Individual>) -> Self {
        Self {
            id: BlankNode::default(),
            members,
        }
    }

    /// The blank node identifying the axiom.
    pub fn id(&self) -> &BlankNode {
        &self.id
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }
}

/// Assertions of one flavor, indexed by property then subject.
///
/// `O` is [`Individual`] for object assertions and [`Literal`] for datatype assertions.
#[derive(Debug, Clone)]
pub struct AssertionIndex<O> {
    by_property: FxHashMap<PropertyId, FxHashMap<Individual, FxHashSet<O>>>,
    len: usize,
}

impl<O> Default for AssertionIndex<O> {
    fn default() -> Self {
        Self {
            by_property: FxHashMap::default(),
            len: 0,
        }
    }
}

impl<O: Eq + Hash> AssertionIndex<O> {
    /// Adds an assertion. Returns `false` if it was already there.
    pub(crate) fn insert(&mut self, subject: Individual, property: PropertyId, object: O) -> bool {
        let inserted = self
            .by_property
            .entry(property)
            .or_default()
            .entry(subject)
            .or_default()
            .insert(object);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn contains(&self, subject: &Individual, property: &PropertyId, object: &O) -> bool {
        self.objects(subject, property)
            .is_some_and(|objects| objects.contains(object))
    }

    /// The objects asserted for `subject` through exactly `property`.
    pub fn objects(&self, subject: &Individual, property: &PropertyId) -> Option<&FxHashSet<O>> {
        self.by_property.get(property)?.get(subject)
    }

    /// All `(subject, objects)` groups asserted through exactly `property`.
    pub fn subjects_of(
        &self,
        property: &PropertyId,
    ) -> impl Iterator<Item = (&Individual, &FxHashSet<O>)> {
        self.by_property.get(property).into_iter().flatten()
    }

    /// Pattern match lookup: `None` components are wildcards.
    pub fn select<'a>(
        &'a self,
        subject: Option<&'a Individual>,
        property: Option<&'a PropertyId>,
        object: Option<&'a O>,
    ) -> impl Iterator<Item = (&'a Individual, &'a PropertyId, &'a O)> + 'a {
        self.by_property
            .iter()
            .filter(move |(p, _)| property.is_none_or(|property| *p == property))
            .flat_map(move |(p, subjects)| {
                subjects
                    .iter()
                    .filter(move |(s, _)| subject.is_none_or(|subject| *s == subject))
                    .flat_map(move |(s, objects)| {
                        objects
                            .iter()
                            .filter(move |o| object.is_none_or(|object| *o == object))
                            .map(move |o| (s, p, o))
                    })
            })
    }

    /// Iterates over every assertion.
    pub fn iter(&self) -> impl Iterator<Item = (&Individual, &PropertyId, &O)> {
        self.select(None, None, None)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A symmetric relation between individuals (`owl:sameAs`, `owl:differentFrom`).
///
/// Both directions are materialized on insertion. The declared pairs are kept
/// apart so they can be listed once each.
#[derive(Debug, Clone, Default)]
pub struct SymmetricRelation {
    edges: FxHashMap<Individual, FxHashSet<Individual>>,
    declared: Vec<(Individual, Individual)>,
}

impl SymmetricRelation {
    /// Returns `false` if the pair (in any direction) was already there.
    pub(crate) fn insert(&mut self, a: Individual, b: Individual) -> bool {
        if self.contains(&a, &b) {
            return false;
        }
        self.edges.entry(a.clone()).or_default().insert(b.clone());
        self.edges.entry(b.clone()).or_default().insert(a.clone());
        self.declared.push((a, b));
        true
    }

    pub fn contains(&self, a: &Individual, b: &Individual) -> bool {
        self.edges.get(a).is_some_and(|n| n.contains(b))
    }

    /// Direct neighbours of `individual`.
    pub fn neighbours(&self, individual: &Individual) -> impl Iterator<Item = &Individual> {
        self.edges.get(individual).into_iter().flatten()
    }

    /// The declared pairs, once each, in declaration order.
    pub fn pairs(&self) -> &[(Individual, Individual)] {
        &self.declared
    }
}

/// Everything an [`IndividualStore`](super::IndividualStore) knows.
#[derive(Debug, Clone, Default)]
pub struct FactIndex {
    pub(crate) individuals: FxHashSet<Individual>,
    pub(crate) types: FxHashMap<Individual, FxHashSet<ClassId>>,
    pub(crate) object_assertions: AssertionIndex<Individual>,
    pub(crate) datatype_assertions: AssertionIndex<Literal>,
    pub(crate) negative_object_assertions: AssertionIndex<Individual>,
    pub(crate) negative_datatype_assertions: AssertionIndex<Literal>,
    pub(crate) same_as: SymmetricRelation,
    pub(crate) different_from: SymmetricRelation,
    pub(crate) all_different: Vec<AllDifferentGroup>,
    pub(crate) all_different_membership: FxHashMap<Individual, Vec<usize>>,
    pub(crate) annotations: FxHashMap<Individual, Vec<(PropertyId, Value)>>,
}

impl FactIndex {
    /// The individuals sharing an `owl:AllDifferent` group with `individual`.
    pub(crate) fn all_different_peers<'a>(
        &'a self,
        individual: &'a Individual,
    ) -> impl Iterator<Item = &'a Individual> + 'a {
        self.all_different_membership
            .get(individual)
            .into_iter()
            .flatten()
            .filter_map(|i| self.all_different.get(*i))
            .flat_map(|group| group.members.iter())
            .filter(move |member| *member != individual)
    }

    pub(crate) fn push_all_different(&mut self, group: AllDifferentGroup) {
        let position = self.all_different.len();
        for member in &group.members {
            self.all_different_membership
                .entry(member.clone())
                .or_default()
                .push(position);
        }
        self.all_different.push(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    fn individual(name: &str) -> Individual {
        NamedNode::new(format!("http://example.com/{name}")).unwrap().into()
    }

    fn property(name: &str) -> PropertyId {
        PropertyId::new_from_iri(format!("http://example.com/{name}")).unwrap()
    }

    #[test]
    fn assertion_index_select() {
        let mut index = AssertionIndex::default();
        assert!(index.insert(individual("a"), property("p"), individual("b")));
        assert!(!index.insert(individual("a"), property("p"), individual("b")));
        index.insert(individual("a"), property("q"), individual("c"));
        index.insert(individual("d"), property("p"), individual("c"));
        assert_eq!(index.len(), 3);

        let a = individual("a");
        let p = property("p");
        let c = individual("c");
        assert_eq!(index.select(Some(&a), None, None).count(), 2);
        assert_eq!(index.select(None, Some(&p), None).count(), 2);
        assert_eq!(index.select(None, None, Some(&c)).count(), 2);
        assert_eq!(index.select(Some(&a), Some(&p), Some(&c)).count(), 0);
        assert!(index.contains(&a, &p, &individual("b")));
    }

    #[test]
    fn symmetric_relation_materializes_inverse() {
        let mut relation = SymmetricRelation::default();
        assert!(relation.insert(individual("a"), individual("b")));
        assert!(!relation.insert(individual("b"), individual("a")));
        assert!(relation.contains(&individual("b"), &individual("a")));
        assert_eq!(relation.pairs().len(), 1);
    }

    #[test]
    fn all_different_peers_exclude_self() {
        let mut facts = FactIndex::default();
        facts.push_all_different(AllDifferentGroup::new(vec![
            individual("a"),
            individual("b"),
            individual("c"),
        ]));
        let a = individual("a");
        let peers: FxHashSet<_> = facts.all_different_peers(&a).cloned().collect();
        assert_eq!(peers.len(), 2);
        assert!(!peers.contains(&a));
    }
}
