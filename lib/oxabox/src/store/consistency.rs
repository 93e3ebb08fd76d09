//! Compatibility checks run before every mutation.
//!
//! The checks look at closures, not only at the declared facts: asserting
//! `sameAs(a, c)` is refused when `differentFrom(b, c)` and `sameAs(a, b)` hold.

use crate::closure::RelationClosure;
use crate::entity::{Individual, PropertyId};
use crate::literal::literal_value_eq;
use crate::store::facts::{AssertionIndex, FactIndex};
use oxrdf::Literal;
use rustc_hash::FxHashSet;

/// Read-only predicates deciding if a candidate fact fits the store.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyChecker<'a> {
    facts: &'a FactIndex,
}

impl<'a> ConsistencyChecker<'a> {
    pub(crate) fn new(facts: &'a FactIndex) -> Self {
        Self { facts }
    }

    fn closure(&self) -> RelationClosure<'a> {
        RelationClosure::new(self.facts)
    }

    /// `a` and its sameAs closure.
    fn equals(&self, a: &Individual) -> FxHashSet<Individual> {
        let mut equals = self.closure().same_as(a);
        equals.insert(a.clone());
        equals
    }

    /// `sameAs(a, b)` can be declared: `b` is not known to be different from `a`.
    pub fn same_as_compatible(&self, a: &Individual, b: &Individual) -> bool {
        !self.closure().different_from(a).contains(b)
    }

    /// `differentFrom(a, b)` can be declared: `b` is not known to be the same as `a`.
    pub fn different_from_compatible(&self, a: &Individual, b: &Individual) -> bool {
        a != b && !self.closure().same_as(a).contains(b)
    }

    /// `p(s, o)` can be asserted: no negative assertion denies it.
    pub fn object_assertion_compatible(
        &self,
        subject: &Individual,
        property: &PropertyId,
        object: &Individual,
    ) -> bool {
        !self.object_conflict(
            &self.facts.negative_object_assertions,
            subject,
            property,
            object,
        )
    }

    /// `¬p(s, o)` can be asserted: no positive assertion states it.
    pub fn negative_object_assertion_compatible(
        &self,
        subject: &Individual,
        property: &PropertyId,
        object: &Individual,
    ) -> bool {
        !self.object_conflict(&self.facts.object_assertions, subject, property, object)
    }

    /// `p(s, "v")` can be asserted: no negative assertion denies it.
    pub fn datatype_assertion_compatible(
        &self,
        subject: &Individual,
        property: &PropertyId,
        value: &Literal,
    ) -> bool {
        !self.datatype_conflict(
            &self.facts.negative_datatype_assertions,
            subject,
            property,
            value,
        )
    }

    /// `¬p(s, "v")` can be asserted: no positive assertion states it.
    pub fn negative_datatype_assertion_compatible(
        &self,
        subject: &Individual,
        property: &PropertyId,
        value: &Literal,
    ) -> bool {
        !self.datatype_conflict(&self.facts.datatype_assertions, subject, property, value)
    }

    /// `sameAs(a, b)` merges no positive assertion with a negative one.
    ///
    /// A conflict created by the merge involves an assertion whose subject or
    /// object is in the merged class, so only those are checked.
    pub fn merge_compatible(&self, a: &Individual, b: &Individual) -> bool {
        let mut merged = self.equals(a);
        merged.extend(self.equals(b));
        let equals = |x: &Individual| {
            if merged.contains(x) {
                merged.clone()
            } else {
                self.equals(x)
            }
        };

        let negatives = &self.facts.negative_object_assertions;
        let object_conflict = !negatives.is_empty()
            && self
                .facts
                .object_assertions
                .iter()
                .filter(|(s, _, o)| merged.contains(*s) || merged.contains(*o))
                .any(|(subject, property, object)| {
                    let objects = equals(object);
                    equals(subject).iter().any(|s| {
                        negatives
                            .objects(s, property)
                            .is_some_and(|denied| denied.iter().any(|o| objects.contains(o)))
                    })
                });
        if object_conflict {
            return false;
        }

        let negatives = &self.facts.negative_datatype_assertions;
        negatives.is_empty()
            || !self
                .facts
                .datatype_assertions
                .iter()
                .filter(|(s, _, _)| merged.contains(*s))
                .any(|(_, property, value)| {
                    merged.iter().any(|s| {
                        negatives
                            .objects(s, property)
                            .is_some_and(|denied| denied.iter().any(|l| literal_value_eq(l, value)))
                    })
                })
    }

    fn object_conflict(
        &self,
        opposite: &AssertionIndex<Individual>,
        subject: &Individual,
        property: &PropertyId,
        object: &Individual,
    ) -> bool {
        if opposite.is_empty() {
            return false;
        }
        let objects = self.equals(object);
        self.equals(subject).iter().any(|s| {
            opposite
                .objects(s, property)
                .is_some_and(|asserted| asserted.iter().any(|o| objects.contains(o)))
        })
    }

    fn datatype_conflict(
        &self,
        opposite: &AssertionIndex<Literal>,
        subject: &Individual,
        property: &PropertyId,
        value: &Literal,
    ) -> bool {
        if opposite.is_empty() {
            return false;
        }
        self.equals(subject).iter().any(|s| {
            opposite
                .objects(s, property)
                .is_some_and(|asserted| asserted.iter().any(|l| literal_value_eq(l, value)))
        })
    }
}
