//! Closures of `owl:sameAs`, `owl:differentFrom` and transitive properties.
//!
//! All traversals are iterative worklists with an owned visited set, so they
//! terminate on cyclic relation graphs (sameAs cycles are common and legal)
//! and do not grow the call stack with the chain length.

use crate::entity::{Individual, PropertyId};
use crate::store::facts::FactIndex;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Every node reachable from `seeds` through `next`, seeds included.
pub(crate) fn reachable<T, I>(
    seeds: impl IntoIterator<Item = T>,
    mut next: impl FnMut(&T) -> I,
) -> FxHashSet<T>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut visited = FxHashSet::default();
    let mut stack = Vec::new();
    for seed in seeds {
        if visited.insert(seed.clone()) {
            stack.push(seed);
        }
    }
    while let Some(current) = stack.pop() {
        for n in next(&current) {
            if visited.insert(n.clone()) {
                stack.push(n);
            }
        }
    }
    visited
}

/// Closure computations over the facts of an [`IndividualStore`](crate::IndividualStore).
#[derive(Debug, Clone, Copy)]
pub struct RelationClosure<'a> {
    facts: &'a FactIndex,
}

impl<'a> RelationClosure<'a> {
    pub(crate) fn new(facts: &'a FactIndex) -> Self {
        Self { facts }
    }

    /// The individuals `seed` is the same as, `seed` excluded.
    pub fn same_as(&self, seed: &Individual) -> FxHashSet<Individual> {
        let mut closure = reachable([seed.clone()], |i| {
            self.facts.same_as.neighbours(i).cloned().collect::<Vec<_>>()
        });
        closure.remove(seed);
        tracing::trace!(individual = %seed, size = closure.len(), "sameAs closure");
        closure
    }

    /// The individuals `seed` is different from, `seed` excluded.
    ///
    /// Combines direct `owl:differentFrom` facts and `owl:AllDifferent`
    /// co-members, and closes them under
    /// `sameAs(A,B) ∧ differentFrom(B,C) ⟹ differentFrom(A,C)` and
    /// `differentFrom(A,B) ∧ sameAs(B,C) ⟹ differentFrom(A,C)`.
    pub fn different_from(&self, seed: &Individual) -> FxHashSet<Individual> {
        let mut equals = self.same_as(seed);
        equals.insert(seed.clone());

        let mut direct = FxHashSet::default();
        for individual in &equals {
            direct.extend(self.facts.different_from.neighbours(individual).cloned());
            direct.extend(self.facts.all_different_peers(individual).cloned());
        }

        let mut closure = reachable(direct, |i| {
            self.facts.same_as.neighbours(i).cloned().collect::<Vec<_>>()
        });
        closure.remove(seed);
        tracing::trace!(individual = %seed, size = closure.len(), "differentFrom closure");
        closure
    }

    /// `true` if `a` and `b` are known to denote the same individual.
    pub fn is_same(&self, a: &Individual, b: &Individual) -> bool {
        a == b || self.same_as(a).contains(b)
    }

    /// `true` if `a` and `b` are known to denote different individuals.
    pub fn is_different(&self, a: &Individual, b: &Individual) -> bool {
        a != b && self.different_from(a).contains(b)
    }

    /// The individuals reachable from `seed` through object assertions whose
    /// property is one of `properties`. `seed` is only part of the result if
    /// it lies on a cycle.
    ///
    /// Only the given properties are followed. Sub-properties must be added to
    /// the set by the caller.
    pub fn transitive(
        &self,
        seed: &Individual,
        properties: &FxHashSet<PropertyId>,
    ) -> FxHashSet<Individual> {
        let successors = |i: &Individual| {
            properties
                .iter()
                .filter_map(|p| self.facts.object_assertions.objects(i, p))
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
        };
        reachable(successors(seed), successors)
    }
}
