//! Restriction evaluation.
//!
//! Each restriction is evaluated against a working set: the assertions of
//! the restricted property, its sub-properties and equivalent properties,
//! grouped by subject. Inverse properties contribute their own assertions
//! plus the assertions of the base property read backwards.

use super::{ClassMembership, Evaluation};
use crate::catalog::ClassExpressionCatalog;
use crate::closure::reachable;
use crate::entity::{ClassId, Individual, PropertyId, Value};
use crate::error::AboxError;
use crate::expression::{CardinalityBounds, PropertyExpression, Restriction, RestrictionKind};
use crate::literal::{literal_has_datatype, literal_value_eq};
use oxrdf::{NamedNode, NamedOrBlankNode};
use rustc_hash::{FxHashMap, FxHashSet};

/// Objects asserted for each subject through the restricted property.
type WorkingSet = FxHashMap<Individual, FxHashSet<Value>>;

impl<C: ClassExpressionCatalog> ClassMembership<'_, C> {
    pub(super) fn restriction(
        &self,
        restriction: &Restriction,
        evaluation: &mut Evaluation,
        depth: usize,
    ) -> Result<FxHashSet<Individual>, AboxError> {
        let kind = restriction.kind();
        let working = self.working_set(restriction.on_property());
        tracing::trace!(
            kind = kind.name(),
            property = %restriction.on_property().base_property(),
            subjects = working.len(),
            "evaluating restriction"
        );

        Ok(match kind {
            RestrictionKind::AllValuesFrom(class) => {
                let filler = self.filler(class, evaluation, depth)?;
                select(&working, |objects| {
                    !objects.is_empty() && objects.iter().all(|value| filler.matches(value))
                })
            }
            RestrictionKind::SomeValuesFrom(class) => {
                let filler = self.filler(class, evaluation, depth)?;
                select(&working, |objects| {
                    objects.iter().any(|value| filler.matches(value))
                })
            }
            RestrictionKind::HasValue(Value::Individual(target)) => {
                let mut targets = self.store.same_as_closure(target);
                targets.insert(target.clone());
                select(&working, |objects| {
                    objects
                        .iter()
                        .any(|value| value.as_individual().is_some_and(|i| targets.contains(i)))
                })
            }
            RestrictionKind::HasValue(Value::Literal(target)) => select(&working, |objects| {
                objects
                    .iter()
                    .any(|value| value.as_literal().is_some_and(|l| literal_value_eq(l, target)))
            }),
            RestrictionKind::HasSelf(true) => working
                .iter()
                .filter(|(subject, objects)| {
                    objects.contains(&Value::Individual((*subject).clone()))
                })
                .map(|(subject, _)| subject.clone())
                .collect(),
            RestrictionKind::HasSelf(false) => working
                .iter()
                .filter(|(subject, objects)| {
                    !objects.is_empty()
                        && !objects.contains(&Value::Individual((*subject).clone()))
                })
                .map(|(subject, _)| subject.clone())
                .collect(),
            RestrictionKind::Cardinality(n) => {
                self.count_members(&working, bounds(*n, *n, None), evaluation, depth)?
            }
            RestrictionKind::MinCardinality(min) => self.count_members(
                &working,
                CardinalityBounds {
                    min: Some(*min),
                    max: None,
                    on_class: None,
                },
                evaluation,
                depth,
            )?,
            RestrictionKind::MaxCardinality(max) => self.count_members(
                &working,
                CardinalityBounds {
                    min: None,
                    max: Some(*max),
                    on_class: None,
                },
                evaluation,
                depth,
            )?,
            RestrictionKind::MinMaxCardinality { min, max } => {
                self.count_members(&working, bounds(*min, *max, None), evaluation, depth)?
            }
            RestrictionKind::QualifiedCardinality {
                cardinality,
                on_class,
            } => self.count_members(
                &working,
                bounds(*cardinality, *cardinality, Some(on_class)),
                evaluation,
                depth,
            )?,
            RestrictionKind::MinQualifiedCardinality { min, on_class } => self.count_members(
                &working,
                CardinalityBounds {
                    min: Some(*min),
                    max: None,
                    on_class: Some(on_class),
                },
                evaluation,
                depth,
            )?,
            RestrictionKind::MaxQualifiedCardinality { max, on_class } => self.count_members(
                &working,
                CardinalityBounds {
                    min: None,
                    max: Some(*max),
                    on_class: Some(on_class),
                },
                evaluation,
                depth,
            )?,
            RestrictionKind::MinMaxQualifiedCardinality { min, max, on_class } => self
                .count_members(
                    &working,
                    bounds(*min, *max, Some(on_class)),
                    evaluation,
                    depth,
                )?,
        })
    }

    /// Individuals whose number of (qualifying) objects lies within `bounds`.
    ///
    /// Individuals without assertions count zero occurrences.
    fn count_members(
        &self,
        working: &WorkingSet,
        bounds: CardinalityBounds<'_>,
        evaluation: &mut Evaluation,
        depth: usize,
    ) -> Result<FxHashSet<Individual>, AboxError> {
        if bounds.is_trivial() {
            return Ok(self.store.individuals().cloned().collect());
        }
        let filler = bounds
            .on_class
            .map(|class| self.filler(class, evaluation, depth))
            .transpose()?;
        Ok(self
            .store
            .individuals()
            .filter(|individual| {
                let count = working.get(*individual).map_or(0, |objects| {
                    objects
                        .iter()
                        .filter(|value| filler.as_ref().is_none_or(|f| f.matches(value)))
                        .count()
                });
                bounds.accepts(u32::try_from(count).unwrap_or(u32::MAX))
            })
            .cloned()
            .collect())
    }

    fn filler(
        &self,
        class: &ClassId,
        evaluation: &mut Evaluation,
        depth: usize,
    ) -> Result<Filler, AboxError> {
        Ok(Filler {
            datatype: match class.as_node() {
                NamedOrBlankNode::NamedNode(iri) => Some(iri.clone()),
                NamedOrBlankNode::BlankNode(_) => None,
            },
            members: self.evaluate(class, evaluation, depth + 1)?,
        })
    }

    fn working_set(&self, property: &PropertyExpression) -> WorkingSet {
        let mut working = WorkingSet::default();
        match property {
            PropertyExpression::Named(property) => {
                self.add_forward(property, &mut working);
            }
            PropertyExpression::InverseOf(property) => {
                for inverse in self.catalog.inverse_properties_of(property) {
                    self.add_forward(&inverse, &mut working);
                }
                self.add_backward(property, &mut working);
            }
        }
        working
    }

    /// Adds the assertions of `property` (expanded) as stated.
    fn add_forward(&self, property: &PropertyId, working: &mut WorkingSet) {
        let properties = self.expand_property(property);
        let store = self.store;
        for p in &properties {
            for (subject, objects) in store.object_assertions().subjects_of(p) {
                working
                    .entry(subject.clone())
                    .or_default()
                    .extend(objects.iter().cloned().map(Value::from));
            }
            for (subject, literals) in store.datatype_assertions().subjects_of(p) {
                working
                    .entry(subject.clone())
                    .or_default()
                    .extend(literals.iter().cloned().map(Value::from));
            }
        }

        let transitive = self.transitive_subset(&properties);
        if transitive.is_empty() {
            return;
        }
        let closure = store.closure();
        let subjects = transitive
            .iter()
            .flat_map(|p| store.object_assertions().subjects_of(p))
            .map(|(subject, _)| subject.clone())
            .collect::<FxHashSet<_>>();
        for subject in subjects {
            let reached = closure.transitive(&subject, &transitive);
            working
                .entry(subject)
                .or_default()
                .extend(reached.into_iter().map(Value::from));
        }
    }

    /// Adds the object assertions of `property` (expanded) with subject and object swapped.
    fn add_backward(&self, property: &PropertyId, working: &mut WorkingSet) {
        let properties = self.expand_property(property);
        let store = self.store;
        let mut backward: FxHashMap<Individual, FxHashSet<Individual>> = FxHashMap::default();
        for p in &properties {
            for (subject, objects) in store.object_assertions().subjects_of(p) {
                for object in objects {
                    backward
                        .entry(object.clone())
                        .or_default()
                        .insert(subject.clone());
                }
            }
        }
        for (subject, objects) in &backward {
            working
                .entry(subject.clone())
                .or_default()
                .extend(objects.iter().cloned().map(Value::from));
        }

        let transitive = self.transitive_subset(&properties);
        if transitive.is_empty() {
            return;
        }
        let mut backward_transitive: FxHashMap<Individual, Vec<Individual>> = FxHashMap::default();
        for p in &transitive {
            for (subject, objects) in store.object_assertions().subjects_of(p) {
                for object in objects {
                    backward_transitive
                        .entry(object.clone())
                        .or_default()
                        .push(subject.clone());
                }
            }
        }
        let successors = |i: &Individual| backward_transitive.get(i).cloned().unwrap_or_default();
        for subject in backward_transitive.keys() {
            let reached = reachable(successors(subject), successors);
            working
                .entry(subject.clone())
                .or_default()
                .extend(reached.into_iter().map(Value::from));
        }
    }

    fn transitive_subset(&self, properties: &FxHashSet<PropertyId>) -> FxHashSet<PropertyId> {
        if !self.config.transitive_inference {
            return FxHashSet::default();
        }
        properties
            .iter()
            .filter(|p| self.catalog.is_transitive(p))
            .cloned()
            .collect()
    }
}

/// The class values of a restriction must belong to.
struct Filler {
    /// The filler IRI, compared to literal datatypes.
    datatype: Option<NamedNode>,
    members: FxHashSet<Individual>,
}

impl Filler {
    fn matches(&self, value: &Value) -> bool {
        match value {
            Value::Individual(individual) => self.members.contains(individual),
            Value::Literal(literal) => self
                .datatype
                .as_ref()
                .is_some_and(|datatype| literal_has_datatype(literal, datatype.as_ref())),
        }
    }
}

fn bounds(min: u32, max: u32, on_class: Option<&ClassId>) -> CardinalityBounds<'_> {
    CardinalityBounds {
        min: Some(min),
        max: Some(max),
        on_class,
    }
}

fn select(
    working: &WorkingSet,
    accept: impl Fn(&FxHashSet<Value>) -> bool,
) -> FxHashSet<Individual> {
    working
        .iter()
        .filter(|(_, objects)| accept(objects))
        .map(|(subject, _)| subject.clone())
        .collect()
}
