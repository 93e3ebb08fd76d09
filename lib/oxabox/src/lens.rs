use crate::entity::{ClassId, Individual, PropertyId, Value};
use crate::store::{Assertion, IndividualStore, Polarity};
use oxrdf::Literal;

/// Everything known about one individual, gathered from a store.
///
/// Built by [`IndividualStore::lens`] or, with class memberships filled in,
/// by [`ClassMembership::lens`](crate::ClassMembership::lens).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualLens {
    pub individual: Individual,
    /// Directly declared classes.
    pub types: Vec<ClassId>,
    pub same_as: Vec<Individual>,
    pub different_from: Vec<Individual>,
    /// `(property, object)` with the individual as subject.
    pub object_assertions: Vec<(PropertyId, Individual)>,
    /// `(subject, property)` with the individual as object.
    pub incoming_object_assertions: Vec<(Individual, PropertyId)>,
    pub datatype_assertions: Vec<(PropertyId, Literal)>,
    /// Negative assertions with the individual as subject.
    pub negative_assertions: Vec<Assertion>,
    pub annotations: Vec<(PropertyId, Value)>,
    /// Classes the individual was found a member of. Empty unless built by a membership evaluator.
    pub member_of: Vec<ClassId>,
}

impl IndividualLens {
    pub(crate) fn collect(store: &IndividualStore, individual: &Individual) -> Self {
        let object_assertions = store
            .object_assertions()
            .select(Some(individual), None, None)
            .map(|(_, p, o)| (p.clone(), o.clone()))
            .collect();
        let incoming_object_assertions = store
            .object_assertions()
            .select(None, None, Some(individual))
            .map(|(s, p, _)| (s.clone(), p.clone()))
            .collect();
        let datatype_assertions = store
            .datatype_assertions()
            .select(Some(individual), None, None)
            .map(|(_, p, o)| (p.clone(), o.clone()))
            .collect();
        let negative_assertions = store
            .negative_object_assertions()
            .select(Some(individual), None, None)
            .map(|(s, p, o)| Assertion {
                subject: s.clone(),
                property: p.clone(),
                object: o.clone().into(),
                polarity: Polarity::Negative,
            })
            .chain(
                store
                    .negative_datatype_assertions()
                    .select(Some(individual), None, None)
                    .map(|(s, p, o)| Assertion {
                        subject: s.clone(),
                        property: p.clone(),
                        object: o.clone().into(),
                        polarity: Polarity::Negative,
                    }),
            )
            .collect();

        Self {
            individual: individual.clone(),
            types: store.types_of(individual).cloned().collect(),
            same_as: store.same_as_closure(individual).into_iter().collect(),
            different_from: store.different_from_closure(individual).into_iter().collect(),
            object_assertions,
            incoming_object_assertions,
            datatype_assertions,
            negative_assertions,
            annotations: store.annotations_of(individual).to_vec(),
            member_of: Vec::new(),
        }
    }
}
