//! The A-BOX: individuals and the facts asserted about them.

mod consistency;
mod export;
pub(crate) mod facts;

pub use consistency::ConsistencyChecker;
pub use facts::{AllDifferentGroup, Annotation, Assertion, AssertionIndex, Polarity};

use crate::closure::RelationClosure;
use crate::diagnostic::{Declaration, Diagnostic, DiagnosticKind};
use crate::entity::{ClassId, Individual, PropertyId, Value};
use crate::error::{AboxError, DeclarationError};
use crate::lens::IndividualLens;
use crate::vocab::owl;
use facts::FactIndex;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Literal, NamedNodeRef};
use rustc_hash::FxHashSet;

/// Configuration of an [`IndividualStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Refuse facts contradicting the store (sameAs vs differentFrom,
    /// assertion vs negative assertion, type into reserved vocabulary).
    pub taxonomy_protection: bool,
    /// Classes individuals cannot be declared instances of.
    pub reserved_classes: FxHashSet<ClassId>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let reserved: [NamedNodeRef<'_>; 13] = [
            owl::CLASS,
            owl::RESTRICTION,
            owl::OBJECT_PROPERTY,
            owl::DATATYPE_PROPERTY,
            owl::ANNOTATION_PROPERTY,
            owl::TRANSITIVE_PROPERTY,
            owl::ONTOLOGY,
            owl::ALL_DIFFERENT,
            owl::NEGATIVE_PROPERTY_ASSERTION,
            owl::NOTHING,
            rdfs::CLASS,
            rdfs::DATATYPE,
            rdf::PROPERTY,
        ];
        Self {
            taxonomy_protection: true,
            reserved_classes: reserved
                .into_iter()
                .map(|c| ClassId::from(c.into_owned()))
                .collect(),
        }
    }
}

fn reject(subject: &Individual, kind: DiagnosticKind, message: String) -> Declaration {
    tracing::warn!(%subject, %kind, "{message}");
    Declaration::Rejected(Diagnostic::new(kind, message))
}

/// An in-memory A-BOX.
///
/// Every mutation is checked against the current facts first. Structural
/// problems (e.g. `sameAs(a, a)`) are returned as errors; contradictions with
/// existing facts are returned as [`Declaration::Rejected`]. In both cases the
/// store is left unchanged.
///
/// ```
/// use oxabox::{Individual, IndividualStore};
/// use oxrdf::NamedNode;
///
/// let a = Individual::from(NamedNode::new("http://example.com/a")?);
/// let b = Individual::from(NamedNode::new("http://example.com/b")?);
/// let mut store = IndividualStore::new();
/// assert!(store.declare_different_from(a.clone(), b.clone())?.is_applied());
/// assert!(store.declare_same_as(a.clone(), b.clone())?.is_rejected());
/// assert!(!store.is_same(&a, &b));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndividualStore {
    config: StoreConfig,
    facts: FactIndex,
}

impl IndividualStore {
    /// Creates an empty store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            facts: FactIndex::default(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Drops every fact, keeping the configuration.
    pub fn reset(&mut self) {
        self.facts = FactIndex::default();
    }

    /// The closure engine over the current facts.
    pub fn closure(&self) -> RelationClosure<'_> {
        RelationClosure::new(&self.facts)
    }

    /// The consistency predicates over the current facts.
    pub fn consistency(&self) -> ConsistencyChecker<'_> {
        ConsistencyChecker::new(&self.facts)
    }

    fn insert_individual(&mut self, individual: &Individual) -> bool {
        if self.facts.individuals.contains(individual) {
            return false;
        }
        self.facts.individuals.insert(individual.clone())
    }

    /// Declares an individual. Declaring it again is a no-op.
    pub fn declare_individual(&mut self, individual: impl Into<Individual>) -> Declaration {
        let individual = individual.into();
        Declaration::from_inserted(self.insert_individual(&individual))
    }

    /// Declares `individual` an instance of `class` (`rdf:type`).
    pub fn declare_type(
        &mut self,
        individual: impl Into<Individual>,
        class: impl Into<ClassId>,
    ) -> Declaration {
        let individual = individual.into();
        let class = class.into();
        if self
            .facts
            .types
            .get(&individual)
            .is_some_and(|types| types.contains(&class))
        {
            return Declaration::Unchanged;
        }
        if self.config.taxonomy_protection && self.config.reserved_classes.contains(&class) {
            return reject(
                &individual,
                DiagnosticKind::ReservedClass,
                format!("{individual} cannot be typed with reserved class {class}"),
            );
        }
        self.insert_individual(&individual);
        self.facts
            .types
            .entry(individual)
            .or_default()
            .insert(class);
        Declaration::Applied
    }

    /// Asserts `property(subject, object)` between two individuals.
    pub fn assert_object(
        &mut self,
        subject: impl Into<Individual>,
        property: impl Into<PropertyId>,
        object: impl Into<Individual>,
    ) -> Declaration {
        let (subject, property, object) = (subject.into(), property.into(), object.into());
        if self
            .facts
            .object_assertions
            .contains(&subject, &property, &object)
        {
            return Declaration::Unchanged;
        }
        if self.config.taxonomy_protection
            && !self
                .consistency()
                .object_assertion_compatible(&subject, &property, &object)
        {
            return reject(
                &subject,
                DiagnosticKind::AssertionConflictsWithNegative,
                format!("{property}({subject}, {object}) is negatively asserted"),
            );
        }
        self.insert_individual(&subject);
        self.insert_individual(&object);
        Declaration::from_inserted(
            self.facts
                .object_assertions
                .insert(subject, property, object),
        )
    }

    /// Asserts `property(subject, value)` with a literal value.
    pub fn assert_datatype(
        &mut self,
        subject: impl Into<Individual>,
        property: impl Into<PropertyId>,
        value: impl Into<Literal>,
    ) -> Declaration {
        let (subject, property, value) = (subject.into(), property.into(), value.into());
        if self
            .facts
            .datatype_assertions
            .contains(&subject, &property, &value)
        {
            return Declaration::Unchanged;
        }
        if self.config.taxonomy_protection
            && !self
                .consistency()
                .datatype_assertion_compatible(&subject, &property, &value)
        {
            return reject(
                &subject,
                DiagnosticKind::AssertionConflictsWithNegative,
                format!("{property}({subject}, {value}) is negatively asserted"),
            );
        }
        self.insert_individual(&subject);
        Declaration::from_inserted(
            self.facts
                .datatype_assertions
                .insert(subject, property, value),
        )
    }

    /// Asserts that `property(subject, object)` does not hold.
    pub fn assert_negative_object(
        &mut self,
        subject: impl Into<Individual>,
        property: impl Into<PropertyId>,
        object: impl Into<Individual>,
    ) -> Declaration {
        let (subject, property, object) = (subject.into(), property.into(), object.into());
        if self
            .facts
            .negative_object_assertions
            .contains(&subject, &property, &object)
        {
            return Declaration::Unchanged;
        }
        if self.config.taxonomy_protection
            && !self
                .consistency()
                .negative_object_assertion_compatible(&subject, &property, &object)
        {
            return reject(
                &subject,
                DiagnosticKind::NegativeConflictsWithAssertion,
                format!("{property}({subject}, {object}) is asserted"),
            );
        }
        self.insert_individual(&subject);
        self.insert_individual(&object);
        Declaration::from_inserted(
            self.facts
                .negative_object_assertions
                .insert(subject, property, object),
        )
    }

    /// Asserts that `property(subject, value)` does not hold.
    pub fn assert_negative_datatype(
        &mut self,
        subject: impl Into<Individual>,
        property: impl Into<PropertyId>,
        value: impl Into<Literal>,
    ) -> Declaration {
        let (subject, property, value) = (subject.into(), property.into(), value.into());
        if self
            .facts
            .negative_datatype_assertions
            .contains(&subject, &property, &value)
        {
            return Declaration::Unchanged;
        }
        if self.config.taxonomy_protection
            && !self
                .consistency()
                .negative_datatype_assertion_compatible(&subject, &property, &value)
        {
            return reject(
                &subject,
                DiagnosticKind::NegativeConflictsWithAssertion,
                format!("{property}({subject}, {value}) is asserted"),
            );
        }
        self.insert_individual(&subject);
        Declaration::from_inserted(
            self.facts
                .negative_datatype_assertions
                .insert(subject, property, value),
        )
    }

    /// Declares `owl:sameAs(a, b)`. The inverse `owl:sameAs(b, a)` is materialized too.
    pub fn declare_same_as(
        &mut self,
        a: impl Into<Individual>,
        b: impl Into<Individual>,
    ) -> Result<Declaration, AboxError> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(DeclarationError::SelfSameAs { individual: a }.into());
        }
        if self.facts.same_as.contains(&a, &b) {
            return Ok(Declaration::Unchanged);
        }
        if self.config.taxonomy_protection && !self.consistency().same_as_compatible(&a, &b) {
            return Ok(reject(
                &a,
                DiagnosticKind::SameAsConflictsWithDifferentFrom,
                format!("{a} is known to be different from {b}"),
            ));
        }
        if self.config.taxonomy_protection && !self.consistency().merge_compatible(&a, &b) {
            return Ok(reject(
                &a,
                DiagnosticKind::AssertionConflictsWithNegative,
                format!("merging {a} and {b} makes a negatively asserted fact hold"),
            ));
        }
        self.insert_individual(&a);
        self.insert_individual(&b);
        Ok(Declaration::from_inserted(self.facts.same_as.insert(a, b)))
    }

    /// Declares `owl:differentFrom(a, b)`. The inverse is materialized too.
    pub fn declare_different_from(
        &mut self,
        a: impl Into<Individual>,
        b: impl Into<Individual>,
    ) -> Result<Declaration, AboxError> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(DeclarationError::SelfDifferentFrom { individual: a }.into());
        }
        if self.facts.different_from.contains(&a, &b) {
            return Ok(Declaration::Unchanged);
        }
        if self.config.taxonomy_protection && !self.consistency().different_from_compatible(&a, &b)
        {
            return Ok(reject(
                &a,
                DiagnosticKind::DifferentFromConflictsWithSameAs,
                format!("{a} is known to be the same as {b}"),
            ));
        }
        self.insert_individual(&a);
        self.insert_individual(&b);
        Ok(Declaration::from_inserted(
            self.facts.different_from.insert(a, b),
        ))
    }

    /// Declares an `owl:AllDifferent` group. Duplicate members are ignored.
    ///
    /// The group is kept as is; the pairwise `owl:differentFrom` facts it
    /// implies are only derived when closures are computed.
    pub fn declare_all_different(
        &mut self,
        members: impl IntoIterator<Item = impl Into<Individual>>,
    ) -> Result<Declaration, AboxError> {
        let mut seen = FxHashSet::default();
        let members: Vec<Individual> = members
            .into_iter()
            .map(Into::into)
            .filter(|m: &Individual| seen.insert(m.clone()))
            .collect();
        if members.is_empty() {
            return Err(DeclarationError::EmptyAllDifferent.into());
        }
        if self
            .facts
            .all_different
            .iter()
            .any(|group| {
                group.members().len() == seen.len()
                    && group.members().iter().all(|m| seen.contains(m))
            })
        {
            return Ok(Declaration::Unchanged);
        }
        if self.config.taxonomy_protection {
            let closure = self.closure();
            for member in &members {
                if let Some(same) = closure
                    .same_as(member)
                    .into_iter()
                    .find(|other| seen.contains(other))
                {
                    return Ok(reject(
                        &member,
                        DiagnosticKind::DifferentFromConflictsWithSameAs,
                        format!("{member} is known to be the same as {same}"),
                    ));
                }
            }
        }
        for member in &members {
            self.insert_individual(member);
        }
        self.facts
            .push_all_different(AllDifferentGroup::new(members));
        Ok(Declaration::Applied)
    }

    /// Attaches an annotation to `subject`. Annotations take no part in reasoning.
    pub fn annotate(
        &mut self,
        subject: impl Into<Individual>,
        property: impl Into<PropertyId>,
        value: impl Into<Value>,
    ) -> Declaration {
        let (subject, property, value) = (subject.into(), property.into(), value.into());
        let annotations = self.facts.annotations.entry(subject.clone()).or_default();
        if annotations
            .iter()
            .any(|(p, v)| *p == property && *v == value)
        {
            return Declaration::Unchanged;
        }
        annotations.push((property, value));
        self.insert_individual(&subject);
        Declaration::Applied
    }

    pub fn contains_individual(&self, individual: &Individual) -> bool {
        self.facts.individuals.contains(individual)
    }

    /// All declared individuals.
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.facts.individuals.iter()
    }

    pub fn individual_count(&self) -> usize {
        self.facts.individuals.len()
    }

    /// Classes `individual` is directly declared an instance of.
    pub fn types_of(&self, individual: &Individual) -> impl Iterator<Item = &ClassId> {
        self.facts.types.get(individual).into_iter().flatten()
    }

    /// All `rdf:type` facts.
    pub fn types(&self) -> impl Iterator<Item = (&Individual, &ClassId)> {
        self.facts
            .types
            .iter()
            .flat_map(|(i, classes)| classes.iter().map(move |c| (i, c)))
    }

    pub fn object_assertions(&self) -> &AssertionIndex<Individual> {
        &self.facts.object_assertions
    }

    pub fn datatype_assertions(&self) -> &AssertionIndex<Literal> {
        &self.facts.datatype_assertions
    }

    pub fn negative_object_assertions(&self) -> &AssertionIndex<Individual> {
        &self.facts.negative_object_assertions
    }

    pub fn negative_datatype_assertions(&self) -> &AssertionIndex<Literal> {
        &self.facts.negative_datatype_assertions
    }

    /// Every property assertion, positive and negative, as plain data.
    pub fn assertions(&self) -> impl Iterator<Item = Assertion> + '_ {
        fn object_assertions(
            index: &AssertionIndex<Individual>,
            polarity: Polarity,
        ) -> impl Iterator<Item = Assertion> + '_ {
            index.iter().map(move |(s, p, o)| Assertion {
                subject: s.clone(),
                property: p.clone(),
                object: o.clone().into(),
                polarity,
            })
        }
        fn datatype_assertions(
            index: &AssertionIndex<Literal>,
            polarity: Polarity,
        ) -> impl Iterator<Item = Assertion> + '_ {
            index.iter().map(move |(s, p, o)| Assertion {
                subject: s.clone(),
                property: p.clone(),
                object: o.clone().into(),
                polarity,
            })
        }
        object_assertions(&self.facts.object_assertions, Polarity::Positive)
            .chain(datatype_assertions(
                &self.facts.datatype_assertions,
                Polarity::Positive,
            ))
            .chain(object_assertions(
                &self.facts.negative_object_assertions,
                Polarity::Negative,
            ))
            .chain(datatype_assertions(
                &self.facts.negative_datatype_assertions,
                Polarity::Negative,
            ))
    }

    /// Declared `owl:sameAs` pairs, once each.
    pub fn same_as_facts(&self) -> &[(Individual, Individual)] {
        self.facts.same_as.pairs()
    }

    /// Declared `owl:differentFrom` pairs, once each.
    pub fn different_from_facts(&self) -> &[(Individual, Individual)] {
        self.facts.different_from.pairs()
    }

    pub fn all_different_groups(&self) -> &[AllDifferentGroup] {
        &self.facts.all_different
    }

    /// Every annotation as plain data.
    pub fn annotations(&self) -> impl Iterator<Item = Annotation> + '_ {
        self.facts.annotations.iter().flat_map(|(subject, values)| {
            values.iter().map(move |(property, value)| Annotation {
                subject: subject.clone(),
                property: property.clone(),
                value: value.clone(),
            })
        })
    }

    pub fn annotations_of(&self, individual: &Individual) -> &[(PropertyId, Value)] {
        self.facts
            .annotations
            .get(individual)
            .map_or(&[], Vec::as_slice)
    }

    /// `true` if `a` and `b` are known to be the same individual.
    pub fn is_same(&self, a: &Individual, b: &Individual) -> bool {
        self.closure().is_same(a, b)
    }

    /// `true` if `a` and `b` are known to be different individuals.
    pub fn is_different(&self, a: &Individual, b: &Individual) -> bool {
        self.closure().is_different(a, b)
    }

    pub fn same_as_closure(&self, individual: &Individual) -> FxHashSet<Individual> {
        self.closure().same_as(individual)
    }

    pub fn different_from_closure(&self, individual: &Individual) -> FxHashSet<Individual> {
        self.closure().different_from(individual)
    }

    /// Everything the store knows about `individual`.
    pub fn lens(&self, individual: &Individual) -> IndividualLens {
        IndividualLens::collect(self, individual)
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
    fn redeclaration_is_a_no_op() {
        let mut store = IndividualStore::new();
        assert_eq!(store.declare_individual(individual("a")), Declaration::Applied);
        assert_eq!(store.declare_individual(individual("a")), Declaration::Unchanged);
        assert_eq!(store.individual_count(), 1);
    }

    #[test]
    fn reserved_class_is_rejected() {
        let mut store = IndividualStore::new();
        let outcome = store.declare_type(individual("a"), owl::CLASS.into_owned());
        assert_eq!(
            outcome.diagnostic().map(Diagnostic::kind),
            Some(DiagnosticKind::ReservedClass)
        );
        assert!(!store.contains_individual(&individual("a")));
    }

    #[test]
    fn protection_can_be_disabled() {
        let mut store = IndividualStore::with_config(StoreConfig {
            taxonomy_protection: false,
            ..StoreConfig::default()
        });
        assert!(
            store
                .declare_different_from(individual("a"), individual("b"))
                .unwrap()
                .is_applied()
        );
        assert!(
            store
                .declare_same_as(individual("a"), individual("b"))
                .unwrap()
                .is_applied()
        );
    }

    #[test]
    fn negative_conflict_through_same_as() {
        let mut store = IndividualStore::new();
        assert!(
            store
                .declare_same_as(individual("b"), individual("b2"))
                .unwrap()
                .is_applied()
        );
        assert!(
            store
                .assert_negative_object(individual("a"), property("p"), individual("b2"))
                .is_applied()
        );
        let outcome = store.assert_object(individual("a"), property("p"), individual("b"));
        assert_eq!(
            outcome.diagnostic().map(Diagnostic::kind),
            Some(DiagnosticKind::AssertionConflictsWithNegative)
        );
        assert!(store.object_assertions().is_empty());
    }

    #[test]
    fn annotations_are_kept_apart() {
        let mut store = IndividualStore::new();
        let label = property("label");
        assert!(
            store
                .annotate(individual("a"), label.clone(), Literal::new_simple_literal("A"))
                .is_applied()
        );
        assert_eq!(
            store.annotate(individual("a"), label, Literal::new_simple_literal("A")),
            Declaration::Unchanged
        );
        assert_eq!(store.annotations().count(), 1);
        assert_eq!(store.assertions().count(), 0);
    }
}
