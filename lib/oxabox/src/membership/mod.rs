//! Class membership evaluation over an [`IndividualStore`].

mod restriction;

use crate::catalog::ClassExpressionCatalog;
use crate::closure::reachable;
use crate::entity::{ClassId, Individual, PropertyId};
use crate::error::{AboxError, EvaluationError};
use crate::expression::{ClassExpression, Composite};
use crate::lens::IndividualLens;
use crate::store::IndividualStore;
use crate::vocab::owl;
use oxrdf::NamedOrBlankNodeRef;
use rustc_hash::{FxHashMap, FxHashSet};

/// Configuration of a [`ClassMembership`] evaluator.
#[derive(Debug, Clone)]
pub struct MembershipConfig {
    /// Maximum nesting of class expressions followed during one query.
    pub max_depth: usize,
    /// Close the assertions of transitive properties before evaluating restrictions on them.
    pub transitive_inference: bool,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            transitive_inference: true,
        }
    }
}

/// Computes the members of classes from the facts of a store and the class
/// model of a catalog.
///
/// The evaluator borrows the store: the facts cannot change while it is alive.
///
/// ```
/// use oxabox::{ClassId, ClassMembership, Individual, IndividualStore, TBox};
/// use oxrdf::NamedNode;
///
/// let person = ClassId::new_from_iri("http://example.com/Person")?;
/// let student = ClassId::new_from_iri("http://example.com/Student")?;
/// let alice = Individual::from(NamedNode::new("http://example.com/alice")?);
///
/// let mut tbox = TBox::new();
/// tbox.declare_subclass(student.clone(), person.clone());
/// let mut store = IndividualStore::new();
/// assert!(store.declare_type(alice.clone(), student).is_applied());
///
/// let membership = ClassMembership::new(&store, &tbox);
/// assert!(membership.is_member(&alice, &person)?);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct ClassMembership<'a, C> {
    store: &'a IndividualStore,
    catalog: C,
    config: MembershipConfig,
}

/// State of one query: memoized results and the classes being evaluated.
#[derive(Default)]
struct Evaluation {
    cache: FxHashMap<ClassId, FxHashSet<Individual>>,
    in_progress: FxHashSet<ClassId>,
}

impl<'a, C: ClassExpressionCatalog> ClassMembership<'a, C> {
    pub fn new(store: &'a IndividualStore, catalog: C) -> Self {
        Self::with_config(store, catalog, MembershipConfig::default())
    }

    pub fn with_config(store: &'a IndividualStore, catalog: C, config: MembershipConfig) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    pub fn store(&self) -> &'a IndividualStore {
        self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The individuals that are members of `class`.
    pub fn individuals_of(&self, class: &ClassId) -> Result<FxHashSet<Individual>, AboxError> {
        self.evaluate(class, &mut Evaluation::default(), 0)
    }

    /// `true` if `individual` is a member of `class`.
    pub fn is_member(&self, individual: &Individual, class: &ClassId) -> Result<bool, AboxError> {
        Ok(self.individuals_of(class)?.contains(individual))
    }

    /// The individuals reachable from `seed` through `property` and its
    /// sub-properties, followed transitively.
    pub fn transitive_related(
        &self,
        seed: &Individual,
        property: &PropertyId,
    ) -> FxHashSet<Individual> {
        let properties = self.expand_property(property);
        self.store.closure().transitive(seed, &properties)
    }

    /// The store view of `individual`, with the classes among `classes` it is a member of.
    pub fn lens(
        &self,
        individual: &Individual,
        classes: impl IntoIterator<Item = ClassId>,
    ) -> Result<IndividualLens, AboxError> {
        let mut lens = self.store.lens(individual);
        let mut evaluation = Evaluation::default();
        for class in classes {
            if self.evaluate(&class, &mut evaluation, 0)?.contains(individual) {
                lens.member_of.push(class);
            }
        }
        Ok(lens)
    }

    /// `property` with its sub-properties and equivalent properties, closed.
    fn expand_property(&self, property: &PropertyId) -> FxHashSet<PropertyId> {
        reachable([property.clone()], |p| {
            let mut next = self.catalog.sub_properties_of(p);
            next.extend(self.catalog.equivalent_properties_of(p));
            next
        })
    }

    fn evaluate(
        &self,
        class: &ClassId,
        evaluation: &mut Evaluation,
        depth: usize,
    ) -> Result<FxHashSet<Individual>, AboxError> {
        if let Some(members) = evaluation.cache.get(class) {
            return Ok(members.clone());
        }
        if depth > self.config.max_depth {
            return Err(EvaluationError::MaxDepthExceeded {
                depth: self.config.max_depth,
            }
            .into());
        }
        if !evaluation.in_progress.insert(class.clone()) {
            return Err(EvaluationError::CyclicClassExpression {
                class: class.clone(),
            }
            .into());
        }

        let members = match self.catalog.classify(class)? {
            ClassExpression::Simple(class) => self.simple(&class),
            ClassExpression::Restriction(restriction) => {
                self.restriction(&restriction, evaluation, depth)?
            }
            ClassExpression::Composite(composite) => {
                self.composite(&composite, evaluation, depth)?
            }
            ClassExpression::Enumerate(members) => members.into_iter().collect(),
        };

        evaluation.in_progress.remove(class);
        tracing::debug!(%class, members = members.len(), "evaluated class");
        evaluation.cache.insert(class.clone(), members.clone());
        Ok(members)
    }

    /// Direct members of the class, its subclasses and its equivalent
    /// classes, with their sameAs closures. Every individual is an `owl:Thing`.
    fn simple(&self, class: &ClassId) -> FxHashSet<Individual> {
        if class.as_node_ref() == NamedOrBlankNodeRef::from(owl::THING) {
            return self.store.individuals().cloned().collect();
        }
        let subclasses = self.catalog.subclasses_of(class);
        let equivalents = self.catalog.equivalent_classes_of(class);

        #[cfg(feature = "rayon")]
        let (from_subclasses, from_equivalents) = rayon::join(
            || typed_members(self.store, &subclasses),
            || typed_members(self.store, &equivalents),
        );
        #[cfg(not(feature = "rayon"))]
        let (from_subclasses, from_equivalents) = (
            typed_members(self.store, &subclasses),
            typed_members(self.store, &equivalents),
        );

        let mut members = typed_members(self.store, std::slice::from_ref(class));
        members.extend(from_subclasses);
        members.extend(from_equivalents);

        let closure = self.store.closure();
        let same = members
            .iter()
            .flat_map(|member| closure.same_as(member))
            .collect::<Vec<_>>();
        members.extend(same);
        members
    }

    fn composite(
        &self,
        composite: &Composite,
        evaluation: &mut Evaluation,
        depth: usize,
    ) -> Result<FxHashSet<Individual>, AboxError> {
        Ok(match composite {
            Composite::Union(classes) => {
                let mut members = FxHashSet::default();
                for class in classes {
                    members.extend(self.evaluate(class, evaluation, depth + 1)?);
                }
                members
            }
            Composite::Intersection(classes) => {
                let Some((first, rest)) = classes.split_first() else {
                    return Ok(FxHashSet::default());
                };
                let mut members = self.evaluate(first, evaluation, depth + 1)?;
                for class in rest {
                    if members.is_empty() {
                        break;
                    }
                    let other = self.evaluate(class, evaluation, depth + 1)?;
                    members.retain(|member| other.contains(member));
                }
                members
            }
            Composite::Complement(class) => {
                let excluded = self.evaluate(class, evaluation, depth + 1)?;
                self.store
                    .individuals()
                    .filter(|individual| !excluded.contains(*individual))
                    .cloned()
                    .collect()
            }
        })
    }
}

/// Individuals with a declared type among `classes`.
fn typed_members(store: &IndividualStore, classes: &[ClassId]) -> FxHashSet<Individual> {
    if classes.is_empty() {
        return FxHashSet::default();
    }
    let classes = classes.iter().collect::<FxHashSet<_>>();
    store
        .types()
        .filter(|(_, class)| classes.contains(class))
        .map(|(individual, _)| individual.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TBox;
    use oxrdf::NamedNode;

    fn individual(name: &str) -> Individual {
        NamedNode::new(format!("http://example.com/{name}")).unwrap().into()
    }

    fn class(name: &str) -> ClassId {
        ClassId::new_from_iri(format!("http://example.com/{name}")).unwrap()
    }

    #[test]
    fn simple_membership_follows_hierarchy_and_same_as() {
        let mut tbox = TBox::new();
        tbox.declare_subclass(class("Student"), class("Person"))
            .declare_equivalent_classes(class("Person"), class("Human"));
        let mut store = IndividualStore::new();
        assert!(store.declare_type(individual("a"), class("Student")).is_applied());
        assert!(store.declare_type(individual("b"), class("Human")).is_applied());
        assert!(
            store
                .declare_same_as(individual("a"), individual("a2"))
                .unwrap()
                .is_applied()
        );
        assert!(store.declare_individual(individual("c")).is_applied());

        let membership = ClassMembership::new(&store, &tbox);
        let members = membership.individuals_of(&class("Person")).unwrap();
        assert_eq!(members.len(), 3);
        assert!(members.contains(&individual("a2")));
        assert!(!members.contains(&individual("c")));
    }

    #[test]
    fn composites() {
        let mut tbox = TBox::new();
        tbox.declare_union(class("AorB"), [class("A"), class("B")])
            .declare_intersection(class("AandB"), [class("A"), class("B")])
            .declare_intersection(class("Nothing"), [])
            .declare_complement(class("NotA"), class("A"));
        let mut store = IndividualStore::new();
        assert!(store.declare_type(individual("x"), class("A")).is_applied());
        assert!(store.declare_type(individual("y"), class("A")).is_applied());
        assert!(store.declare_type(individual("y"), class("B")).is_applied());
        assert!(store.declare_individual(individual("z")).is_applied());

        let membership = ClassMembership::new(&store, &tbox);
        assert_eq!(membership.individuals_of(&class("AorB")).unwrap().len(), 2);
        let both = membership.individuals_of(&class("AandB")).unwrap();
        assert_eq!(both.len(), 1);
        assert!(both.contains(&individual("y")));
        assert!(membership.individuals_of(&class("Nothing")).unwrap().is_empty());
        let not_a = membership.individuals_of(&class("NotA")).unwrap();
        assert_eq!(not_a.len(), 1);
        assert!(not_a.contains(&individual("z")));
    }

    #[test]
    fn cyclic_definition_is_an_error() {
        let mut tbox = TBox::new();
        tbox.declare_union(class("A"), [class("B")])
            .declare_union(class("B"), [class("A")]);
        let store = IndividualStore::new();
        let membership = ClassMembership::new(&store, &tbox);
        assert!(matches!(
            membership.individuals_of(&class("A")),
            Err(AboxError::Evaluation(
                EvaluationError::CyclicClassExpression { .. }
            ))
        ));
    }

    #[test]
    fn depth_limit() {
        let mut tbox = TBox::new();
        for i in 0..10 {
            tbox.declare_union(class(&format!("C{i}")), [class(&format!("C{}", i + 1))]);
        }
        let store = IndividualStore::new();
        let membership = ClassMembership::with_config(
            &store,
            &tbox,
            MembershipConfig {
                max_depth: 4,
                ..MembershipConfig::default()
            },
        );
        assert!(matches!(
            membership.individuals_of(&class("C0")),
            Err(AboxError::Evaluation(EvaluationError::MaxDepthExceeded {
                depth: 4
            }))
        ));
        assert!(
            ClassMembership::new(&store, &tbox)
                .individuals_of(&class("C0"))
                .unwrap()
                .is_empty()
        );
    }
}
