//! Serialization of the store facts as RDF triples.

use super::IndividualStore;
use super::facts::Polarity;
use crate::entity::{Individual, Value};
use crate::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, Graph, NamedOrBlankNode, Term, Triple};

impl IndividualStore {
    /// The store content as OWL 2 RDF triples.
    ///
    /// Negative assertions are reified as `owl:NegativePropertyAssertion`
    /// nodes and `owl:AllDifferent` groups use an `owl:distinctMembers` list.
    /// Blank nodes introduced for negative assertions and lists are fresh on
    /// every call.
    pub fn triples(&self) -> Vec<Triple> {
        let mut triples = Vec::new();

        for individual in self.individuals() {
            if let Individual::Named(node) = individual {
                triples.push(Triple::new(
                    node.clone(),
                    rdf::TYPE,
                    owl::NAMED_INDIVIDUAL,
                ));
            }
        }
        for (individual, class) in self.types() {
            triples.push(Triple::new(
                NamedOrBlankNode::from(individual.clone()),
                rdf::TYPE,
                class.clone(),
            ));
        }

        for assertion in self.assertions() {
            let subject = NamedOrBlankNode::from(assertion.subject);
            match assertion.polarity {
                Polarity::Positive => triples.push(Triple::new(
                    subject,
                    assertion.property.into_inner(),
                    assertion.object,
                )),
                Polarity::Negative => {
                    let node = BlankNode::default();
                    let target = match &assertion.object {
                        Value::Individual(_) => owl::TARGET_INDIVIDUAL,
                        Value::Literal(_) => owl::TARGET_VALUE,
                    };
                    triples.push(Triple::new(
                        node.clone(),
                        rdf::TYPE,
                        owl::NEGATIVE_PROPERTY_ASSERTION,
                    ));
                    triples.push(Triple::new(node.clone(), owl::SOURCE_INDIVIDUAL, subject));
                    triples.push(Triple::new(
                        node.clone(),
                        owl::ASSERTION_PROPERTY,
                        assertion.property.into_inner(),
                    ));
                    triples.push(Triple::new(node, target, assertion.object));
                }
            }
        }

        for (a, b) in self.same_as_facts() {
            triples.push(Triple::new(
                NamedOrBlankNode::from(a.clone()),
                owl::SAME_AS,
                b.clone(),
            ));
        }
        for (a, b) in self.different_from_facts() {
            triples.push(Triple::new(
                NamedOrBlankNode::from(a.clone()),
                owl::DIFFERENT_FROM,
                b.clone(),
            ));
        }

        for group in self.all_different_groups() {
            triples.push(Triple::new(
                group.id().clone(),
                rdf::TYPE,
                owl::ALL_DIFFERENT,
            ));
            let head = write_list(
                group.members().iter().cloned().map(Term::from),
                &mut triples,
            );
            triples.push(Triple::new(
                group.id().clone(),
                owl::DISTINCT_MEMBERS,
                head,
            ));
        }

        for annotation in self.annotations() {
            triples.push(Triple::new(
                NamedOrBlankNode::from(annotation.subject),
                annotation.property.into_inner(),
                annotation.value,
            ));
        }

        tracing::debug!(count = triples.len(), "exported store triples");
        triples
    }

    /// The store content as an RDF graph. See [`IndividualStore::triples`].
    pub fn to_graph(&self) -> Graph {
        let mut graph = Graph::new();
        for triple in self.triples() {
            graph.insert(&triple);
        }
        graph
    }
}

/// Writes an `rdf:first`/`rdf:rest` chain and returns its head.
fn write_list(items: impl DoubleEndedIterator<Item = Term>, triples: &mut Vec<Triple>) -> Term {
    let mut rest = Term::from(rdf::NIL.into_owned());
    for item in items.rev() {
        let cell = BlankNode::default();
        triples.push(Triple::new(cell.clone(), rdf::FIRST, item));
        triples.push(Triple::new(cell.clone(), rdf::REST, rest));
        rest = cell.into();
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::PropertyId;
    use oxrdf::{Literal, NamedNode};

    fn individual(name: &str) -> Individual {
        NamedNode::new(format!("http://example.com/{name}")).unwrap().into()
    }

    #[test]
    fn negative_assertion_is_reified() {
        let mut store = IndividualStore::new();
        let p = PropertyId::new_from_iri("http://example.com/age").unwrap();
        assert!(
            store
                .assert_negative_datatype(individual("a"), p, Literal::from(3))
                .is_applied()
        );
        let graph = store.to_graph();
        let node = graph
            .subject_for_predicate_object(rdf::TYPE, owl::NEGATIVE_PROPERTY_ASSERTION)
            .unwrap();
        assert!(
            graph
                .object_for_subject_predicate(node, owl::TARGET_VALUE)
                .is_some()
        );
        assert!(
            graph
                .object_for_subject_predicate(node, owl::TARGET_INDIVIDUAL)
                .is_none()
        );
    }

    #[test]
    fn all_different_members_are_listed() {
        let mut store = IndividualStore::new();
        assert!(
            store
                .declare_all_different([individual("a"), individual("b"), individual("c")])
                .unwrap()
                .is_applied()
        );
        let triples = store.triples();
        assert_eq!(
            triples
                .iter()
                .filter(|t| t.predicate.as_ref() == rdf::FIRST)
                .count(),
            3
        );
        assert_eq!(
            triples
                .iter()
                .filter(|t| t.predicate.as_ref() == owl::DISTINCT_MEMBERS)
                .count(),
            1
        );
        assert_eq!(
            triples
                .iter()
                .filter(|t| t.object == Term::from(owl::NAMED_INDIVIDUAL.into_owned()))
                .count(),
            3
        );
    }
}
