//! Identifiers of individuals, classes and properties.

use crate::error::DeclarationError;
use oxrdf::{
    BlankNode, IriParseError, Literal, NamedNode, NamedOrBlankNode, NamedOrBlankNodeRef, Term,
};
use std::fmt;

/// An individual of the domain of discourse.
///
/// Individuals are identified by their IRI or blank node: two values built
/// from the same node are the same individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    /// A named individual (identified by an IRI).
    Named(NamedNode),
    /// An anonymous individual (blank node).
    Anonymous(BlankNode),
}

impl Individual {
    /// Returns `true` if this is a named individual.
    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    /// Returns `true` if this is an anonymous individual.
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }

    /// Returns the named node if this is a named individual.
    #[inline]
    pub fn as_named(&self) -> Option<&NamedNode> {
        match self {
            Self::Named(n) => Some(n),
            Self::Anonymous(_) => None,
        }
    }

    #[inline]
    pub fn as_node_ref(&self) -> NamedOrBlankNodeRef<'_> {
        match self {
            Self::Named(n) => n.as_ref().into(),
            Self::Anonymous(b) => b.as_ref().into(),
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::Anonymous(b) => write!(f, "{b}"),
        }
    }
}

impl From<NamedNode> for Individual {
    fn from(node: NamedNode) -> Self {
        Self::Named(node)
    }
}

impl From<BlankNode> for Individual {
    fn from(node: BlankNode) -> Self {
        Self::Anonymous(node)
    }
}

impl From<NamedOrBlankNode> for Individual {
    fn from(node: NamedOrBlankNode) -> Self {
        match node {
            NamedOrBlankNode::NamedNode(n) => Self::Named(n),
            NamedOrBlankNode::BlankNode(b) => Self::Anonymous(b),
        }
    }
}

impl From<Individual> for NamedOrBlankNode {
    fn from(individual: Individual) -> Self {
        match individual {
            Individual::Named(n) => n.into(),
            Individual::Anonymous(b) => b.into(),
        }
    }
}

impl From<Individual> for Term {
    fn from(individual: Individual) -> Self {
        match individual {
            Individual::Named(n) => n.into(),
            Individual::Anonymous(b) => b.into(),
        }
    }
}

/// Identifier of a class: an IRI for named classes, a blank node for
/// anonymous restrictions, composites and enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassId(NamedOrBlankNode);

impl ClassId {
    /// Creates a class identifier from a named or blank node.
    #[inline]
    pub fn new(node: impl Into<NamedOrBlankNode>) -> Self {
        Self(node.into())
    }

    /// Creates a class identifier from an IRI string.
    #[inline]
    pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, IriParseError> {
        Ok(Self(NamedNode::new(iri)?.into()))
    }

    #[inline]
    pub fn as_node(&self) -> &NamedOrBlankNode {
        &self.0
    }

    #[inline]
    pub fn as_node_ref(&self) -> NamedOrBlankNodeRef<'_> {
        self.0.as_ref()
    }

    /// Returns `true` if the class has an IRI.
    #[inline]
    pub fn is_named(&self) -> bool {
        self.0.is_named_node()
    }

    #[inline]
    pub fn into_inner(self) -> NamedOrBlankNode {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for ClassId {
    fn from(node: NamedNode) -> Self {
        Self(node.into())
    }
}

impl From<BlankNode> for ClassId {
    fn from(node: BlankNode) -> Self {
        Self(node.into())
    }
}

impl From<NamedOrBlankNode> for ClassId {
    fn from(node: NamedOrBlankNode) -> Self {
        Self(node)
    }
}

impl From<ClassId> for Term {
    fn from(class: ClassId) -> Self {
        class.0.into()
    }
}

/// A named property (object, datatype or annotation property).
///
/// Predicates are always IRIs: building one from a blank node fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyId(NamedNode);

impl PropertyId {
    #[inline]
    pub fn new(iri: NamedNode) -> Self {
        Self(iri)
    }

    /// Creates a property from an IRI string.
    #[inline]
    pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, IriParseError> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// Returns the IRI of this property.
    #[inline]
    pub fn iri(&self) -> &NamedNode {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> NamedNode {
        self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for PropertyId {
    fn from(node: NamedNode) -> Self {
        Self(node)
    }
}

impl TryFrom<NamedOrBlankNode> for PropertyId {
    type Error = DeclarationError;

    fn try_from(node: NamedOrBlankNode) -> Result<Self, Self::Error> {
        match node {
            NamedOrBlankNode::NamedNode(n) => Ok(Self(n)),
            NamedOrBlankNode::BlankNode(node) => Err(DeclarationError::BlankPredicate { node }),
        }
    }
}

impl From<PropertyId> for NamedNode {
    fn from(property: PropertyId) -> Self {
        property.0
    }
}

/// The target of an assertion, an annotation or a `owl:hasValue` restriction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Individual(Individual),
    Literal(Literal),
}

impl Value {
    #[inline]
    pub fn as_individual(&self) -> Option<&Individual> {
        match self {
            Self::Individual(i) => Some(i),
            Self::Literal(_) => None,
        }
    }

    #[inline]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Individual(_) => None,
            Self::Literal(l) => Some(l),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Individual(i) => write!(f, "{i}"),
            Self::Literal(l) => write!(f, "{l}"),
        }
    }
}

impl From<Individual> for Value {
    fn from(individual: Individual) -> Self {
        Self::Individual(individual)
    }
}

impl From<NamedNode> for Value {
    fn from(node: NamedNode) -> Self {
        Self::Individual(node.into())
    }
}

impl From<BlankNode> for Value {
    fn from(node: BlankNode) -> Self {
        Self::Individual(node.into())
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        match value {
            Value::Individual(i) => i.into(),
            Value::Literal(l) => l.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_node_is_not_a_property() {
        let node = NamedOrBlankNode::from(BlankNode::default());
        assert!(matches!(
            PropertyId::try_from(node),
            Err(DeclarationError::BlankPredicate { .. })
        ));
    }

    #[test]
    fn individual_identity_is_the_node() {
        let a = Individual::from(NamedNode::new("http://example.com/a").unwrap());
        let b = Individual::from(NamedOrBlankNode::from(
            NamedNode::new("http://example.com/a").unwrap(),
        ));
        assert_eq!(a, b);
        assert!(a.is_named());
        assert_ne!(a, Individual::from(BlankNode::default()));
    }
}
