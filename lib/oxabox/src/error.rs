//! Error types for A-BOX operations.
//!
//! Only structural problems are errors. Conflicts with existing facts are not:
//! they are reported as [`Diagnostic`](crate::Diagnostic)s and leave the store unchanged.

use crate::entity::{ClassId, Individual};
use oxrdf::{BlankNode, NamedOrBlankNode};

/// Main error type of the crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AboxError {
    /// A mutation was refused because its arguments are malformed.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// The class model handed to the evaluator is malformed or unsupported.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A membership query could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Errors raised by declare/assert operations and by restriction construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DeclarationError {
    /// A blank node was given where a named property is required.
    #[error("Blank node {node} cannot be used where a named property is required")]
    BlankPredicate { node: BlankNode },

    /// `owl:sameAs` between an individual and itself.
    #[error("{individual} cannot be declared the same as itself")]
    SelfSameAs { individual: Individual },

    /// `owl:differentFrom` between an individual and itself.
    #[error("{individual} cannot be declared different from itself")]
    SelfDifferentFrom { individual: Individual },

    /// `owl:AllDifferent` without members.
    #[error("An owl:AllDifferent group needs at least one member")]
    EmptyAllDifferent,

    /// A cardinality-style restriction with a minimum above its maximum.
    #[error("Invalid cardinality bounds: min {min} is greater than max {max}")]
    InvalidCardinality { min: u32, max: u32 },
}

impl DeclarationError {
    /// Creates an invalid cardinality error.
    pub fn invalid_cardinality(min: u32, max: u32) -> Self {
        Self::InvalidCardinality { min, max }
    }
}

/// Errors raised while reading the class model.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// A restriction lacks a property it cannot be interpreted without.
    #[error("Restriction {class} is missing required property {property}")]
    MissingMetadata {
        class: NamedOrBlankNode,
        property: &'static str,
    },

    /// A restriction whose kind is not one of the supported constructs.
    #[error("Restriction {class} uses an unsupported construct: {message}")]
    UnsupportedRestriction {
        class: NamedOrBlankNode,
        message: String,
    },

    /// An invalid value for a restriction property.
    #[error("Invalid value for {property} on {class}: {message}")]
    InvalidValue {
        class: NamedOrBlankNode,
        property: &'static str,
        message: String,
    },

    /// A broken `rdf:first`/`rdf:rest` chain.
    #[error("Malformed RDF list starting at {head}: {message}")]
    MalformedList {
        head: NamedOrBlankNode,
        message: String,
    },

    /// A restriction with an invalid declaration (e.g. min > max).
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

impl CatalogError {
    /// Creates a missing metadata error.
    pub fn missing_metadata(class: impl Into<NamedOrBlankNode>, property: &'static str) -> Self {
        Self::MissingMetadata {
            class: class.into(),
            property,
        }
    }

    /// Creates an unsupported restriction error.
    pub fn unsupported_restriction(
        class: impl Into<NamedOrBlankNode>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnsupportedRestriction {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        class: impl Into<NamedOrBlankNode>,
        property: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            class: class.into(),
            property,
            message: message.into(),
        }
    }

    /// Creates a malformed list error.
    pub fn malformed_list(head: impl Into<NamedOrBlankNode>, message: impl Into<String>) -> Self {
        Self::MalformedList {
            head: head.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while evaluating class membership.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EvaluationError {
    /// A class expression refers back to itself through composites or restrictions.
    #[error("Class {class} is defined in terms of itself")]
    CyclicClassExpression { class: ClassId },

    /// The expression nesting is deeper than the configured limit.
    #[error("Maximum class expression depth ({depth}) exceeded")]
    MaxDepthExceeded { depth: usize },
}
