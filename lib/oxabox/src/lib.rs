#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod catalog;
mod closure;
mod diagnostic;
mod entity;
mod error;
mod expression;
mod lens;
mod literal;
mod membership;
mod store;
pub mod vocab;

pub use crate::catalog::{ClassExpressionCatalog, GraphCatalog, TBox};
pub use crate::closure::RelationClosure;
pub use crate::diagnostic::{Declaration, Diagnostic, DiagnosticKind};
pub use crate::entity::{ClassId, Individual, PropertyId, Value};
pub use crate::error::{AboxError, CatalogError, DeclarationError, EvaluationError};
pub use crate::expression::{
    CardinalityBounds, ClassExpression, Composite, PropertyExpression, Restriction,
    RestrictionKind,
};
pub use crate::lens::IndividualLens;
pub use crate::literal::literal_value_eq;
pub use crate::membership::{ClassMembership, MembershipConfig};
pub use crate::store::{
    AllDifferentGroup, Annotation, Assertion, AssertionIndex, ConsistencyChecker,
    IndividualStore, Polarity, StoreConfig,
};
