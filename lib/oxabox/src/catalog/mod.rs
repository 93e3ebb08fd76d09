//! The class model consulted by the membership evaluator.

mod graph;
mod tbox;

pub use graph::GraphCatalog;
pub use tbox::TBox;

use crate::entity::{ClassId, PropertyId};
use crate::error::CatalogError;
use crate::expression::ClassExpression;

/// Source of class structure and of class and property hierarchies.
///
/// Hierarchy lookups are closed: [`subclasses_of`](Self::subclasses_of)
/// returns direct and indirect subclasses. The queried entity itself is never
/// part of the result.
pub trait ClassExpressionCatalog {
    /// Returns the structure of `class`.
    ///
    /// Classes the catalog knows nothing about are [`ClassExpression::Simple`].
    fn classify(&self, class: &ClassId) -> Result<ClassExpression, CatalogError>;

    fn subclasses_of(&self, class: &ClassId) -> Vec<ClassId>;

    fn equivalent_classes_of(&self, class: &ClassId) -> Vec<ClassId>;

    fn sub_properties_of(&self, property: &PropertyId) -> Vec<PropertyId>;

    fn equivalent_properties_of(&self, property: &PropertyId) -> Vec<PropertyId>;

    /// Named properties declared `owl:inverseOf` `property`, in either direction.
    fn inverse_properties_of(&self, property: &PropertyId) -> Vec<PropertyId>;

    /// `true` if `property` is an `owl:TransitiveProperty`.
    fn is_transitive(&self, _property: &PropertyId) -> bool {
        false
    }
}

impl<T: ClassExpressionCatalog + ?Sized> ClassExpressionCatalog for &T {
    fn classify(&self, class: &ClassId) -> Result<ClassExpression, CatalogError> {
        (**self).classify(class)
    }

    fn subclasses_of(&self, class: &ClassId) -> Vec<ClassId> {
        (**self).subclasses_of(class)
    }

    fn equivalent_classes_of(&self, class: &ClassId) -> Vec<ClassId> {
        (**self).equivalent_classes_of(class)
    }

    fn sub_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        (**self).sub_properties_of(property)
    }

    fn equivalent_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        (**self).equivalent_properties_of(property)
    }

    fn inverse_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        (**self).inverse_properties_of(property)
    }

    fn is_transitive(&self, property: &PropertyId) -> bool {
        (**self).is_transitive(property)
    }
}
