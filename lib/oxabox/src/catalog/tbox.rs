use super::ClassExpressionCatalog;
use crate::closure::reachable;
use crate::entity::{ClassId, Individual, PropertyId};
use crate::error::CatalogError;
use crate::expression::{ClassExpression, Composite, Restriction};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// An in-memory class model.
///
/// ```
/// use oxabox::{ClassExpressionCatalog, ClassId, PropertyId, Restriction, RestrictionKind, TBox};
///
/// let has_child = PropertyId::new_from_iri("http://example.com/hasChild")?;
/// let parent = ClassId::new_from_iri("http://example.com/Parent")?;
/// let mut tbox = TBox::new();
/// tbox.declare_restriction(
///     parent.clone(),
///     Restriction::new(has_child, RestrictionKind::MinCardinality(1))?,
/// );
/// assert!(tbox.classify(&parent)?.as_restriction().is_some());
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TBox {
    definitions: FxHashMap<ClassId, ClassExpression>,
    /// super class -> direct subclasses
    subclasses: FxHashMap<ClassId, FxHashSet<ClassId>>,
    equivalent_classes: FxHashMap<ClassId, FxHashSet<ClassId>>,
    /// super property -> direct sub-properties
    sub_properties: FxHashMap<PropertyId, FxHashSet<PropertyId>>,
    equivalent_properties: FxHashMap<PropertyId, FxHashSet<PropertyId>>,
    inverse_properties: FxHashMap<PropertyId, FxHashSet<PropertyId>>,
    transitive_properties: FxHashSet<PropertyId>,
}

impl TBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the structure of `class`, replacing any previous definition.
    pub fn define(
        &mut self,
        class: impl Into<ClassId>,
        expression: impl Into<ClassExpression>,
    ) -> &mut Self {
        self.definitions.insert(class.into(), expression.into());
        self
    }

    pub fn declare_restriction(
        &mut self,
        class: impl Into<ClassId>,
        restriction: Restriction,
    ) -> &mut Self {
        self.define(class, restriction)
    }

    pub fn declare_union(
        &mut self,
        class: impl Into<ClassId>,
        members: impl IntoIterator<Item = ClassId>,
    ) -> &mut Self {
        self.define(class, Composite::Union(members.into_iter().collect()))
    }

    pub fn declare_intersection(
        &mut self,
        class: impl Into<ClassId>,
        members: impl IntoIterator<Item = ClassId>,
    ) -> &mut Self {
        self.define(class, Composite::Intersection(members.into_iter().collect()))
    }

    pub fn declare_complement(
        &mut self,
        class: impl Into<ClassId>,
        member: impl Into<ClassId>,
    ) -> &mut Self {
        self.define(class, Composite::Complement(member.into()))
    }

    /// `owl:oneOf`
    pub fn declare_enumeration(
        &mut self,
        class: impl Into<ClassId>,
        members: impl IntoIterator<Item = Individual>,
    ) -> &mut Self {
        self.define(
            class,
            ClassExpression::Enumerate(members.into_iter().collect()),
        )
    }

    pub fn declare_subclass(
        &mut self,
        sub: impl Into<ClassId>,
        sup: impl Into<ClassId>,
    ) -> &mut Self {
        self.subclasses
            .entry(sup.into())
            .or_default()
            .insert(sub.into());
        self
    }

    pub fn declare_equivalent_classes(
        &mut self,
        a: impl Into<ClassId>,
        b: impl Into<ClassId>,
    ) -> &mut Self {
        insert_symmetric(&mut self.equivalent_classes, a.into(), b.into());
        self
    }

    pub fn declare_sub_property(
        &mut self,
        sub: impl Into<PropertyId>,
        sup: impl Into<PropertyId>,
    ) -> &mut Self {
        self.sub_properties
            .entry(sup.into())
            .or_default()
            .insert(sub.into());
        self
    }

    pub fn declare_equivalent_properties(
        &mut self,
        a: impl Into<PropertyId>,
        b: impl Into<PropertyId>,
    ) -> &mut Self {
        insert_symmetric(&mut self.equivalent_properties, a.into(), b.into());
        self
    }

    pub fn declare_inverse_properties(
        &mut self,
        a: impl Into<PropertyId>,
        b: impl Into<PropertyId>,
    ) -> &mut Self {
        insert_symmetric(&mut self.inverse_properties, a.into(), b.into());
        self
    }

    pub fn declare_transitive_property(&mut self, property: impl Into<PropertyId>) -> &mut Self {
        self.transitive_properties.insert(property.into());
        self
    }
}

fn insert_symmetric<T: Clone + Eq + Hash>(map: &mut FxHashMap<T, FxHashSet<T>>, a: T, b: T) {
    if a == b {
        return;
    }
    map.entry(a.clone()).or_default().insert(b.clone());
    map.entry(b).or_default().insert(a);
}

/// Closure of `start` over `edges`, `start` excluded.
fn closed<T: Clone + Eq + Hash>(edges: &FxHashMap<T, FxHashSet<T>>, start: &T) -> Vec<T> {
    let neighbours = |node: &T| {
        edges
            .get(node)
            .into_iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
    };
    let mut result = reachable(neighbours(start), neighbours);
    result.remove(start);
    result.into_iter().collect()
}

impl ClassExpressionCatalog for TBox {
    fn classify(&self, class: &ClassId) -> Result<ClassExpression, CatalogError> {
        Ok(self
            .definitions
            .get(class)
            .cloned()
            .unwrap_or_else(|| ClassExpression::Simple(class.clone())))
    }

    fn subclasses_of(&self, class: &ClassId) -> Vec<ClassId> {
        closed(&self.subclasses, class)
    }

    fn equivalent_classes_of(&self, class: &ClassId) -> Vec<ClassId> {
        closed(&self.equivalent_classes, class)
    }

    fn sub_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        closed(&self.sub_properties, property)
    }

    fn equivalent_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        closed(&self.equivalent_properties, property)
    }

    fn inverse_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        self.inverse_properties
            .get(property)
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    fn is_transitive(&self, property: &PropertyId) -> bool {
        self.transitive_properties.contains(property)
    }
}
