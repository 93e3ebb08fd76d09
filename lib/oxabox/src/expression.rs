//! Class expressions as seen by the membership evaluator.

use crate::entity::{ClassId, Individual, PropertyId, Value};
use crate::error::DeclarationError;

/// The structure of a class, as returned once by
/// [`ClassExpressionCatalog::classify`](crate::ClassExpressionCatalog::classify).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassExpression {
    /// A class only defined by its place in the hierarchy.
    Simple(ClassId),
    /// An `owl:Restriction`.
    Restriction(Restriction),
    /// `owl:unionOf`, `owl:intersectionOf` or `owl:complementOf`.
    Composite(Composite),
    /// `owl:oneOf`: a closed list of individuals.
    Enumerate(Vec<Individual>),
}

impl ClassExpression {
    /// Returns the restriction if this is one.
    pub fn as_restriction(&self) -> Option<&Restriction> {
        match self {
            Self::Restriction(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Restriction> for ClassExpression {
    fn from(restriction: Restriction) -> Self {
        Self::Restriction(restriction)
    }
}

impl From<Composite> for ClassExpression {
    fn from(composite: Composite) -> Self {
        Self::Composite(composite)
    }
}

/// Boolean combinations of classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composite {
    Union(Vec<ClassId>),
    Intersection(Vec<ClassId>),
    Complement(ClassId),
}

/// The property a restriction applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyExpression {
    Named(PropertyId),
    /// An anonymous `[ owl:inverseOf p ]` node.
    InverseOf(PropertyId),
}

impl PropertyExpression {
    /// Returns the named property, ignoring the inversion.
    pub fn base_property(&self) -> &PropertyId {
        match self {
            Self::Named(p) | Self::InverseOf(p) => p,
        }
    }

    pub fn is_inverse(&self) -> bool {
        matches!(self, Self::InverseOf(_))
    }
}

impl From<PropertyId> for PropertyExpression {
    fn from(property: PropertyId) -> Self {
        Self::Named(property)
    }
}

/// The constraint an `owl:Restriction` puts on its property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestrictionKind {
    Cardinality(u32),
    MinCardinality(u32),
    MaxCardinality(u32),
    MinMaxCardinality {
        min: u32,
        max: u32,
    },
    QualifiedCardinality {
        cardinality: u32,
        on_class: ClassId,
    },
    MinQualifiedCardinality {
        min: u32,
        on_class: ClassId,
    },
    MaxQualifiedCardinality {
        max: u32,
        on_class: ClassId,
    },
    MinMaxQualifiedCardinality {
        min: u32,
        max: u32,
        on_class: ClassId,
    },
    AllValuesFrom(ClassId),
    SomeValuesFrom(ClassId),
    HasValue(Value),
    HasSelf(bool),
}

impl RestrictionKind {
    /// Returns the counting bounds of cardinality-style kinds.
    ///
    /// `None` bounds are unset: `MinCardinality(2)` has no maximum and
    /// `MaxCardinality(0)` has a maximum of zero.
    pub fn cardinality_bounds(&self) -> Option<CardinalityBounds<'_>> {
        let (min, max, on_class) = match self {
            Self::Cardinality(n) => (Some(*n), Some(*n), None),
            Self::MinCardinality(min) => (Some(*min), None, None),
            Self::MaxCardinality(max) => (None, Some(*max), None),
            Self::MinMaxCardinality { min, max } => (Some(*min), Some(*max), None),
            Self::QualifiedCardinality {
                cardinality,
                on_class,
            } => (Some(*cardinality), Some(*cardinality), Some(on_class)),
            Self::MinQualifiedCardinality { min, on_class } => (Some(*min), None, Some(on_class)),
            Self::MaxQualifiedCardinality { max, on_class } => (None, Some(*max), Some(on_class)),
            Self::MinMaxQualifiedCardinality { min, max, on_class } => {
                (Some(*min), Some(*max), Some(on_class))
            }
            Self::AllValuesFrom(_)
            | Self::SomeValuesFrom(_)
            | Self::HasValue(_)
            | Self::HasSelf(_) => return None,
        };
        Some(CardinalityBounds { min, max, on_class })
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cardinality(_) => "cardinality",
            Self::MinCardinality(_) => "minCardinality",
            Self::MaxCardinality(_) => "maxCardinality",
            Self::MinMaxCardinality { .. } => "minMaxCardinality",
            Self::QualifiedCardinality { .. } => "qualifiedCardinality",
            Self::MinQualifiedCardinality { .. } => "minQualifiedCardinality",
            Self::MaxQualifiedCardinality { .. } => "maxQualifiedCardinality",
            Self::MinMaxQualifiedCardinality { .. } => "minMaxQualifiedCardinality",
            Self::AllValuesFrom(_) => "allValuesFrom",
            Self::SomeValuesFrom(_) => "someValuesFrom",
            Self::HasValue(_) => "hasValue",
            Self::HasSelf(_) => "hasSelf",
        }
    }
}

/// Occurrence bounds of a cardinality-style restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalityBounds<'a> {
    pub min: Option<u32>,
    pub max: Option<u32>,
    /// The class counted objects must belong to (qualified variants only).
    pub on_class: Option<&'a ClassId>,
}

impl CardinalityBounds<'_> {
    /// `true` if every individual satisfies the bounds whatever it asserts.
    pub fn is_trivial(&self) -> bool {
        self.min == Some(0) && self.max.is_none()
    }

    /// `true` if `count` occurrences are allowed.
    pub fn accepts(&self, count: u32) -> bool {
        self.min.is_none_or(|min| count >= min) && self.max.is_none_or(|max| count <= max)
    }
}

/// An anonymous class defined by a constraint on a property.
///
/// Built with [`Restriction::new`], which refuses cardinality bounds with
/// `min > max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    on_property: PropertyExpression,
    kind: RestrictionKind,
}

impl Restriction {
    /// Creates a restriction.
    ///
    /// ```
    /// use oxabox::{PropertyId, Restriction, RestrictionKind};
    ///
    /// let p = PropertyId::new_from_iri("http://example.com/p")?;
    /// assert!(Restriction::new(p.clone(), RestrictionKind::MaxCardinality(1)).is_ok());
    /// let kind = RestrictionKind::MinMaxCardinality { min: 3, max: 1 };
    /// assert!(Restriction::new(p, kind).is_err());
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn new(
        on_property: impl Into<PropertyExpression>,
        kind: RestrictionKind,
    ) -> Result<Self, DeclarationError> {
        if let Some(CardinalityBounds {
            min: Some(min),
            max: Some(max),
            ..
        }) = kind.cardinality_bounds()
        {
            if min > max {
                return Err(DeclarationError::invalid_cardinality(min, max));
            }
        }
        Ok(Self {
            on_property: on_property.into(),
            kind,
        })
    }

    pub fn on_property(&self) -> &PropertyExpression {
        &self.on_property
    }

    pub fn kind(&self) -> &RestrictionKind {
        &self.kind
    }
}
