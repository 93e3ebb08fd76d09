use super::ClassExpressionCatalog;
use crate::closure::reachable;
use crate::entity::{ClassId, Individual, PropertyId, Value};
use crate::error::CatalogError;
use crate::expression::{
    ClassExpression, Composite, PropertyExpression, Restriction, RestrictionKind,
};
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{Graph, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Term, TermRef, TripleRef};
use rustc_hash::FxHashSet;

/// Reads the class model from the OWL 2 RDF mapping stored in a graph.
///
/// Class structure is decoded on each [`classify`](ClassExpressionCatalog::classify)
/// call. Malformed or unsupported restrictions are reported then, not when the
/// catalog is built.
#[derive(Debug, Clone, Copy)]
pub struct GraphCatalog<'a> {
    graph: &'a Graph,
}

impl<'a> GraphCatalog<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    fn object(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> Option<TermRef<'a>> {
        self.graph.object_for_subject_predicate(subject, predicate)
    }

    fn objects(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> Vec<TermRef<'a>> {
        self.graph
            .objects_for_subject_predicate(subject, predicate)
            .collect()
    }

    fn subjects(&self, predicate: NamedNodeRef<'_>, object: TermRef<'_>) -> Vec<NamedOrBlankNode> {
        self.graph
            .subjects_for_predicate_object(predicate, object)
            .filter_map(|s| as_node(TermRef::from(s)))
            .collect()
    }

    fn parse_restriction(&self, class: &ClassId) -> Result<Restriction, CatalogError> {
        let node = class.as_node_ref();
        if self.object(node, owl::ON_PROPERTIES).is_some() {
            return Err(CatalogError::unsupported_restriction(
                node.into_owned(),
                "owl:onProperties (n-ary data restrictions)",
            ));
        }
        if self.object(node, owl::ON_DATA_RANGE).is_some() {
            return Err(CatalogError::unsupported_restriction(
                node.into_owned(),
                "owl:onDataRange (qualified data cardinality)",
            ));
        }
        let on_property = self.parse_property_expression(node)?;

        let cardinality = self.non_negative(node, owl::CARDINALITY, "owl:cardinality")?;
        let min = self.non_negative(node, owl::MIN_CARDINALITY, "owl:minCardinality")?;
        let max = self.non_negative(node, owl::MAX_CARDINALITY, "owl:maxCardinality")?;
        let qualified = self.non_negative(
            node,
            owl::QUALIFIED_CARDINALITY,
            "owl:qualifiedCardinality",
        )?;
        let min_qualified = self.non_negative(
            node,
            owl::MIN_QUALIFIED_CARDINALITY,
            "owl:minQualifiedCardinality",
        )?;
        let max_qualified = self.non_negative(
            node,
            owl::MAX_QUALIFIED_CARDINALITY,
            "owl:maxQualifiedCardinality",
        )?;

        let kind = if let Some(cardinality) = qualified {
            RestrictionKind::QualifiedCardinality {
                cardinality,
                on_class: self.on_class(node)?,
            }
        } else if let Some(min) = min_qualified {
            let on_class = self.on_class(node)?;
            match max_qualified {
                Some(max) => RestrictionKind::MinMaxQualifiedCardinality { min, max, on_class },
                None => RestrictionKind::MinQualifiedCardinality { min, on_class },
            }
        } else if let Some(max) = max_qualified {
            RestrictionKind::MaxQualifiedCardinality {
                max,
                on_class: self.on_class(node)?,
            }
        } else if let Some(n) = cardinality {
            RestrictionKind::Cardinality(n)
        } else if let Some(min) = min {
            match max {
                Some(max) => RestrictionKind::MinMaxCardinality { min, max },
                None => RestrictionKind::MinCardinality(min),
            }
        } else if let Some(max) = max {
            RestrictionKind::MaxCardinality(max)
        } else if let Some(filler) =
            self.class_object(node, owl::ALL_VALUES_FROM, "owl:allValuesFrom")?
        {
            RestrictionKind::AllValuesFrom(filler)
        } else if let Some(filler) =
            self.class_object(node, owl::SOME_VALUES_FROM, "owl:someValuesFrom")?
        {
            RestrictionKind::SomeValuesFrom(filler)
        } else if let Some(value) = self.object(node, owl::HAS_VALUE) {
            RestrictionKind::HasValue(match value {
                TermRef::Literal(literal) => literal.into_owned().into(),
                other => as_node(other).map(Individual::from).map(Value::from).ok_or_else(|| {
                    CatalogError::invalid_value(
                        node.into_owned(),
                        "owl:hasValue",
                        format!("{other} is neither an individual nor a literal"),
                    )
                })?,
            })
        } else if let Some(value) = self.object(node, owl::HAS_SELF) {
            RestrictionKind::HasSelf(parse_boolean(value).ok_or_else(|| {
                CatalogError::invalid_value(
                    node.into_owned(),
                    "owl:hasSelf",
                    format!("{value} is not a boolean"),
                )
            })?)
        } else {
            return Err(CatalogError::unsupported_restriction(
                node.into_owned(),
                "no supported restriction property",
            ));
        };
        Ok(Restriction::new(on_property, kind)?)
    }

    /// The `owl:onClass` of a qualified cardinality restriction.
    fn on_class(&self, node: NamedOrBlankNodeRef<'_>) -> Result<ClassId, CatalogError> {
        self.class_object(node, owl::ON_CLASS, "owl:onClass")?
            .ok_or_else(|| CatalogError::missing_metadata(node.into_owned(), "owl:onClass"))
    }

    fn parse_property_expression(
        &self,
        node: NamedOrBlankNodeRef<'_>,
    ) -> Result<PropertyExpression, CatalogError> {
        let property = self
            .object(node, owl::ON_PROPERTY)
            .ok_or_else(|| CatalogError::missing_metadata(node.into_owned(), "owl:onProperty"))?;
        match property {
            TermRef::NamedNode(p) => Ok(PropertyId::from(p.into_owned()).into()),
            TermRef::BlankNode(b) => match self.object(b.into(), owl::INVERSE_OF) {
                Some(TermRef::NamedNode(p)) => {
                    Ok(PropertyExpression::InverseOf(p.into_owned().into()))
                }
                _ => Err(CatalogError::invalid_value(
                    node.into_owned(),
                    "owl:onProperty",
                    format!("{b} is neither a named property nor an owl:inverseOf expression"),
                )),
            },
            _ => Err(CatalogError::invalid_value(
                node.into_owned(),
                "owl:onProperty",
                format!("{property} is not a property"),
            )),
        }
    }

    fn non_negative(
        &self,
        node: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
        name: &'static str,
    ) -> Result<Option<u32>, CatalogError> {
        let Some(value) = self.object(node, predicate) else {
            return Ok(None);
        };
        let TermRef::Literal(literal) = value else {
            return Err(CatalogError::invalid_value(
                node.into_owned(),
                name,
                format!("{value} is not a literal"),
            ));
        };
        literal.value().trim().parse().map(Some).map_err(|_| {
            CatalogError::invalid_value(
                node.into_owned(),
                name,
                format!("{literal} is not a non-negative integer"),
            )
        })
    }

    fn class_object(
        &self,
        node: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
        name: &'static str,
    ) -> Result<Option<ClassId>, CatalogError> {
        let Some(value) = self.object(node, predicate) else {
            return Ok(None);
        };
        as_node(value).map(|c| Some(c.into())).ok_or_else(|| {
            CatalogError::invalid_value(node.into_owned(), name, format!("{value} is not a class"))
        })
    }

    /// Reads an `rdf:first`/`rdf:rest` chain.
    fn parse_list(&self, head: TermRef<'_>) -> Result<Vec<Term>, CatalogError> {
        let mut items = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = head;
        while current != TermRef::from(rdf::NIL) {
            let Some(cell) = as_node(current) else {
                return Err(CatalogError::malformed_list(
                    list_head(head),
                    format!("{current} is not a list node"),
                ));
            };
            if !visited.insert(cell.clone()) {
                return Err(CatalogError::malformed_list(list_head(head), "cyclic list"));
            }
            let first = self
                .graph
                .object_for_subject_predicate(cell.as_ref(), rdf::FIRST)
                .ok_or_else(|| CatalogError::malformed_list(list_head(head), "missing rdf:first"))?;
            items.push(first.into_owned());
            current = self
                .graph
                .object_for_subject_predicate(cell.as_ref(), rdf::REST)
                .ok_or_else(|| CatalogError::malformed_list(list_head(head), "missing rdf:rest"))?;
        }
        Ok(items)
    }

    fn class_list(
        &self,
        class: &ClassId,
        head: TermRef<'_>,
        name: &'static str,
    ) -> Result<Vec<ClassId>, CatalogError> {
        self.parse_list(head)?
            .into_iter()
            .map(|item| {
                as_node(item.as_ref()).map(ClassId::from).ok_or_else(|| {
                    CatalogError::invalid_value(
                        class.as_node().clone(),
                        name,
                        format!("{item} is not a class"),
                    )
                })
            })
            .collect()
    }

    fn closed_classes(
        &self,
        class: &ClassId,
        next: impl Fn(&ClassId) -> Vec<ClassId>,
    ) -> Vec<ClassId> {
        let mut result = reachable(next(class), next);
        result.remove(class);
        result.into_iter().collect()
    }

    fn closed_properties(
        &self,
        property: &PropertyId,
        next: impl Fn(&PropertyId) -> Vec<PropertyId>,
    ) -> Vec<PropertyId> {
        let mut result = reachable(next(property), next);
        result.remove(property);
        result.into_iter().collect()
    }
}

fn as_node(term: TermRef<'_>) -> Option<NamedOrBlankNode> {
    match term {
        TermRef::NamedNode(n) => Some(n.into_owned().into()),
        TermRef::BlankNode(b) => Some(b.into_owned().into()),
        _ => None,
    }
}

fn list_head(head: TermRef<'_>) -> NamedOrBlankNode {
    as_node(head).unwrap_or_else(|| rdf::NIL.into_owned().into())
}

fn parse_boolean(value: TermRef<'_>) -> Option<bool> {
    let TermRef::Literal(literal) = value else {
        return None;
    };
    if literal.datatype() != xsd::BOOLEAN && literal.datatype() != xsd::STRING {
        return None;
    }
    match literal.value() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn named_properties(nodes: impl IntoIterator<Item = NamedOrBlankNode>) -> Vec<PropertyId> {
    nodes
        .into_iter()
        .filter_map(|node| PropertyId::try_from(node).ok())
        .collect()
}

impl ClassExpressionCatalog for GraphCatalog<'_> {
    fn classify(&self, class: &ClassId) -> Result<ClassExpression, CatalogError> {
        let node = class.as_node_ref();
        let is_restriction = self
            .graph
            .contains(TripleRef::new(node, rdf::TYPE, owl::RESTRICTION))
            || self.object(node, owl::ON_PROPERTY).is_some()
            || self.object(node, owl::ON_PROPERTIES).is_some();
        if is_restriction {
            return Ok(self.parse_restriction(class)?.into());
        }
        if let Some(head) = self.object(node, owl::UNION_OF) {
            return Ok(Composite::Union(self.class_list(class, head, "owl:unionOf")?).into());
        }
        if let Some(head) = self.object(node, owl::INTERSECTION_OF) {
            return Ok(
                Composite::Intersection(self.class_list(class, head, "owl:intersectionOf")?).into(),
            );
        }
        if let Some(member) = self.class_object(node, owl::COMPLEMENT_OF, "owl:complementOf")? {
            return Ok(Composite::Complement(member).into());
        }
        if let Some(head) = self.object(node, owl::ONE_OF) {
            let members = self
                .parse_list(head)?
                .into_iter()
                .map(|item| {
                    as_node(item.as_ref()).map(Individual::from).ok_or_else(|| {
                        CatalogError::invalid_value(
                            node.into_owned(),
                            "owl:oneOf",
                            format!("{item} is not an individual"),
                        )
                    })
                })
                .collect::<Result<_, _>>()?;
            return Ok(ClassExpression::Enumerate(members));
        }
        Ok(ClassExpression::Simple(class.clone()))
    }

    fn subclasses_of(&self, class: &ClassId) -> Vec<ClassId> {
        self.closed_classes(class, |c| {
            self.subjects(rdfs::SUB_CLASS_OF, c.as_node_ref().into())
                .into_iter()
                .map(ClassId::from)
                .collect()
        })
    }

    fn equivalent_classes_of(&self, class: &ClassId) -> Vec<ClassId> {
        self.closed_classes(class, |c| {
            let node = c.as_node_ref();
            self.objects(node, owl::EQUIVALENT_CLASS)
                .into_iter()
                .filter_map(as_node)
                .chain(self.subjects(owl::EQUIVALENT_CLASS, node.into()))
                .map(ClassId::from)
                .collect()
        })
    }

    fn sub_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        self.closed_properties(property, |p| {
            named_properties(self.subjects(rdfs::SUB_PROPERTY_OF, p.iri().as_ref().into()))
        })
    }

    fn equivalent_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        self.closed_properties(property, |p| {
            let node = p.iri().as_ref();
            named_properties(
                self.objects(node.into(), owl::EQUIVALENT_PROPERTY)
                    .into_iter()
                    .filter_map(as_node)
                    .chain(self.subjects(owl::EQUIVALENT_PROPERTY, node.into())),
            )
        })
    }

    fn inverse_properties_of(&self, property: &PropertyId) -> Vec<PropertyId> {
        let node = property.iri().as_ref();
        let mut inverses = named_properties(
            self.objects(node.into(), owl::INVERSE_OF)
                .into_iter()
                .filter_map(as_node)
                .chain(self.subjects(owl::INVERSE_OF, node.into())),
        );
        inverses.retain(|p| p != property);
        inverses.sort_by(|a, b| a.iri().as_str().cmp(b.iri().as_str()));
        inverses.dedup();
        inverses
    }

    fn is_transitive(&self, property: &PropertyId) -> bool {
        self.graph.contains(TripleRef::new(
            property.iri().as_ref(),
            rdf::TYPE,
            owl::TRANSITIVE_PROPERTY,
        ))
    }
}
