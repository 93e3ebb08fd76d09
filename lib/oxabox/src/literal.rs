//! Value comparison of literals.

use oxrdf::vocab::{rdfs, xsd};
use oxrdf::{Literal, NamedNodeRef};
use oxsdatatypes::{Boolean, Date, DateTime, Decimal, Double, Float, Integer};

/// A literal parsed into the value space of its datatype.
#[derive(Debug, Clone, Copy)]
enum TypedValue {
    Boolean(Boolean),
    Integer(Integer),
    Decimal(Decimal),
    Float(Float),
    Double(Double),
    DateTime(DateTime),
    Date(Date),
}

impl TypedValue {
    fn parse(literal: &Literal) -> Option<Self> {
        let value = literal.value();
        let datatype = literal.datatype();
        if datatype == xsd::BOOLEAN {
            value.parse().ok().map(Self::Boolean)
        } else if datatype == xsd::DECIMAL {
            value.parse().ok().map(Self::Decimal)
        } else if datatype == xsd::FLOAT {
            value.parse().ok().map(Self::Float)
        } else if datatype == xsd::DOUBLE {
            value.parse().ok().map(Self::Double)
        } else if datatype == xsd::DATE_TIME || datatype == xsd::DATE_TIME_STAMP {
            value.parse().ok().map(Self::DateTime)
        } else if datatype == xsd::DATE {
            value.parse().ok().map(Self::Date)
        } else if datatype == xsd::INTEGER
            || datatype == xsd::INT
            || datatype == xsd::LONG
            || datatype == xsd::SHORT
            || datatype == xsd::BYTE
            || datatype == xsd::NON_NEGATIVE_INTEGER
            || datatype == xsd::NON_POSITIVE_INTEGER
            || datatype == xsd::POSITIVE_INTEGER
            || datatype == xsd::NEGATIVE_INTEGER
            || datatype == xsd::UNSIGNED_LONG
            || datatype == xsd::UNSIGNED_INT
            || datatype == xsd::UNSIGNED_SHORT
            || datatype == xsd::UNSIGNED_BYTE
        {
            value.parse().ok().map(Self::Integer)
        } else {
            None
        }
    }

    /// Value equality, with numeric promotion. `None` if the values are not comparable.
    fn value_eq(self, other: Self) -> Option<bool> {
        Some(match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Integer(a), Self::Decimal(b)) => Decimal::from(a) == b,
            (Self::Decimal(a), Self::Integer(b)) => a == Decimal::from(b),
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (a, b) => a.as_double()? == b.as_double()?,
        })
    }

    fn as_double(self) -> Option<Double> {
        match self {
            Self::Integer(v) => Some(v.into()),
            Self::Decimal(v) => Some(v.into()),
            Self::Float(v) => Some(v.into()),
            Self::Double(v) => Some(v),
            Self::Boolean(_) | Self::DateTime(_) | Self::Date(_) => None,
        }
    }
}

/// Compares two literals by value.
///
/// Literals of known XSD datatypes are compared in their value space, so
/// `"1"^^xsd:integer` equals `"1.0"^^xsd:decimal` and `"01"^^xsd:int`.
/// Other literals, or literals with an invalid lexical form, are compared
/// term-wise.
pub fn literal_value_eq(a: &Literal, b: &Literal) -> bool {
    if a == b {
        return true;
    }
    match (TypedValue::parse(a), TypedValue::parse(b)) {
        (Some(a), Some(b)) => a.value_eq(b).unwrap_or(false),
        _ => false,
    }
}

/// Whether a literal belongs to the value space of `datatype`.
///
/// Integers belong to `xsd:decimal` and to every XSD integer type whose range
/// contains them, whatever integer type they were written with.
pub(crate) fn literal_has_datatype(literal: &Literal, datatype: NamedNodeRef<'_>) -> bool {
    if datatype == rdfs::LITERAL || literal.datatype() == datatype {
        return true;
    }
    let Some(TypedValue::Integer(value)) = TypedValue::parse(literal) else {
        return false;
    };
    if datatype == xsd::DECIMAL {
        return true;
    }
    integer_range(datatype).is_some_and(|(min, max)| (min..=max).contains(&i64::from(value)))
}

fn integer_range(datatype: NamedNodeRef<'_>) -> Option<(i64, i64)> {
    Some(if datatype == xsd::INTEGER || datatype == xsd::LONG {
        (i64::MIN, i64::MAX)
    } else if datatype == xsd::INT {
        (i32::MIN.into(), i32::MAX.into())
    } else if datatype == xsd::SHORT {
        (i16::MIN.into(), i16::MAX.into())
    } else if datatype == xsd::BYTE {
        (i8::MIN.into(), i8::MAX.into())
    } else if datatype == xsd::NON_NEGATIVE_INTEGER || datatype == xsd::UNSIGNED_LONG {
        (0, i64::MAX)
    } else if datatype == xsd::NON_POSITIVE_INTEGER {
        (i64::MIN, 0)
    } else if datatype == xsd::POSITIVE_INTEGER {
        (1, i64::MAX)
    } else if datatype == xsd::NEGATIVE_INTEGER {
        (i64::MIN, -1)
    } else if datatype == xsd::UNSIGNED_INT {
        (0, u32::MAX.into())
    } else if datatype == xsd::UNSIGNED_SHORT {
        (0, u16::MAX.into())
    } else if datatype == xsd::UNSIGNED_BYTE {
        (0, u8::MAX.into())
    } else {
        return None;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(value: &str, datatype: oxrdf::NamedNodeRef<'_>) -> Literal {
        Literal::new_typed_literal(value, datatype)
    }

    #[test]
    fn numeric_promotion() {
        assert!(literal_value_eq(
            &typed("1", xsd::INTEGER),
            &typed("1.0", xsd::DECIMAL)
        ));
        assert!(literal_value_eq(&typed("01", xsd::INT), &typed("1", xsd::INTEGER)));
        assert!(literal_value_eq(&typed("2", xsd::INTEGER), &typed("2.0E0", xsd::DOUBLE)));
        assert!(!literal_value_eq(&typed("2", xsd::INTEGER), &typed("3", xsd::INTEGER)));
    }

    #[test]
    fn booleans_and_strings() {
        assert!(literal_value_eq(&typed("1", xsd::BOOLEAN), &typed("true", xsd::BOOLEAN)));
        assert!(!literal_value_eq(&typed("1", xsd::BOOLEAN), &typed("1", xsd::INTEGER)));
        assert!(literal_value_eq(
            &Literal::new_simple_literal("a"),
            &typed("a", xsd::STRING)
        ));
        assert!(!literal_value_eq(
            &Literal::new_simple_literal("a"),
            &Literal::new_language_tagged_literal_unchecked("a", "en")
        ));
    }

    #[test]
    fn integer_datatype_ranges() {
        assert!(literal_has_datatype(&Literal::from(3), xsd::INT));
        assert!(literal_has_datatype(&Literal::from(3), xsd::DECIMAL));
        assert!(literal_has_datatype(&typed("3", xsd::BYTE), xsd::UNSIGNED_BYTE));
        assert!(!literal_has_datatype(&Literal::from(300), xsd::BYTE));
        assert!(!literal_has_datatype(&Literal::from(-1), xsd::NON_NEGATIVE_INTEGER));
        assert!(!literal_has_datatype(&typed("1.5", xsd::DECIMAL), xsd::INTEGER));
        assert!(!literal_has_datatype(&Literal::new_simple_literal("3"), xsd::INT));
        assert!(literal_has_datatype(&Literal::new_simple_literal("3"), rdfs::LITERAL));
    }

    #[test]
    fn invalid_lexical_forms_compare_as_terms() {
        assert!(!literal_value_eq(&typed("x", xsd::INTEGER), &typed("y", xsd::INTEGER)));
        assert!(literal_value_eq(&typed("x", xsd::INTEGER), &typed("x", xsd::INTEGER)));
    }
}
