//! Outcomes of declare/assert operations.

use std::fmt;

/// What a successful declare/assert call did to the store.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// The fact was added.
    Applied,
    /// The fact was already present; nothing changed.
    Unchanged,
    /// The fact contradicts the store and was not added.
    Rejected(Diagnostic),
}

impl Declaration {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Returns the diagnostic of a rejected declaration.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Rejected(d) => Some(d),
            Self::Applied | Self::Unchanged => None,
        }
    }

    pub(crate) fn from_inserted(inserted: bool) -> Self {
        if inserted {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }
}

/// The kind of contradiction a [`Diagnostic`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// `owl:sameAs` between individuals known to be different.
    SameAsConflictsWithDifferentFrom,
    /// `owl:differentFrom` (or `owl:AllDifferent`) between individuals known to be the same.
    DifferentFromConflictsWithSameAs,
    /// A property assertion whose negation is already asserted, or a sameAs
    /// that would make both hold.
    AssertionConflictsWithNegative,
    /// A negative property assertion whose positive counterpart is already asserted.
    NegativeConflictsWithAssertion,
    /// A class assertion into reserved vocabulary (e.g. `owl:Class`).
    ReservedClass,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SameAsConflictsWithDifferentFrom => "sameAs conflicts with differentFrom",
            Self::DifferentFromConflictsWithSameAs => "differentFrom conflicts with sameAs",
            Self::AssertionConflictsWithNegative => {
                "assertion conflicts with a negative assertion"
            }
            Self::NegativeConflictsWithAssertion => {
                "negative assertion conflicts with an assertion"
            }
            Self::ReservedClass => "type into reserved vocabulary",
        })
    }
}

/// A contradiction detected before a mutation.
///
/// Rejections are expected when loading third party data: they are reported,
/// the store is left as it was, and loading can go on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
