use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using EqualityError
pub type Result<T> = std::result::Result<T, EqualityError>;

/// Canonical failure taxonomy
///
/// Every failed check falls into one of these kinds. All of them are
/// surfaced the same way, as a report through the failure reporter; the
/// kind exists so callers and log consumers can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Operands cannot be compared under the requested mode
    TypeMismatch,
    /// A length query on a kind that has none
    LengthUndefined,
    /// Malformed structured text handed to a convenience check
    ParseFailure,
    /// Values were fully compared and the check does not hold
    AssertionMismatch,
}

impl FailureKind {
    /// Get the stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            FailureKind::LengthUndefined => "ERR_LENGTH_UNDEFINED",
            FailureKind::ParseFailure => "ERR_PARSE_FAILURE",
            FailureKind::AssertionMismatch => "ERR_ASSERTION_MISMATCH",
        }
    }
}

/// Conditions raised by the non-boolean comparison predicates.
///
/// Operands are carried pre-rendered so the error stays independent of the
/// values it describes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EqualityError {
    // ===== Type mismatch =====
    /// An operand of a numeric comparison is not a number
    #[error("Parameters must be numerical")]
    NonNumeric { expected: String, actual: String },

    /// An operand of a sequence comparison is not a sequence
    #[error("Parameters must be sequences")]
    NotSequence { expected: String, actual: String },

    /// Exact equality over different concrete types
    #[error("Types expected to match exactly\n\t{expected_type} != {actual_type}")]
    TypeMismatch {
        expected_type: String,
        actual_type: String,
    },

    /// Containment asked of a kind that cannot contain anything
    #[error("{container:?} does not support containment checks")]
    NotContainable { container: String },

    /// Containment with an element the container cannot hold
    #[error("cannot search {container_type} for an element of type {element_type}")]
    ElementMismatch {
        container_type: String,
        element_type: String,
    },

    // ===== Length =====
    /// Length asked of a kind that has none
    #[error("{value:?} has no defined length")]
    LengthUndefined { value: String },

    // ===== Parse =====
    /// Structured text failed to parse
    #[error("{subject} ('{input}') is not valid {format}.\n{format} parsing error: '{reason}'")]
    Parse {
        subject: String,
        format: String,
        input: String,
        reason: String,
    },

    // ===== Mismatch =====
    /// The expected side of a numeric comparison is NaN
    #[error("Expected must not be NaN")]
    ExpectedNaN,

    /// The actual side of a numeric comparison is NaN
    #[error("Expected {expected} with delta {delta}, but was NaN")]
    ActualNaN { expected: String, delta: f64 },

    /// Numeric operands further apart than allowed
    #[error(
        "Max difference between {expected} and {actual} allowed is {delta}, but difference was {difference}"
    )]
    OutsideDelta {
        expected: String,
        actual: String,
        delta: f64,
        difference: f64,
    },

    /// Sequences of different lengths compared pairwise
    #[error("Sequences must have the same length: {expected} != {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A pairwise sequence comparison failed at `index`
    #[error("at index {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<EqualityError>,
    },
}

impl EqualityError {
    /// Classify this error
    pub fn kind(&self) -> FailureKind {
        match self {
            EqualityError::NonNumeric { .. }
            | EqualityError::NotSequence { .. }
            | EqualityError::TypeMismatch { .. }
            | EqualityError::NotContainable { .. }
            | EqualityError::ElementMismatch { .. } => FailureKind::TypeMismatch,
            EqualityError::LengthUndefined { .. } => FailureKind::LengthUndefined,
            EqualityError::Parse { .. } => FailureKind::ParseFailure,
            EqualityError::ExpectedNaN
            | EqualityError::ActualNaN { .. }
            | EqualityError::OutsideDelta { .. }
            | EqualityError::LengthMismatch { .. } => FailureKind::AssertionMismatch,
            EqualityError::AtIndex { source, .. } => source.kind(),
        }
    }

    /// Get the stable code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub fn at_index(self, index: usize) -> Self {
        EqualityError::AtIndex {
            index,
            source: Box::new(self),
        }
    }
}
