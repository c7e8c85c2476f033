//! Error types for regroup operations.
//!
//! Uses `thiserror` for ergonomic error definition. Every error carries the
//! offending key(s)/value(s) in its message for debuggability; callers
//! should match on [`ErrorKind`], not message text.

use thiserror::Error;

use crate::key::Key;

/// The main error type for regroup operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// The operation that raised the error, when known.
    pub op: Option<&'static str>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, op: None }
    }

    /// Tags this error with the operation that raised it.
    #[must_use]
    pub fn with_op(mut self, op: &'static str) -> Self {
        self.op = Some(op);
        self
    }

    /// Creates a construction-time validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation {
            message: message.into(),
        })
    }

    /// Creates a duplicate element error.
    #[must_use]
    pub fn duplicate_element(element: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateElement {
            element: element.into(),
        })
    }

    /// Creates a missing keys error.
    #[must_use]
    pub fn missing_keys(keys: Vec<Key>) -> Self {
        Self::new(ErrorKind::MissingKeys { keys })
    }

    /// Creates a missing key error for a single key.
    #[must_use]
    pub fn missing_key(key: Key) -> Self {
        Self::missing_keys(vec![key])
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingColumn {
            column: column.into(),
        })
    }

    /// Creates a missing value error.
    #[must_use]
    pub fn missing_value(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingValue {
            value: value.into(),
        })
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(position: i64, length: usize) -> Self {
        Self::new(ErrorKind::OutOfRange { position, length })
    }

    /// Creates a record shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ShapeMismatch { expected, actual })
    }

    /// Creates an ambiguous index error.
    #[must_use]
    pub fn ambiguous_index() -> Self {
        Self::new(ErrorKind::AmbiguousIndex)
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates a division by zero error.
    #[must_use]
    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero)
    }

    /// Creates an integer overflow error.
    #[must_use]
    pub fn overflow(op: &'static str) -> Self {
        Self::new(ErrorKind::Overflow { op })
    }

    /// Creates an unrepresentable key error.
    #[must_use]
    pub fn unrepresentable_key(key: Key) -> Self {
        Self::new(ErrorKind::UnrepresentableKey { key })
    }

    /// Creates a JSON boundary error.
    #[must_use]
    pub fn json(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Json {
            message: message.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Construction-time invariant violation.
    #[error("validation failed: {message}")]
    Validation {
        /// Description of the violated invariant.
        message: String,
    },

    /// An indexed sequence saw the same element twice.
    #[error("duplicate element: {element}")]
    DuplicateElement {
        /// The repeated element, formatted for display.
        element: String,
    },

    /// Keys required by an operation were absent.
    #[error("missing key(s): {keys:?}")]
    MissingKeys {
        /// The absent keys.
        keys: Vec<Key>,
    },

    /// A record lacked a projected column.
    #[error("missing column: {column}")]
    MissingColumn {
        /// The absent column, formatted for display.
        column: String,
    },

    /// An indexed sequence was asked about an element it does not hold.
    #[error("missing value: {value}")]
    MissingValue {
        /// The absent value, formatted for display.
        value: String,
    },

    /// A position fell outside the sequence bounds.
    #[error("position out of range: {position} (length {length})")]
    OutOfRange {
        /// The requested position (may be negative after offsetting).
        position: i64,
        /// The actual length of the sequence.
        length: usize,
    },

    /// Record arity did not match what the operation required.
    #[error("record shape mismatch: expected {expected} fields, got {actual}")]
    ShapeMismatch {
        /// The expected field count.
        expected: usize,
        /// The actual field count.
        actual: usize,
    },

    /// Keyed records have no canonical column order to complement against.
    #[error("cannot infer index columns for keyed records; pass them explicitly")]
    AmbiguousIndex,

    /// A value had the wrong type for the operation.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type or shape.
        expected: String,
        /// The actual type encountered.
        actual: String,
    },

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic overflowed.
    #[error("integer overflow in {op}")]
    Overflow {
        /// The operation that overflowed.
        op: &'static str,
    },

    /// A tuple key cannot cross the string-keyed serialization boundary.
    #[error("key not representable as a string: {key} (expand tuple keys first)")]
    UnrepresentableKey {
        /// The offending key.
        key: Key,
    },

    /// The JSON boundary rejected the input.
    #[error("invalid json: {message}")]
    Json {
        /// The underlying parse or shape problem.
        message: String,
    },
}
