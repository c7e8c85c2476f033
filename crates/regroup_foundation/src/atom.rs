//! Scalar atom type carried by records and mappings.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::Result;
use crate::error::Error;

/// Scalar leaf value carried by records and mappings.
///
/// Atoms are immutable and cheaply cloneable. Floats compare and hash by
/// bit pattern so that `Eq` is reflexive and hashing stays consistent with
/// equality; under this rule NaN equals itself.
#[derive(Clone)]
pub enum Atom {
    /// The nil value (represents absence).
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    Str(Arc<str>),
}

impl Atom {
    /// Returns true if this atom is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Attempts to extract a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    ///
    /// Note: Converting large i64 values to f64 may lose precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a short name for this atom's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }

    /// Adds two atoms.
    ///
    /// Integers add with overflow checking, mixed numerics promote to
    /// float, and strings concatenate. Anything else is a type mismatch.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_add(*b)
                .map(Self::Int)
                .ok_or_else(|| Error::overflow("add")),
            (Self::Str(a), Self::Str(b)) => Ok(Self::Str(format!("{a}{b}").into())),
            _ => self.float_binop(other, "add", |a, b| a + b),
        }
    }

    /// Subtracts `other` from this atom. Numeric atoms only.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_sub(*b)
                .map(Self::Int)
                .ok_or_else(|| Error::overflow("subtract")),
            _ => self.float_binop(other, "subtract", |a, b| a - b),
        }
    }

    /// Multiplies two atoms. Numeric atoms only.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_mul(*b)
                .map(Self::Int)
                .ok_or_else(|| Error::overflow("multiply")),
            _ => self.float_binop(other, "multiply", |a, b| a * b),
        }
    }

    /// Divides this atom by `other`.
    ///
    /// True division: the result is always a float, even for two integers.
    /// A zero divisor is an error.
    pub fn try_div(&self, other: &Self) -> Result<Self> {
        if other.as_number() == Some(0.0) {
            return Err(Error::division_by_zero());
        }
        self.float_binop(other, "divide", |a, b| a / b)
    }

    fn float_binop(&self, other: &Self, op: &'static str, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => Ok(Self::Float(f(a, b))),
            (None, _) => Err(Error::type_mismatch("number", self.type_name()).with_op(op)),
            (_, None) => Err(Error::type_mismatch("number", other.type_name()).with_op(op)),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Nil => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::Str(_) => 4,
        }
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
        }
    }
}

// Total order across types: nil < bool < int < float < string. Within
// floats, `total_cmp` agrees with bit equality, keeping Ord consistent
// with Eq.
impl Ord for Atom {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Nil, Self::Nil) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Atom {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Atom {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Atom {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Atom {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Self::Str(s.into())
    }
}

impl From<Arc<str>> for Atom {
    fn from(s: Arc<str>) -> Self {
        Self::Str(s)
    }
}

mod serde_support {
    use super::Atom;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for Atom {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Atom::Nil => serializer.serialize_unit(),
                Atom::Bool(b) => serializer.serialize_bool(*b),
                Atom::Int(n) => serializer.serialize_i64(*n),
                Atom::Float(n) => serializer.serialize_f64(*n),
                Atom::Str(s) => serializer.serialize_str(s),
            }
        }
    }

    struct AtomVisitor;

    impl Visitor<'_> for AtomVisitor {
        type Value = Atom;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a scalar value")
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Atom, E> {
            Ok(Atom::Nil)
        }

        fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<Atom, E> {
            Ok(Atom::Bool(b))
        }

        fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<Atom, E> {
            Ok(Atom::Int(n))
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<Atom, E> {
            // Values beyond i64 fall back to float rather than failing.
            i64::try_from(n).map_or(Ok(Atom::Float(n as f64)), |v| Ok(Atom::Int(v)))
        }

        fn visit_f64<E: de::Error>(self, n: f64) -> std::result::Result<Atom, E> {
            Ok(Atom::Float(n))
        }

        fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<Atom, E> {
            Ok(Atom::Str(s.into()))
        }
    }

    impl<'de> Deserialize<'de> for Atom {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(AtomVisitor)
        }
    }
}
