//! Mapping values: leaf, tuple, nested mapping, or record sequence.

use std::fmt;

use regroup_foundation::{Atom, Error, Key, Result};

use crate::mapping::DeepMap;
use crate::record::Record;
use crate::sequence::RecordSeq;

/// A value held by a [`DeepMap`] entry.
///
/// The tagged variant makes recursive operations exhaustive: a value is a
/// scalar leaf, a flat tuple (a multi-column grouped result), a nested
/// mapping, or a sequence of records (a grouped list).
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Scalar leaf.
    Leaf(Atom),
    /// Flat tuple of atoms.
    Tuple(Vec<Atom>),
    /// Nested mapping.
    Map(DeepMap),
    /// Sequence of records.
    Seq(RecordSeq),
}

impl Value {
    /// Attempts to extract a leaf atom.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Atom> {
        match self {
            Self::Leaf(a) => Some(a),
            _ => None,
        }
    }

    /// Attempts to extract a nested mapping.
    #[must_use]
    pub const fn as_map(&self) -> Option<&DeepMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract a record sequence.
    #[must_use]
    pub const fn as_seq(&self) -> Option<&RecordSeq> {
        match self {
            Self::Seq(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a short name for this value's shape, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "mapping",
            Self::Seq(_) => "sequence",
        }
    }

    /// Converts this value into a mapping key.
    ///
    /// Leaves become atom keys and tuples become tuple keys; mappings and
    /// sequences are not key-representable.
    pub fn as_key(&self) -> Result<Key> {
        match self {
            Self::Leaf(a) => Ok(Key::Atom(a.clone())),
            Self::Tuple(parts) => Ok(Key::Tuple(parts.clone())),
            other => Err(Error::type_mismatch(
                "key-representable value (leaf or tuple)",
                other.type_name(),
            )),
        }
    }

    /// Expands this value into rows of atoms for the record boundary.
    ///
    /// A leaf is one single-part row, a tuple is one multi-part row, and a
    /// sequence fans out one row per record. Nested mappings must be
    /// flattened before crossing the boundary.
    pub fn to_parts(&self) -> Result<Vec<Vec<Atom>>> {
        match self {
            Self::Leaf(a) => Ok(vec![vec![a.clone()]]),
            Self::Tuple(parts) => Ok(vec![parts.clone()]),
            Self::Seq(seq) => seq
                .iter()
                .map(|rec| rec.positional_fields().map(<[Atom]>::to_vec))
                .collect(),
            Self::Map(_) => Err(Error::type_mismatch(
                "flat value (leaf, tuple, or sequence)",
                "nested mapping",
            )),
        }
    }

    /// Adds two values: leaf arithmetic, or concatenation for string
    /// leaves, tuples, and sequences.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => Ok(Self::Leaf(a.try_add(b)?)),
            (Self::Tuple(a), Self::Tuple(b)) => {
                let mut parts = a.clone();
                parts.extend(b.iter().cloned());
                Ok(Self::Tuple(parts))
            }
            (Self::Seq(a), Self::Seq(b)) => Ok(Self::Seq(RecordSeq::concat([a.clone(), b.clone()]))),
            _ => Err(Error::type_mismatch(self.type_name(), other.type_name()).with_op("add")),
        }
    }

    /// Subtracts `other` from this value. Numeric leaves only.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.leaf_binop(other, "subtract", Atom::try_sub)
    }

    /// Multiplies two values. Numeric leaves only.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.leaf_binop(other, "multiply", Atom::try_mul)
    }

    /// Divides this value by `other`. Numeric leaves only; true division.
    pub fn try_div(&self, other: &Self) -> Result<Self> {
        self.leaf_binop(other, "divide", Atom::try_div)
    }

    fn leaf_binop(
        &self,
        other: &Self,
        op: &'static str,
        f: impl Fn(&Atom, &Atom) -> Result<Atom>,
    ) -> Result<Self> {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => Ok(Self::Leaf(f(a, b)?)),
            (Self::Leaf(_), b) => Err(Error::type_mismatch("leaf", b.type_name()).with_op(op)),
            (a, _) => Err(Error::type_mismatch("leaf", a.type_name()).with_op(op)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(a) => write!(f, "{a:?}"),
            Self::Tuple(parts) => {
                write!(f, "(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{part:?}")?;
                }
                write!(f, ")")
            }
            Self::Map(m) => fmt::Debug::fmt(m, f),
            Self::Seq(s) => fmt::Debug::fmt(s, f),
        }
    }
}

impl From<Atom> for Value {
    fn from(a: Atom) -> Self {
        Self::Leaf(a)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Leaf(Atom::Bool(b))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Leaf(Atom::Int(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Leaf(Atom::Int(i64::from(n)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Leaf(Atom::Float(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Leaf(Atom::from(s))
    }
}

impl From<DeepMap> for Value {
    fn from(m: DeepMap) -> Self {
        Self::Map(m)
    }
}

impl From<RecordSeq> for Value {
    fn from(s: RecordSeq) -> Self {
        Self::Seq(s)
    }
}

impl From<Vec<Atom>> for Value {
    fn from(parts: Vec<Atom>) -> Self {
        Self::Tuple(parts)
    }
}

impl From<Record> for Value {
    fn from(rec: Record) -> Self {
        match rec {
            Record::Positional(fields) => Self::Tuple(fields),
            Record::Keyed(fields) => Self::Map(
                fields
                    .iter()
                    .map(|(k, v)| (Key::Atom(k.clone()), Self::Leaf(v.clone())))
                    .collect(),
            ),
        }
    }
}
