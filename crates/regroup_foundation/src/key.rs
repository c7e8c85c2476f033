//! Mapping keys: a single atom or a tuple of atoms.

use std::fmt;

use crate::atom::Atom;

/// A mapping key.
///
/// Projecting one column yields an [`Key::Atom`]; projecting several yields
/// a [`Key::Tuple`] preserving column order. Tuple keys are what the
/// nested-mapping expansion explodes, one level per element.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Single-level key.
    Atom(Atom),
    /// Composite key, one element per projected column.
    Tuple(Vec<Atom>),
}

impl Key {
    /// Builds a key from projected parts: one part stays an atom key,
    /// any other arity becomes a tuple key.
    #[must_use]
    pub fn from_parts(mut parts: Vec<Atom>) -> Self {
        if parts.len() == 1 {
            Self::Atom(parts.remove(0))
        } else {
            Self::Tuple(parts)
        }
    }

    /// The key's parts: a one-element slice for an atom key.
    #[must_use]
    pub fn parts(&self) -> &[Atom] {
        match self {
            Self::Atom(a) => std::slice::from_ref(a),
            Self::Tuple(parts) => parts,
        }
    }

    /// Number of parts in the key.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parts().len()
    }

    /// Returns true if this is a tuple key.
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(a) => write!(f, "{a:?}"),
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
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(a) => write!(f, "{a}"),
            Self::Tuple(parts) => {
                write!(f, "(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{part}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<Atom> for Key {
    fn from(a: Atom) -> Self {
        Self::Atom(a)
    }
}

impl From<Vec<Atom>> for Key {
    fn from(parts: Vec<Atom>) -> Self {
        Self::Tuple(parts)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Atom(Atom::from(s))
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Atom(Atom::Int(n))
    }
}
