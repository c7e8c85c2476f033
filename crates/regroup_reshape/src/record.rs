//! Records and column selectors.
//!
//! A record is either a positional tuple of atoms or a field-keyed mapping
//! of atoms; a sequence is expected to hold records of one shape. Every
//! reshaping operation branches explicitly on the shape tag.

use std::cmp::Ordering;
use std::fmt;

use regroup_foundation::{Atom, Error, Result, RgMap};

/// Column selector for record projection.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Column {
    /// Position within a positional record. Negative values index from the
    /// end, Python style.
    Pos(isize),
    /// Field name within a keyed record.
    Field(Atom),
}

impl Column {
    /// Resolves a positional selector against a record arity.
    ///
    /// Returns the canonical non-negative position, or an out-of-range
    /// error carrying the requested position.
    pub fn resolve(&self, arity: usize) -> Result<usize> {
        let Self::Pos(pos) = self else {
            return Err(Error::type_mismatch(
                "position selector",
                format!("field selector {self}"),
            ));
        };
        let len = isize::try_from(arity).map_err(|_| Error::out_of_range(i64::MAX, arity))?;
        let resolved = if *pos < 0 {
            len.checked_add(*pos).unwrap_or(-1)
        } else {
            *pos
        };
        usize::try_from(resolved)
            .ok()
            .filter(|r| *r < arity)
            .ok_or_else(|| Error::out_of_range(*pos as i64, arity))
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pos(p) => write!(f, "#{p}"),
            Self::Field(name) => write!(f, "{name:?}"),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pos(p) => write!(f, "#{p}"),
            Self::Field(name) => write!(f, "{name}"),
        }
    }
}

impl From<isize> for Column {
    fn from(pos: isize) -> Self {
        Self::Pos(pos)
    }
}

impl From<i32> for Column {
    fn from(pos: i32) -> Self {
        Self::Pos(pos as isize)
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::Field(Atom::from(name))
    }
}

impl From<Atom> for Column {
    fn from(name: Atom) -> Self {
        Self::Field(name)
    }
}

/// One record: a fixed-arity tuple of atoms or a field-keyed mapping.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Record {
    /// Ordered, position-addressed fields.
    Positional(Vec<Atom>),
    /// Field-name-addressed fields. Iterates deterministically (by field
    /// name), but carries no positional order.
    Keyed(RgMap<Atom, Atom>),
}

impl Record {
    /// Builds a keyed record from field name/value pairs.
    pub fn keyed<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (Atom, Atom)>,
    {
        Self::Keyed(fields.into_iter().collect())
    }

    /// Number of fields in the record.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Positional(fields) => fields.len(),
            Self::Keyed(fields) => fields.len(),
        }
    }

    /// Returns true for the positional shape.
    #[must_use]
    pub const fn is_positional(&self) -> bool {
        matches!(self, Self::Positional(_))
    }

    /// The positional fields of the record.
    ///
    /// Fails on keyed records, which have no positional order.
    pub fn positional_fields(&self) -> Result<&[Atom]> {
        match self {
            Self::Positional(fields) => Ok(fields),
            Self::Keyed(_) => Err(Error::type_mismatch("positional record", "keyed record")),
        }
    }

    /// Projects a single column out of the record.
    pub fn project_one(&self, column: &Column) -> Result<Atom> {
        match (self, column) {
            (Self::Positional(fields), Column::Pos(_)) => {
                let pos = column.resolve(fields.len())?;
                Ok(fields[pos].clone())
            }
            (Self::Keyed(fields), Column::Field(name)) => fields
                .get(name)
                .cloned()
                .ok_or_else(|| Error::missing_column(name.to_string())),
            (Self::Positional(_), Column::Field(name)) => Err(Error::type_mismatch(
                "position selector for a positional record",
                format!("field selector {name}"),
            )),
            (Self::Keyed(_), Column::Pos(pos)) => Err(Error::type_mismatch(
                "field selector for a keyed record",
                format!("position selector #{pos}"),
            )),
        }
    }

    /// Projects an ordered list of columns, preserving column order.
    pub fn project(&self, columns: &[Column]) -> Result<Vec<Atom>> {
        columns.iter().map(|c| self.project_one(c)).collect()
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Positional(a), Self::Positional(b)) => a.cmp(b),
            (Self::Keyed(a), Self::Keyed(b)) => a.cmp(b),
            (Self::Positional(_), Self::Keyed(_)) => Ordering::Less,
            (Self::Keyed(_), Self::Positional(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{field:?}")?;
                }
                write!(f, ")")
            }
            Self::Keyed(fields) => fmt::Debug::fmt(fields, f),
        }
    }
}

impl From<Vec<Atom>> for Record {
    fn from(fields: Vec<Atom>) -> Self {
        Self::Positional(fields)
    }
}

/// Builds a positional [`Record`] from a list of atom-convertible fields.
///
/// ```
/// use regroup_reshape::record;
///
/// let rec = record!["a", "b", 1];
/// assert_eq!(rec.arity(), 3);
/// ```
#[macro_export]
macro_rules! record {
    ($($field:expr),* $(,)?) => {
        $crate::Record::Positional(vec![$($crate::Atom::from($field)),*])
    };
}

/// Builds a `Vec<Atom>` from a list of atom-convertible values.
#[macro_export]
macro_rules! atoms {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::Atom::from($value)),*]
    };
}

/// Builds an array of [`Column`] selectors from convertible values
/// (integers become positions, strings become field names).
#[macro_export]
macro_rules! cols {
    ($($column:expr),* $(,)?) => {
        [$($crate::Column::from($column)),*]
    };
}
