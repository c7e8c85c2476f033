//! Key-value mappings with nested traversal and reshaping.

use std::fmt;
use std::iter::FromIterator;

use regroup_foundation::{Atom, Error, Key, Result, RgMap};

use crate::record::Record;
use crate::sequence::RecordSeq;
use crate::value::Value;

/// A key-value mapping with nested traversal, tuple-key reshaping, and
/// elementwise transformation.
///
/// Keys are unique; iteration is deterministic (sorted by key). Every
/// nested mapping reachable from a `DeepMap` is itself a `DeepMap` — the
/// tagged [`Value`] makes any other nesting unrepresentable.
/// Transformation methods return new mappings; `insert`/`remove`/
/// `set_nested` mutate in place. Cloning is O(1).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct DeepMap(RgMap<Key, Value>);

impl DeepMap {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self(RgMap::new())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.0.get(key)
    }

    /// Gets a mutable value by key.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns true if the mapping contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts an entry, returning the previous value if any.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Removes an entry, returning its value if present.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns an iterator over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.0.iter()
    }

    /// Returns an iterator over keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.0.keys()
    }

    /// Returns an iterator over values in key order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    /// The keys as a sequence of positional records (tuple keys fan into
    /// multi-field records).
    #[must_use]
    pub fn keys_seq(&self) -> RecordSeq {
        self.keys()
            .map(|k| Record::Positional(k.parts().to_vec()))
            .collect()
    }

    /// Appends a record to the sequence stored under `key`, creating the
    /// sequence on first use. Non-sequence values already under the key are
    /// replaced.
    pub(crate) fn push_grouped(&mut self, key: Key, record: Record) {
        let mut seq = match self.0.remove(&key) {
            Some(Value::Seq(seq)) => seq,
            _ => RecordSeq::new(),
        };
        seq.push(record);
        self.0.insert(key, Value::Seq(seq));
    }

    /// Restricts the mapping to the given keys.
    ///
    /// When `strict`, fails listing every requested key that is absent;
    /// otherwise silently intersects.
    pub fn filter_by_keys(&self, keys: &[Key], strict: bool) -> Result<Self> {
        let missing: Vec<Key> = keys
            .iter()
            .filter(|k| !self.contains_key(k))
            .cloned()
            .collect();
        if strict && !missing.is_empty() {
            return Err(Error::missing_keys(missing).with_op("filter_by_keys"));
        }
        Ok(keys
            .iter()
            .filter_map(|k| self.get(k).map(|v| (k.clone(), v.clone())))
            .collect())
    }

    /// Returns a new mapping keeping entries whose value the predicate
    /// accepts.
    #[must_use]
    pub fn filter_values(&self, predicate: impl Fn(&Value) -> bool) -> Self {
        self.filter_entries(|_, v| predicate(v))
    }

    /// Returns a new mapping keeping entries whose key the predicate
    /// accepts.
    #[must_use]
    pub fn filter_keys(&self, predicate: impl Fn(&Key) -> bool) -> Self {
        self.filter_entries(|k, _| predicate(k))
    }

    /// Returns a new mapping keeping entries the predicate accepts.
    #[must_use]
    pub fn filter_entries(&self, predicate: impl Fn(&Key, &Value) -> bool) -> Self {
        self.iter()
            .filter(|(k, v)| predicate(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns a new mapping with the function applied to every value.
    #[must_use]
    pub fn map_values(&self, f: impl Fn(&Value) -> Value) -> Self {
        self.iter().map(|(k, v)| (k.clone(), f(v))).collect()
    }

    /// Fallible [`DeepMap::map_values`]: stops at the first error.
    pub fn try_map_values(&self, f: impl Fn(&Value) -> Result<Value>) -> Result<Self> {
        self.iter()
            .map(|(k, v)| Ok((k.clone(), f(v)?)))
            .collect()
    }

    /// Returns a new mapping with the function applied to every key.
    ///
    /// If two keys map to the same new key, the entry iterated later (key
    /// order) wins.
    #[must_use]
    pub fn map_keys(&self, f: impl Fn(&Key) -> Key) -> Self {
        self.iter().map(|(k, v)| (f(k), v.clone())).collect()
    }

    /// Returns a new mapping with the function applied to every entry.
    #[must_use]
    pub fn map_entries(&self, f: impl Fn(&Key, &Value) -> (Key, Value)) -> Self {
        self.iter().map(|(k, v)| f(k, v)).collect()
    }

    /// Applies `f` to each value of self paired with the value `other`
    /// holds under the same key — left-join semantics.
    ///
    /// Fails if `other` lacks a key present in self.
    pub fn zip_apply(
        &self,
        other: &Self,
        f: impl Fn(&Value, &Value) -> Result<Value>,
    ) -> Result<Self> {
        self.iter()
            .map(|(k, v)| {
                let rhs = other
                    .get(k)
                    .ok_or_else(|| Error::missing_key(k.clone()).with_op("zip_apply"))?;
                Ok((k.clone(), f(v, rhs)?))
            })
            .collect()
    }

    /// Adds the values of `other` to self's, key by key.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_apply(other, Value::try_add)
    }

    /// Subtracts the values of `other` from self's, key by key.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.zip_apply(other, Value::try_sub)
    }

    /// Multiplies self's values by `other`'s, key by key.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.zip_apply(other, Value::try_mul)
    }

    /// Divides self's values by `other`'s, key by key. True division.
    pub fn divide(&self, other: &Self) -> Result<Self> {
        self.zip_apply(other, Value::try_div)
    }

    /// Adds a scalar to every value.
    pub fn add_scalar(&self, rhs: &Atom) -> Result<Self> {
        self.broadcast(rhs, Value::try_add)
    }

    /// Subtracts a scalar from every value.
    pub fn subtract_scalar(&self, rhs: &Atom) -> Result<Self> {
        self.broadcast(rhs, Value::try_sub)
    }

    /// Multiplies every value by a scalar.
    pub fn multiply_scalar(&self, rhs: &Atom) -> Result<Self> {
        self.broadcast(rhs, Value::try_mul)
    }

    /// Divides every value by a scalar. True division.
    pub fn divide_scalar(&self, rhs: &Atom) -> Result<Self> {
        self.broadcast(rhs, Value::try_div)
    }

    fn broadcast(
        &self,
        rhs: &Atom,
        f: impl Fn(&Value, &Value) -> Result<Value>,
    ) -> Result<Self> {
        let rhs = Value::Leaf(rhs.clone());
        self.try_map_values(|v| f(v, &rhs))
    }

    /// Walks `path` through nested mappings, creating intermediates as
    /// needed, and assigns `value` at the final key.
    ///
    /// Non-mapping values along the path are overwritten with a fresh
    /// mapping (destructive). An empty path is a validation error.
    pub fn set_nested(&mut self, path: &[Atom], value: Value) -> Result<()> {
        let Some((first, rest)) = path.split_first() else {
            return Err(Error::validation("set_nested requires at least one key"));
        };
        let key = Key::Atom(first.clone());
        if rest.is_empty() {
            self.0.insert(key, value);
            return Ok(());
        }
        let mut inner = match self.0.remove(&key) {
            Some(Value::Map(inner)) => inner,
            _ => Self::new(),
        };
        inner.set_nested(rest, value)?;
        self.0.insert(key, Value::Map(inner));
        Ok(())
    }

    /// Safely traverses `path` through nested mappings.
    ///
    /// Returns `None` if any intermediate key is missing, any intermediate
    /// value is not a mapping, or the path is empty.
    #[must_use]
    pub fn get_nested(&self, path: &[Atom]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let value = self.0.get(&Key::Atom(first.clone()))?;
        if rest.is_empty() {
            return Some(value);
        }
        match value {
            Value::Map(inner) => inner.get_nested(rest),
            _ => None,
        }
    }

    /// Expands tuple keys into nested mappings, one level per element.
    ///
    /// Nested mapping values are expanded first; atom keys stay a single
    /// level. Useful for getting string-keyed objects out of tuple-keyed
    /// groupings before the serialization boundary. An empty tuple key
    /// cannot be expanded and is a validation error.
    pub fn expand_tuple_keys(&self) -> Result<Self> {
        let mut out = Self::new();
        for (key, value) in self.iter() {
            let value = match value {
                Value::Map(inner) => Value::Map(inner.expand_tuple_keys()?),
                other => other.clone(),
            };
            if key.arity() == 0 {
                return Err(
                    Error::validation("cannot expand an empty tuple key").with_op("expand_tuple_keys")
                );
            }
            out.set_nested(key.parts(), value)?;
        }
        Ok(out)
    }

    /// Flattens nested mappings into a single level keyed by path tuples —
    /// the inverse of [`DeepMap::expand_tuple_keys`].
    ///
    /// Descends iteratively (an explicit work stack, so deep nesting cannot
    /// exhaust the call stack), accumulating the key path; each non-mapping
    /// value is emitted under its full path. Tuple keys splice their
    /// elements into the path; a one-element path stays an atom key.
    #[must_use]
    pub fn flatten_to_tuple_keys(&self) -> Self {
        let mut out = Self::new();
        let mut stack: Vec<(Vec<Atom>, Self)> = vec![(Vec::new(), self.clone())];
        while let Some((prefix, map)) = stack.pop() {
            for (key, value) in map.iter() {
                let mut path = prefix.clone();
                path.extend(key.parts().iter().cloned());
                match value {
                    Value::Map(inner) => stack.push((path, inner.clone())),
                    leaf => {
                        out.insert(Key::from_parts(path), leaf.clone());
                    }
                }
            }
        }
        out
    }

    /// Flattens every entry into positional records of
    /// `(*key_parts, *value_parts)` — the mapping-to-record reshaping
    /// engine, dual of grouping.
    ///
    /// Sequence values fan out one record per element; nested mapping
    /// values must be flattened first.
    pub fn to_record_sequence(&self) -> Result<RecordSeq> {
        let mut seq = RecordSeq::new();
        for (key, value) in self.iter() {
            let rows = value
                .to_parts()
                .map_err(|e| e.with_op("to_record_sequence"))?;
            for row in rows {
                let mut fields = key.parts().to_vec();
                fields.extend(row);
                seq.push(Record::Positional(fields));
            }
        }
        Ok(seq)
    }

    /// Regroups entries by one property of their mapping-shaped values,
    /// producing `{property_value: {original_key: original_value}}`.
    ///
    /// Every value must be a mapping containing `property` with a
    /// key-representable value.
    pub fn index_by_property(&self, property: &Atom) -> Result<Self> {
        let prop_key = Key::Atom(property.clone());
        let mut out = Self::new();
        for (key, value) in self.iter() {
            let Value::Map(inner) = value else {
                return Err(Error::type_mismatch("mapping value", value.type_name())
                    .with_op("index_by_property"));
            };
            let group = inner
                .get(&prop_key)
                .ok_or_else(|| Error::missing_key(prop_key.clone()).with_op("index_by_property"))?
                .as_key()?;
            out.push_bucket(group, key.clone(), value.clone());
        }
        Ok(out)
    }

    /// Regroups entries by one position of their tuple keys, producing
    /// `{key_part: {original_key: original_value}}`.
    pub fn index_by_tuple_position(&self, position: usize) -> Result<Self> {
        let mut out = Self::new();
        for (key, value) in self.iter() {
            let Key::Tuple(parts) = key else {
                return Err(Error::type_mismatch("tuple key", "atom key")
                    .with_op("index_by_tuple_position"));
            };
            let Some(part) = parts.get(position) else {
                #[allow(clippy::cast_possible_wrap)]
                return Err(Error::out_of_range(position as i64, parts.len())
                    .with_op("index_by_tuple_position"));
            };
            out.push_bucket(Key::Atom(part.clone()), key.clone(), value.clone());
        }
        Ok(out)
    }

    /// Inserts `(key, value)` into the nested mapping stored under `group`.
    fn push_bucket(&mut self, group: Key, key: Key, value: Value) {
        let mut bucket = match self.0.remove(&group) {
            Some(Value::Map(bucket)) => bucket,
            _ => Self::new(),
        };
        bucket.insert(key, value);
        self.0.insert(group, Value::Map(bucket));
    }

    /// Inverts a mapping of sequences: each element maps to the sequence of
    /// original keys whose value contained it.
    ///
    /// Every value must be a sequence; every element must be usable as a
    /// key. Original keys are stored as positional records.
    pub fn invert_list_values(&self) -> Result<Self> {
        let mut out = Self::new();
        for (key, value) in self.iter() {
            let Value::Seq(seq) = value else {
                return Err(Error::type_mismatch("sequence value", value.type_name())
                    .with_op("invert_list_values"));
            };
            for rec in seq.iter() {
                let element = Key::from_parts(
                    rec.positional_fields()
                        .map_err(|e| e.with_op("invert_list_values"))?
                        .to_vec(),
                );
                out.push_grouped(element, Record::Positional(key.parts().to_vec()));
            }
        }
        Ok(out)
    }

    /// Guarantees the mapping contains every key in `keys`, inserting
    /// `default` where absent. Existing entries are never overridden.
    #[must_use]
    pub fn fill_missing_keys(&self, keys: &[Key], default: &Value) -> Self {
        let mut out = self.clone();
        for key in keys {
            if !out.contains_key(key) {
                out.insert(key.clone(), default.clone());
            }
        }
        out
    }

    /// Swaps keys and values.
    ///
    /// Values must be key-representable (leaf or tuple). When values
    /// repeat, the entry iterated later (key order) silently wins.
    pub fn reverse(&self) -> Result<Self> {
        self.iter()
            .map(|(k, v)| {
                let new_key = v.as_key().map_err(|e| e.with_op("reverse"))?;
                let new_value = match k {
                    Key::Atom(a) => Value::Leaf(a.clone()),
                    Key::Tuple(parts) => Value::Tuple(parts.clone()),
                };
                Ok((new_key, new_value))
            })
            .collect()
    }

    /// Collects `property` out of every mapping-shaped value that carries
    /// it, keyed by the original keys. Values that are not mappings or lack
    /// the property are silently skipped.
    #[must_use]
    pub fn get_property(&self, property: &Atom) -> Self {
        let prop_key = Key::Atom(property.clone());
        self.iter()
            .filter_map(|(k, v)| {
                let inner = v.as_map()?;
                inner.get(&prop_key).map(|p| (k.clone(), p.clone()))
            })
            .collect()
    }

    /// Replaces every value by its length: element count for sequences and
    /// mappings, arity for tuples. Leaves have no length.
    pub fn value_lengths(&self) -> Result<Self> {
        self.try_map_values(|v| {
            let len = match v {
                Value::Seq(seq) => seq.len(),
                Value::Map(map) => map.len(),
                Value::Tuple(parts) => parts.len(),
                Value::Leaf(a) => {
                    return Err(Error::type_mismatch("sized value", a.type_name())
                        .with_op("value_lengths"));
                }
            };
            Ok(Value::Leaf(Atom::Int(i64::try_from(len).unwrap_or(i64::MAX))))
        })
    }

    /// Merges `other` into self. Where both sides hold mappings under the
    /// same key the merge recurses; otherwise `other`'s value replaces
    /// self's.
    pub fn merge_nested(&mut self, other: &Self) {
        for (key, value) in other.iter() {
            match (self.0.remove(key), value) {
                (Some(Value::Map(mut mine)), Value::Map(theirs)) => {
                    mine.merge_nested(theirs);
                    self.0.insert(key.clone(), Value::Map(mine));
                }
                (_, v) => {
                    self.0.insert(key.clone(), v.clone());
                }
            }
        }
    }
}

impl fmt::Debug for DeepMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(Key, Value)> for DeepMap {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self(RgMap::from_iter(iter))
    }
}

impl FromIterator<(Atom, Atom)> for DeepMap {
    fn from_iter<I: IntoIterator<Item = (Atom, Atom)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (Key::Atom(k), Value::Leaf(v)))
            .collect()
    }
}

impl From<Vec<(Key, Value)>> for DeepMap {
    fn from(entries: Vec<(Key, Value)>) -> Self {
        entries.into_iter().collect()
    }
}
