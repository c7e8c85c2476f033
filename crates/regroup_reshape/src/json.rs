//! JSON serialization boundary.
//!
//! A best-effort text boundary, not a core guarantee: keys must be
//! representable as strings, so tuple keys have to be expanded into nesting
//! (via [`DeepMap::expand_tuple_keys`]) before serializing and can be
//! recovered with [`DeepMap::flatten_to_tuple_keys`] after parsing. Plain
//! JSON objects coerce recursively into [`DeepMap`]s on the way in.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use regroup_foundation::{Atom, Error, Key, Result};

use crate::mapping::DeepMap;
use crate::record::Record;
use crate::sequence::RecordSeq;
use crate::value::Value;

impl DeepMap {
    /// Serializes the mapping to a JSON string.
    ///
    /// Fails on tuple keys anywhere in the mapping; expand them first.
    pub fn to_json_string(&self) -> Result<String> {
        if let Some(key) = first_tuple_key(self) {
            return Err(Error::unrepresentable_key(key).with_op("to_json_string"));
        }
        serde_json::to_string(self).map_err(|e| Error::json(e.to_string()))
    }

    /// Parses a mapping from a JSON object string.
    ///
    /// Objects coerce recursively into mappings; arrays of scalars become
    /// sequences of arity-1 records and arrays of arrays become positional
    /// records.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::json(e.to_string()))
    }
}

fn first_tuple_key(map: &DeepMap) -> Option<Key> {
    for (key, value) in map.iter() {
        if key.is_tuple() {
            return Some(key.clone());
        }
        if let Value::Map(inner) = value {
            if let Some(found) = first_tuple_key(inner) {
                return Some(found);
            }
        }
    }
    None
}

impl Serialize for DeepMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            let Key::Atom(atom) = key else {
                return Err(ser::Error::custom(Error::unrepresentable_key(key.clone())));
            };
            map.serialize_entry(&atom.to_string(), value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Leaf(atom) => atom.serialize(serializer),
            Self::Tuple(parts) => parts.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
            Self::Seq(seq) => seq.serialize(serializer),
        }
    }
}

impl Serialize for RecordSeq {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for record in self.iter() {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // An arity-1 record is the typed form of a bare scalar, so it
            // serializes as one.
            Self::Positional(fields) if fields.len() == 1 => fields[0].serialize(serializer),
            Self::Positional(fields) => fields.serialize(serializer),
            Self::Keyed(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields.iter() {
                    map.serialize_entry(&name.to_string(), value)?;
                }
                map.end()
            }
        }
    }
}

struct DeepMapVisitor;

impl<'de> Visitor<'de> for DeepMapVisitor {
    type Value = DeepMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a json object")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<DeepMap, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = DeepMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(Key::Atom(Atom::from(key)), value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for DeepMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DeepMapVisitor)
    }
}

/// One element of a JSON array: a scalar or a row of scalars.
enum Element {
    Atom(Atom),
    Row(Vec<Atom>),
}

struct ElementVisitor;

impl<'de> Visitor<'de> for ElementVisitor {
    type Value = Element;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a scalar or an array of scalars")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Element, E> {
        Ok(Element::Atom(Atom::Nil))
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<Element, E> {
        Ok(Element::Atom(Atom::Bool(b)))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<Element, E> {
        Ok(Element::Atom(Atom::Int(n)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<Element, E> {
        i64::try_from(n).map_or(Ok(Element::Atom(Atom::Float(n as f64))), |v| {
            Ok(Element::Atom(Atom::Int(v)))
        })
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> std::result::Result<Element, E> {
        Ok(Element::Atom(Atom::Float(n)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<Element, E> {
        Ok(Element::Atom(Atom::Str(s.into())))
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<Element, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut row = Vec::new();
        while let Some(atom) = access.next_element::<Atom>()? {
            row.push(atom);
        }
        Ok(Element::Row(row))
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ElementVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a json value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Leaf(Atom::Nil))
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<Value, E> {
        Ok(Value::Leaf(Atom::Bool(b)))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<Value, E> {
        Ok(Value::Leaf(Atom::Int(n)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<Value, E> {
        i64::try_from(n).map_or(Ok(Value::Leaf(Atom::Float(n as f64))), |v| {
            Ok(Value::Leaf(Atom::Int(v)))
        })
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> std::result::Result<Value, E> {
        Ok(Value::Leaf(Atom::Float(n)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<Value, E> {
        Ok(Value::Leaf(Atom::Str(s.into())))
    }

    fn visit_map<A>(self, access: A) -> std::result::Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        DeepMapVisitor.visit_map(access).map(Value::Map)
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut seq = RecordSeq::new();
        while let Some(element) = access.next_element::<Element>()? {
            match element {
                Element::Atom(atom) => seq.push(Record::Positional(vec![atom])),
                Element::Row(row) => seq.push(Record::Positional(row)),
            }
        }
        Ok(Value::Seq(seq))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}
