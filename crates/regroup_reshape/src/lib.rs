//! Records, sequences, mappings, and the bidirectional reshaping engine.
//!
//! This crate provides:
//! - [`Record`] - One positional tuple or field-keyed mapping
//! - [`RecordSeq`] - An ordered sequence of records with projection,
//!   grouping, and set algebra
//! - [`DeepMap`] - A key-value mapping with nested traversal, tuple-key
//!   expansion/flattening, and regrouping
//! - [`IndexedSeq`] - An ordered sequence of unique elements with O(1)
//!   position lookup
//!
//! The two reshaping engines are mirror images: [`RecordSeq::group_by`]
//! turns flat records into a grouped [`DeepMap`], and
//! [`DeepMap::to_record_sequence`] turns a mapping back into flat records.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod json;
pub mod mapping;
pub mod ordered;
pub mod record;
pub mod sequence;
pub mod value;

pub use mapping::DeepMap;
pub use ordered::IndexedSeq;
pub use record::{Column, Record};
pub use sequence::RecordSeq;
pub use value::Value;

pub use regroup_foundation::{Atom, Error, ErrorKind, Key, Result};
