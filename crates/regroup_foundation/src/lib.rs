//! Scalar atoms, composite keys, errors, and persistent collections for regroup.
//!
//! This crate provides:
//! - [`Atom`] - The scalar leaf type carried by records and mappings
//! - [`Key`] - Mapping keys: a single atom or a tuple of atoms
//! - [`Error`] - Categorized errors carrying the offending keys and values
//! - Persistent collections ([`RgVec`], [`RgSet`], [`RgMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod atom;
pub mod collections;
pub mod error;
pub mod key;

pub use atom::Atom;
pub use collections::{RgMap, RgSet, RgVec};
pub use error::{Error, ErrorKind};
pub use key::Key;

/// Convenience result type used throughout regroup.
pub type Result<T> = std::result::Result<T, Error>;
