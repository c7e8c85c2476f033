//! regroup - Augmented collections with a bidirectional reshaping engine
//!
//! This crate re-exports both layers of the regroup system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: regroup_reshape    — Records, sequences, mappings, reshaping,
//!                               indexed sequences, JSON boundary
//! Layer 0: regroup_foundation — Core types (Atom, Key, Error) and
//!                               persistent collections
//! ```

pub use regroup_foundation as foundation;
pub use regroup_reshape as reshape;
