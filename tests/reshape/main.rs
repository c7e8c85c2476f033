//! Integration tests for Layer 1: Reshape
//!
//! Tests for records, sequences, mappings, indexed sequences, the
//! reshaping engines, and the JSON boundary.

mod json;
mod ordered;
mod roundtrip;
mod sequence;
