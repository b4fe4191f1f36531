//! R script tests
//!
//! Tests for bidirectional spin-style script ↔ notebook conversion.

mod import;
mod roundtrip;
