//! Configuration Tests
//!
//! Tests for configuration loading, validation and the container built from it.

mod validation_test;
