//! Test utilities for GraphCore integration tests
//!
//! - TestFixture: seeded schema registry plus an in-memory vertex set

pub mod test_fixture;
