//! Composition root integration tests
