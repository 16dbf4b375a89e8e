//! Cache client integration tests

mod mutex_test;
