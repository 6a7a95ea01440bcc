//! Unit tests for proposal lifecycle management.

mod domain_tests;
mod lifecycle_tests;
