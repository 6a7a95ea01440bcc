//! Unit tests for project lifecycle management.

mod status_transition_tests;
