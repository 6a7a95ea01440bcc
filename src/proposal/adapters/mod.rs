//! Adapter implementations of the proposal ports.

pub mod memory;
