//! Proposal lifecycle management.
//!
//! A proposal is a freelancer's application to work on an open project.
//! Proposals start Pending and finish in exactly one terminal status:
//! Accepted, Rejected, or Withdrawn. Which role may request which
//! transition is governed by an explicit [`domain::TransitionPolicy`]
//! rather than an implicit caller contract. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
