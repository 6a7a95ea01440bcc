//! Gigboard: freelance project board assignment core.
//!
//! This crate implements the project/proposal assignment lifecycle of a
//! freelance marketplace: clients post projects, freelancers apply with
//! proposals, and assigning one freelancer cascades rejections and
//! notifications across the competing proposals.
//!
//! # Architecture
//!
//! Gigboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//!
//! Persistence mechanics, authentication, file storage, and notification
//! delivery transport live outside this crate behind the port traits.
//!
//! # Modules
//!
//! - [`directory`]: User identity and role lookup
//! - [`deadline`]: Wall-clock deadline parsing and UTC normalisation
//! - [`skill`]: Canonical skill vocabulary and project skill-set resolution
//! - [`notification`]: Notice composition and the fire-and-forget sink port
//! - [`project`]: Project aggregate, lifecycle, and the assignment cascade
//! - [`proposal`]: Proposal aggregate, terminal-status rules, and the
//!   role-gated transition policy

pub mod deadline;
pub mod directory;
pub mod notification;
pub mod project;
pub mod proposal;
pub mod skill;
