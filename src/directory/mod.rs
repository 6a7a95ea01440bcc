//! User identity and role lookup.
//!
//! The assignment core never manages accounts; it only needs to know
//! whether a user exists and which role they hold. The [`UserDirectory`]
//! port abstracts that lookup, with an in-memory adapter for tests.

mod domain;
mod memory;
mod ports;

pub use domain::{UserId, UserRecord, UserRole};
pub use memory::InMemoryUserDirectory;
pub use ports::{UserDirectory, UserDirectoryError, UserDirectoryResult};

#[cfg(test)]
mod tests;
