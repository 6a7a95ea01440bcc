//! Wall-clock deadline parsing and UTC normalisation.
//!
//! Clients type deadlines as local wall-clock strings. The normaliser
//! parses the fixed `dd-MM-yyyy HH:mm` pattern, interprets the value in a
//! reference zone resolved once at construction, and yields an absolute
//! UTC instant. Futurity is deliberately not checked here so the same
//! normaliser serves read paths; lifecycle callers enforce it with
//! [`require_future`].

mod normalizer;

pub use normalizer::{DeadlineError, DeadlineNormalizer, ReferenceZone, require_future};

#[cfg(test)]
mod tests;
