//! Validated monetary amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned for budgets below zero.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("budget must be non-negative, got {0}")]
pub struct NegativeBudget(pub Decimal);

/// Non-negative fixed budget for a project or proposal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Budget(Decimal);

impl Budget {
    /// Creates a validated budget.
    ///
    /// # Errors
    ///
    /// Returns [`NegativeBudget`] when the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, NegativeBudget> {
        if amount < Decimal::ZERO {
            return Err(NegativeBudget(amount));
        }
        Ok(Self(amount))
    }

    /// A zero budget.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
