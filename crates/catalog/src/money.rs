//! Display prices.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// A price as shown to the shopper.
///
/// Amounts are kept in the smallest currency unit (two fractional digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount_minor: u64,
    pub currency: String,
}

impl ValueObject for Money {}

impl Money {
    pub fn new(amount_minor: u64, currency: impl Into<String>) -> Self {
        Self {
            amount_minor,
            currency: currency.into(),
        }
    }

    /// Convert a backend decimal amount (e.g. `1499.5`) into minor units.
    pub fn from_decimal(amount: f64, currency: impl Into<String>) -> DomainResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(format!(
                "price amount must be a non-negative number, got {amount}"
            )));
        }
        let currency = currency.into();
        if currency.trim().is_empty() {
            return Err(DomainError::validation("currency cannot be empty"));
        }

        Ok(Self {
            amount_minor: (amount * 100.0).round() as u64,
            currency,
        })
    }

    pub fn major(&self) -> u64 {
        self.amount_minor / 100
    }

    pub fn minor(&self) -> u64 {
        self.amount_minor % 100
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}.{:02}", self.currency, self.major(), self.minor())
    }
}
