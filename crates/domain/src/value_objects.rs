//! Value objects for the order domain.

use serde::{Deserialize, Serialize};

/// Scaling factor between the order layer and the provisioning API.
///
/// Line item quantities are expressed in thousands; the upstream provider
/// receives `quantity * QUANTITY_SCALE` as its unit.
pub const QUANTITY_SCALE: u32 = 1000;

/// Opaque transaction identifier issued by the payment gateway.
///
/// This is the unique lookup key for an order; it is immutable once set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Creates a transaction ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the transaction ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The upstream provisioning API's identifier for a fulfilled line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOrderId(String);

impl ProviderOrderId {
    /// Creates a provider order ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the provider order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProviderOrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProviderOrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Money amount represented in currency units (cents) to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money(self.0 * i64::from(quantity))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0.abs() % 100;
        if self.0 < 0 {
            write!(f, "-${}.{:02}", dollars.abs(), cents)
        } else {
            write!(f, "${dollars}.{cents:02}")
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// One purchasable unit within an order, fulfilled independently upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identifier of the upstream catalog entry.
    pub provider_service_id: String,

    /// Target resource URL for fulfillment.
    pub link: String,

    /// Quantity in thousands units.
    pub quantity: u32,

    /// Price per 1000 units, in cents.
    pub unit_price: Money,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(
        provider_service_id: impl Into<String>,
        link: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            provider_service_id: provider_service_id.into(),
            link: link.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns the total price for this item (quantity * unit_price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// Returns the provider-facing quantity (thousands scaled to actual units).
    pub fn scaled_quantity(&self) -> u64 {
        u64::from(self.quantity) * u64::from(QUANTITY_SCALE)
    }
}
