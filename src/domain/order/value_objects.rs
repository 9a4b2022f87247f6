use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::OrderError;
use super::schema;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Order identity. Same runtime shape as a plain UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Customer identity. Distinct from `OrderId` at the type level only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Amount of money in a single currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Result<Self, OrderError> {
        let money = Self {
            amount,
            currency: currency.into(),
        };
        money.validate()?;
        Ok(money)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Schema check: amount first, then currency
    pub fn validate(&self) -> Result<(), OrderError> {
        schema::non_negative(self.amount)?;
        schema::currency_code(&self.currency)
    }

    /// Builds a value without running the schema. Callers must validate
    /// the enclosing aggregate afterwards.
    pub(crate) fn unchecked(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Free-function form of `Money::new`
pub fn create_money(amount: Decimal, currency: impl Into<String>) -> Result<Money, OrderError> {
    Money::new(amount, currency)
}

/// Order line. Fields are public so callers can assemble items freely;
/// the order schema validates them when the aggregate is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    pub fn new(
        product_id: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Result<Self, OrderError> {
        let item = Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn validate(&self) -> Result<(), OrderError> {
        schema::min_chars(&self.product_id, 1)?;
        schema::quantity_in_range(self.quantity)?;
        self.unit_price.validate()
    }

    /// quantity × unit price, or None on decimal overflow
    pub fn subtotal(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price.amount)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
