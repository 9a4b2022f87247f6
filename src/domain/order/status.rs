use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::environment::Clock;
use super::errors::OrderError;
use super::schema;

// ============================================================================
// Order Status - one variant per lifecycle state
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum OrderStatus {
    Draft {
        created_at: DateTime<Utc>,
    },
    Placed {
        placed_at: DateTime<Utc>,
        payment_id: String,
    },
    Shipped {
        shipped_at: DateTime<Utc>,
        tracking_code: String,
    },
    Delivered {
        delivered_at: DateTime<Utc>,
    },
    Cancelled {
        cancelled_at: DateTime<Utc>,
        reason: String,
    },
}

/// Discriminant of `OrderStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatusType {
    Draft,
    Placed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Placed => "PLACED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OrderStatus {
    pub fn status_type(&self) -> OrderStatusType {
        match self {
            Self::Draft { .. } => OrderStatusType::Draft,
            Self::Placed { .. } => OrderStatusType::Placed,
            Self::Shipped { .. } => OrderStatusType::Shipped,
            Self::Delivered { .. } => OrderStatusType::Delivered,
            Self::Cancelled { .. } => OrderStatusType::Cancelled,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft { .. })
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    pub fn can_be_cancelled(&self) -> bool {
        self.is_draft() || self.is_placed()
    }

    pub fn validate(&self) -> Result<(), OrderError> {
        match self {
            Self::Draft { .. } | Self::Delivered { .. } => Ok(()),
            Self::Placed { payment_id, .. } => schema::min_chars(payment_id, 1),
            Self::Shipped { tracking_code, .. } => schema::min_chars(tracking_code, 1),
            Self::Cancelled { reason, .. } => {
                schema::min_chars(reason, schema::MIN_CANCEL_REASON_LEN)
            }
        }
    }
}

// ============================================================================
// Status Factory - stamps the transition time from the injected clock
// ============================================================================

pub struct OrderStatusFactory<'a> {
    clock: &'a dyn Clock,
}

impl<'a> OrderStatusFactory<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    pub fn draft(&self) -> OrderStatus {
        OrderStatus::Draft {
            created_at: self.clock.now(),
        }
    }

    pub fn placed(&self, payment_id: impl Into<String>) -> Result<OrderStatus, OrderError> {
        Self::checked(OrderStatus::Placed {
            placed_at: self.clock.now(),
            payment_id: payment_id.into(),
        })
    }

    pub fn shipped(&self, tracking_code: impl Into<String>) -> Result<OrderStatus, OrderError> {
        Self::checked(OrderStatus::Shipped {
            shipped_at: self.clock.now(),
            tracking_code: tracking_code.into(),
        })
    }

    pub fn delivered(&self) -> OrderStatus {
        OrderStatus::Delivered {
            delivered_at: self.clock.now(),
        }
    }

    pub fn cancelled(&self, reason: impl Into<String>) -> Result<OrderStatus, OrderError> {
        Self::checked(OrderStatus::Cancelled {
            cancelled_at: self.clock.now(),
            reason: reason.into(),
        })
    }

    fn checked(status: OrderStatus) -> Result<OrderStatus, OrderError> {
        status.validate()?;
        Ok(status)
    }
}
