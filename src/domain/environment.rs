use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::order::OrderId;

// ============================================================================
// Domain Environment - injectable side effects
// ============================================================================
//
// The order functions read the wall clock and mint order ids. Both go
// through these traits so tests can pin them down.
//
// ============================================================================

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait IdGenerator: Send + Sync {
    fn next_order_id(&self) -> OrderId;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random v4 ids
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_order_id(&self) -> OrderId {
        OrderId::from_uuid(Uuid::new_v4())
    }
}

/// Clock that only moves when advanced
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Ids 00000000-0000-0000-0000-000000000001, ...02, ... in call order
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_order_id(&self) -> OrderId {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        OrderId::from_uuid(Uuid::from_u128(n as u128))
    }
}

/// Everything the domain functions need from the outside world
#[derive(Clone)]
pub struct OrderEnvironment {
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    /// Currency stamped on the total when an order has no items
    pub fallback_currency: String,
}

pub const DEFAULT_FALLBACK_CURRENCY: &str = "JPY";

impl OrderEnvironment {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            fallback_currency: DEFAULT_FALLBACK_CURRENCY.to_string(),
        }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator))
    }

    pub fn with_fallback_currency(mut self, currency: impl Into<String>) -> Self {
        self.fallback_currency = currency.into();
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl Default for OrderEnvironment {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for OrderEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderEnvironment")
            .field("fallback_currency", &self.fallback_currency)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_order_id().as_uuid(), Uuid::from_u128(1));
        assert_eq!(ids.next_order_id().as_uuid(), Uuid::from_u128(2));
    }

    #[test]
    fn test_random_ids_differ() {
        let ids = RandomIdGenerator;
        assert_ne!(ids.next_order_id(), ids.next_order_id());
    }
}
