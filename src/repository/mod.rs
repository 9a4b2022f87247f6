// ============================================================================
// Order Repository - persistence boundary used by the application layer
// ============================================================================
//
// The domain core never calls this. OrderService loads orders through it,
// runs a domain function and saves the result.
//
// ============================================================================

mod in_memory;

use async_trait::async_trait;

use crate::domain::order::{CustomerId, Order, OrderError, OrderId};

pub use in_memory::InMemoryOrderRepository;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert or replace by order id, returning the stored order
    async fn save(&self, order: Order) -> Result<Order, OrderError>;

    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, OrderError>;

    /// All orders of a customer, in first-save order
    async fn find_by_customer_id(&self, customer_id: CustomerId) -> Result<Vec<Order>, OrderError>;
}
