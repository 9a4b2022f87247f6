use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order::{CustomerId, Order, OrderError, OrderId};
use super::OrderRepository;

// ============================================================================
// In-Memory Order Repository
// ============================================================================

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    orders: HashMap<OrderId, Order>,
    // first-save order, so listings are stable
    insertion_order: Vec<OrderId>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.orders.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.orders.is_empty()
    }

    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.orders.clear();
        state.insertion_order.clear();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: Order) -> Result<Order, OrderError> {
        let mut state = self.state.write().await;
        let order_id = order.id();

        if state.orders.insert(order_id, order.clone()).is_none() {
            state.insertion_order.push(order_id);
            tracing::debug!(order_id = %order_id, "Stored new order");
        } else {
            tracing::debug!(
                order_id = %order_id,
                status = %order.status().status_type(),
                "Replaced stored order"
            );
        }

        Ok(order)
    }

    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.state.read().await.orders.get(&order_id).cloned())
    }

    async fn find_by_customer_id(&self, customer_id: CustomerId) -> Result<Vec<Order>, OrderError> {
        let state = self.state.read().await;
        let orders = state
            .insertion_order
            .iter()
            .filter_map(|id| state.orders.get(id))
            .filter(|order| order.customer_id() == customer_id)
            .cloned()
            .collect();
        Ok(orders)
    }
}
