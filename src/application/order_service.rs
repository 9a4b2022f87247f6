use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::domain::order::{self, CustomerId, Order, OrderError, OrderId, OrderItem};
use crate::domain::OrderEnvironment;
use crate::metrics::OrderMetrics;
use crate::repository::OrderRepository;

// ============================================================================
// Order Service
// ============================================================================
//
// Orchestrates: load Order → domain function → save Order
//
// Load/transition/save runs under one lock, so two callers never race on
// the same aggregate. A failed transition saves nothing.
//
// ============================================================================

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
    env: OrderEnvironment,
    metrics: Option<Arc<OrderMetrics>>,
    write_lock: Mutex<()>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: Arc<R>, env: OrderEnvironment) -> Self {
        Self {
            repository,
            env,
            metrics: None,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<OrderMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        items: Vec<OrderItem>,
    ) -> Result<Order, OrderError> {
        let started = Instant::now();
        let item_count = items.len();

        let result = match order::create_order(&self.env, customer_id, items) {
            Ok(created) => self.repository.save(created).await,
            Err(error) => Err(error),
        };

        match &result {
            Ok(created) => {
                tracing::info!(
                    order_id = %created.id(),
                    customer_id = %customer_id,
                    item_count,
                    total = %created.total_amount(),
                    "Order created"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_created();
                }
            }
            Err(error) => self.record_failure("create_order", None, error),
        }
        self.observe("create_order", started);

        result
    }

    pub async fn place_order(&self, order_id: OrderId, payment_id: &str) -> Result<Order, OrderError> {
        self.transition("place_order", "placed", order_id, |env, current| {
            order::place_order(env, current, payment_id)
        })
        .await
    }

    pub async fn ship_order(&self, order_id: OrderId, tracking_code: &str) -> Result<Order, OrderError> {
        self.transition("ship_order", "shipped", order_id, |env, current| {
            order::ship_order(env, current, tracking_code)
        })
        .await
    }

    pub async fn deliver_order(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.transition("deliver_order", "delivered", order_id, order::deliver_order)
            .await
    }

    pub async fn cancel_order(&self, order_id: OrderId, reason: &str) -> Result<Order, OrderError> {
        self.transition("cancel_order", "cancelled", order_id, |env, current| {
            order::cancel_order(env, current, reason)
        })
        .await
    }

    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.load(order_id).await
    }

    pub async fn get_orders_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, OrderError> {
        let orders = self.repository.find_by_customer_id(customer_id).await?;
        tracing::debug!(customer_id = %customer_id, count = orders.len(), "Listed customer orders");
        Ok(orders)
    }

    async fn load(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::domain(format!("Order not found: {order_id}")))
    }

    async fn transition<F>(
        &self,
        operation: &'static str,
        transition: &'static str,
        order_id: OrderId,
        apply: F,
    ) -> Result<Order, OrderError>
    where
        F: FnOnce(&OrderEnvironment, &Order) -> Result<Order, OrderError> + Send,
    {
        let started = Instant::now();

        let result = {
            let _guard = self.write_lock.lock().await;
            match self.load(order_id).await {
                Ok(current) => match apply(&self.env, &current) {
                    Ok(next) => self.repository.save(next).await,
                    Err(error) => Err(error),
                },
                Err(error) => Err(error),
            }
        };

        match &result {
            Ok(updated) => {
                tracing::info!(
                    order_id = %order_id,
                    status = %updated.status().status_type(),
                    "Order {}", transition
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_transition(transition);
                }
            }
            Err(error) => self.record_failure(operation, Some(order_id), error),
        }
        self.observe(operation, started);

        result
    }

    fn record_failure(&self, operation: &str, order_id: Option<OrderId>, error: &OrderError) {
        tracing::warn!(
            operation,
            order_id = ?order_id.map(|id| id.to_string()),
            kind = error.kind(),
            error = %error,
            "Order operation rejected"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_failure(operation, error.kind());
        }
    }

    fn observe(&self, operation: &str, started: Instant) {
        if let Some(metrics) = &self.metrics {
            metrics.observe_duration(operation, started.elapsed().as_secs_f64());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
