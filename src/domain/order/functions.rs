use crate::domain::environment::OrderEnvironment;

use super::aggregate::{calculate_total_amount, validate_items, Order};
use super::errors::OrderError;
use super::status::{OrderStatus, OrderStatusFactory, OrderStatusType};
use super::value_objects::{CustomerId, OrderItem};

// ============================================================================
// Order Functions - pure state transitions
// ============================================================================
//
// DRAFT → PLACED → SHIPPED → DELIVERED
//   ↓        ↓
// CANCELLED CANCELLED
//
// Each function takes the current order by reference and returns a new
// validated order, or the first error. The input is never touched.
//
// ============================================================================

pub fn create_order(
    env: &OrderEnvironment,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
) -> Result<Order, OrderError> {
    // items come before the total in schema order, so an overflowing total
    // never hides an item violation
    validate_items(&items)?;
    let total_amount = calculate_total_amount(&items, &env.fallback_currency)?;
    let now = env.now();
    let status = OrderStatusFactory::new(env.clock.as_ref()).draft();

    Order::candidate(
        env.ids.next_order_id(),
        customer_id,
        items,
        status,
        total_amount,
        now,
    )
    .validated()
}

pub fn place_order(
    env: &OrderEnvironment,
    order: &Order,
    payment_id: &str,
) -> Result<Order, OrderError> {
    if !order.status().is_draft() {
        return Err(OrderError::domain(format!(
            "Only DRAFT orders can be placed. Current: {}",
            order.status().status_type()
        )));
    }

    let status = OrderStatusFactory::new(env.clock.as_ref()).placed(payment_id)?;
    transition(env, order, status)
}

pub fn cancel_order(
    env: &OrderEnvironment,
    order: &Order,
    reason: &str,
) -> Result<Order, OrderError> {
    if !order.can_be_cancelled() {
        return Err(OrderError::domain(format!(
            "Order cannot be cancelled. Current: {}",
            order.status().status_type()
        )));
    }

    let status = OrderStatusFactory::new(env.clock.as_ref()).cancelled(reason)?;
    transition(env, order, status)
}

pub fn ship_order(
    env: &OrderEnvironment,
    order: &Order,
    tracking_code: &str,
) -> Result<Order, OrderError> {
    require_status(order, OrderStatusType::Placed, "shipped")?;

    let status = OrderStatusFactory::new(env.clock.as_ref()).shipped(tracking_code)?;
    transition(env, order, status)
}

pub fn deliver_order(env: &OrderEnvironment, order: &Order) -> Result<Order, OrderError> {
    require_status(order, OrderStatusType::Shipped, "delivered")?;

    let status = OrderStatusFactory::new(env.clock.as_ref()).delivered();
    transition(env, order, status)
}

fn require_status(
    order: &Order,
    required: OrderStatusType,
    action: &str,
) -> Result<(), OrderError> {
    let current = order.status().status_type();
    if current != required {
        return Err(OrderError::domain(format!(
            "Only {required} orders can be {action}. Current: {current}"
        )));
    }
    Ok(())
}

/// Candidate with the new status, re-validated as a whole
fn transition(
    env: &OrderEnvironment,
    order: &Order,
    status: OrderStatus,
) -> Result<Order, OrderError> {
    order.with_status(status, env.now()).validated()
}

// ============================================================================
// Unit Tests
// ============================================================================
