//! Order lifecycle domain model.
//!
//! Immutable value objects, a status state machine, and pure functions that
//! create and transition orders, returning `Result` instead of panicking.
//! An in-memory repository and an application service sit around the core.

pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod repository;

pub use application::OrderService;
pub use config::AppConfig;
pub use domain::order::{
    cancel_order, create_money, create_order, deliver_order, place_order, ship_order, CustomerId,
    Money, Order, OrderError, OrderId, OrderItem, OrderStatus, OrderStatusFactory, OrderStatusType,
};
pub use domain::OrderEnvironment;
pub use metrics::OrderMetrics;
pub use repository::{InMemoryOrderRepository, OrderRepository};
