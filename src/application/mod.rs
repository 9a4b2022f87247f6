// ============================================================================
// Application Layer - orchestrates repository + domain functions
// ============================================================================

pub mod order_service;

pub use order_service::OrderService;
