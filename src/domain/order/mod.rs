// ============================================================================
// Order Domain - value objects, status state machine, aggregate, functions
// ============================================================================
//
// - Value objects (Money, OrderItem, OrderId, CustomerId)
// - Status (OrderStatus enum + OrderStatusFactory)
// - Aggregate (Order + whole-aggregate schema check)
// - Functions (create / place / ship / deliver / cancel)
// - Errors (OrderError: Validation or Domain)
//
// No I/O here. Time and ids come in through OrderEnvironment.
//
// ============================================================================

mod schema;

pub mod value_objects;
pub mod status;
pub mod errors;
pub mod aggregate;
pub mod functions;

pub use schema::{MAX_ITEMS, MAX_QUANTITY, MIN_CANCEL_REASON_LEN, MIN_ITEMS, MIN_QUANTITY};
pub use value_objects::*;
pub use status::*;
pub use errors::*;
pub use aggregate::*;
pub use functions::*;
