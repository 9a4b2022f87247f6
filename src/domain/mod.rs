// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Pure order model. Persistence and orchestration live in `repository`
// and `application`.
//
// ============================================================================

pub mod environment;
pub mod order;

pub use environment::{
    Clock, FixedClock, IdGenerator, OrderEnvironment, RandomIdGenerator, SequentialIdGenerator,
    SystemClock, DEFAULT_FALLBACK_CURRENCY,
};
