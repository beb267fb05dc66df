//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Estimation itself is synchronous domain code; only the advisor needs a
//! handler because it talks to an external AI provider.

pub mod handlers;

pub use handlers::advisor::{
    AdvisorError, AdvisorSession, RequestInsightsCommand, RequestInsightsHandler,
    DEFAULT_INSIGHTS_TIMEOUT,
};
