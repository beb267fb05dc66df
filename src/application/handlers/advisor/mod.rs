//! Advisor command handlers.
//!
//! `RequestInsightsHandler` performs a single review call;
//! `AdvisorSession` wraps it with the user-facing status and generation guard.

mod advisor_session;
mod request_insights;

pub use advisor_session::AdvisorSession;
pub use request_insights::{
    AdvisorError, RequestInsightsCommand, RequestInsightsHandler, DEFAULT_INSIGHTS_TIMEOUT,
};
