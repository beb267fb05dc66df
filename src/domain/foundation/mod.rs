//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the estimator domain.

mod area;
mod errors;
mod ids;
mod money;
mod rate;
mod state_machine;
mod timestamp;

pub use area::Area;
pub use errors::ValidationError;
pub use ids::{InsightRequestId, MaterialId};
pub use money::{format_grouped, Currency, DigitGrouping};
pub use rate::Rate;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
