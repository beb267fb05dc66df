//! Advisor Module - Domain side of the AI estimate review.
//!
//! The AI service itself sits behind the `AIProvider` port; this module owns
//! what is sent (snapshot, prompt, schema), what comes back (insights), and
//! the request lifecycle shown to the user.

mod insights;
mod prompt;
mod snapshot;
mod status;

pub use insights::{AdvisorInsights, AdvisorReport, InsightsError, EXPECTED_ENTRIES};
pub use prompt::{build_prompt, insights_schema, ADVISOR_SYSTEM_PROMPT};
pub use snapshot::{AdvisorSnapshot, SnapshotItem};
pub use status::{AdvisorPhase, AdvisorStatus, FAILED_INSIGHTS_MESSAGE};
