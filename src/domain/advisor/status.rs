//! Advisor request lifecycle: Idle → Loading → Success | Error.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

use super::{AdvisorInsights, AdvisorReport};

/// Message shown to the user for any advisor failure.
pub const FAILED_INSIGHTS_MESSAGE: &str = "Failed to generate insights. Please try again.";

/// Phase of the advisor state machine, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorPhase {
    Idle,
    Loading,
    Success,
    Error,
}

impl StateMachine for AdvisorPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AdvisorPhase::*;
        matches!(
            (self, target),
            // invoke
            (Idle, Loading)
                | (Success, Loading)
                // superseding invoke while a request is in flight
                | (Loading, Loading)
                // resolve / reject
                | (Loading, Success)
                | (Loading, Error)
                // retry
                | (Error, Loading)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AdvisorPhase::*;
        match self {
            Idle => vec![Loading],
            Loading => vec![Loading, Success, Error],
            Success => vec![Loading],
            Error => vec![Loading],
        }
    }
}

/// What the presentation layer shows for the advisor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdvisorStatus {
    #[default]
    Idle,
    Loading {
        generation: u64,
    },
    Success {
        report: AdvisorReport,
    },
    Error {
        message: String,
    },
}

impl AdvisorStatus {
    pub fn phase(&self) -> AdvisorPhase {
        match self {
            AdvisorStatus::Idle => AdvisorPhase::Idle,
            AdvisorStatus::Loading { .. } => AdvisorPhase::Loading,
            AdvisorStatus::Success { .. } => AdvisorPhase::Success,
            AdvisorStatus::Error { .. } => AdvisorPhase::Error,
        }
    }

    /// Error state carrying the generic user-facing message.
    pub fn failed() -> Self {
        AdvisorStatus::Error {
            message: FAILED_INSIGHTS_MESSAGE.to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AdvisorStatus::Loading { .. })
    }

    pub fn report(&self) -> Option<&AdvisorReport> {
        match self {
            AdvisorStatus::Success { report } => Some(report),
            _ => None,
        }
    }

    pub fn insights(&self) -> Option<&AdvisorInsights> {
        self.report().map(|report| &report.insights)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AdvisorStatus::Error { message } => Some(message),
            _ => None,
        }
    }
}
