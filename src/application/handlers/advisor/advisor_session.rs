//! Advisor session - lifecycle of the "get insights" action.
//!
//! Tracks the Idle/Loading/Success/Error status shown to the user and a
//! generation counter. Every invocation takes a new generation; a reply
//! that arrives after a newer invocation has started is dropped.
//!
//! The state lock is only held for synchronous transitions, never across
//! the provider call.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, warn};

use crate::domain::advisor::{AdvisorSnapshot, AdvisorStatus};
use crate::domain::foundation::{StateMachine, ValidationError};

use super::request_insights::{RequestInsightsCommand, RequestInsightsHandler};

#[derive(Debug, Default)]
struct SessionState {
    status: AdvisorStatus,
    generation: u64,
}

impl SessionState {
    /// Moves to `next` if the phase transition is allowed.
    fn apply(&mut self, next: AdvisorStatus) -> Result<(), ValidationError> {
        self.status.phase().transition_to(next.phase())?;
        self.status = next;
        Ok(())
    }
}

/// Stateful front for the advisor, one per estimate screen.
pub struct AdvisorSession {
    handler: RequestInsightsHandler,
    state: Mutex<SessionState>,
}

impl AdvisorSession {
    pub fn new(handler: RequestInsightsHandler) -> Self {
        Self {
            handler,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current status.
    pub fn status(&self) -> AdvisorStatus {
        self.lock().status.clone()
    }

    /// Generation of the most recent invocation.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Asks the advisor about `snapshot` and returns the resulting status.
    ///
    /// Does nothing when the snapshot has no positive area. If another
    /// invocation starts while this one is pending, this one's outcome is
    /// discarded and the newer status is returned.
    pub async fn analyze(&self, snapshot: AdvisorSnapshot) -> AdvisorStatus {
        if !snapshot.is_actionable() {
            debug!("Advisor not invoked: area is zero");
            return self.status();
        }

        let generation = {
            let mut state = self.lock();
            let generation = state.generation + 1;
            if let Err(err) = state.apply(AdvisorStatus::Loading { generation }) {
                error!(error = %err, "Advisor could not start loading");
                return state.status.clone();
            }
            state.generation = generation;
            generation
        };

        let result = self
            .handler
            .handle(RequestInsightsCommand::new(snapshot, generation))
            .await;

        let mut state = self.lock();
        if state.generation != generation {
            warn!(
                generation,
                current = state.generation,
                "Discarding superseded advisor result"
            );
            return state.status.clone();
        }

        let next = match result {
            Ok(report) => AdvisorStatus::Success { report },
            Err(err) => {
                error!(generation, error = %err, "Advisor request failed");
                AdvisorStatus::Error {
                    message: err.user_message().to_string(),
                }
            }
        };

        if let Err(err) = state.apply(next) {
            error!(error = %err, "Advisor result rejected by state machine");
        }
        state.status.clone()
    }

    /// Asks again after a failure, using the estimate as it is now.
    ///
    /// Only acts in the Error state; otherwise returns the current status
    /// unchanged.
    pub async fn retry(&self, snapshot: AdvisorSnapshot) -> AdvisorStatus {
        {
            let state = self.lock();
            if !matches!(state.status, AdvisorStatus::Error { .. }) {
                return state.status.clone();
            }
        }
        self.analyze(snapshot).await
    }
}
