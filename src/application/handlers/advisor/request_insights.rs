//! RequestInsights command handler.
//!
//! Sends one estimate snapshot to the AI provider and turns the reply into
//! an `AdvisorReport`. One attempt per command; retrying is up to the user.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::advisor::{
    build_prompt, insights_schema, AdvisorInsights, AdvisorReport, AdvisorSnapshot, InsightsError,
    ADVISOR_SYSTEM_PROMPT, FAILED_INSIGHTS_MESSAGE,
};
use crate::domain::foundation::{InsightRequestId, Timestamp};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Default time allowed for one provider call.
pub const DEFAULT_INSIGHTS_TIMEOUT: Duration = Duration::from_secs(30);

/// Command to review an estimate.
#[derive(Debug, Clone)]
pub struct RequestInsightsCommand {
    /// The estimate as it was when the user asked.
    pub snapshot: AdvisorSnapshot,
    /// Caller-side generation; echoed into request metadata.
    pub generation: u64,
}

impl RequestInsightsCommand {
    pub fn new(snapshot: AdvisorSnapshot, generation: u64) -> Self {
        Self {
            snapshot,
            generation,
        }
    }
}

/// Errors that can occur when requesting insights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisorError {
    /// Area is zero or missing; nothing to review.
    #[error("a built-up area greater than zero is required")]
    AreaRequired,

    /// The provider call failed.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    /// The provider answered with something that is not valid insights.
    #[error("invalid insights: {0}")]
    MalformedInsights(#[from] InsightsError),
}

impl AdvisorError {
    /// Message shown to the user. Details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            AdvisorError::AreaRequired => "Enter a built-up area to get insights.",
            AdvisorError::Provider(_) | AdvisorError::MalformedInsights(_) => {
                FAILED_INSIGHTS_MESSAGE
            }
        }
    }
}

/// Handler for RequestInsights commands.
pub struct RequestInsightsHandler {
    ai_provider: Arc<dyn AIProvider>,
    timeout: Duration,
}

impl RequestInsightsHandler {
    /// Creates a new handler with the default timeout.
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            timeout: DEFAULT_INSIGHTS_TIMEOUT,
        }
    }

    /// Sets the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Handles a request insights command.
    pub async fn handle(&self, cmd: RequestInsightsCommand) -> Result<AdvisorReport, AdvisorError> {
        if !cmd.snapshot.is_actionable() {
            return Err(AdvisorError::AreaRequired);
        }

        let request_id = InsightRequestId::new();
        let request = CompletionRequest::new(RequestMetadata::new(request_id, cmd.generation))
            .with_system_prompt(ADVISOR_SYSTEM_PROMPT)
            .with_message(MessageRole::User, build_prompt(&cmd.snapshot))
            .with_json_schema(insights_schema());

        let provider = self.ai_provider.provider_info();
        debug!(
            %request_id,
            provider = %provider.name,
            model = %provider.model,
            generation = cmd.generation,
            items = cmd.snapshot.items.len(),
            total = cmd.snapshot.total,
            "Requesting estimate insights"
        );

        let response = tokio::time::timeout(self.timeout, self.ai_provider.complete(request))
            .await
            .map_err(|_| AIError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })
            .and_then(|result| result)
            .map_err(|err| {
                warn!(%request_id, error = %err, "Insights request failed");
                AdvisorError::Provider(err)
            })?;

        let insights = AdvisorInsights::parse(&response.content).map_err(|err| {
            warn!(%request_id, error = %err, "Advisor returned unusable insights");
            AdvisorError::MalformedInsights(err)
        })?;

        info!(
            %request_id,
            model = %response.model,
            tokens = response.usage.total_tokens,
            "Estimate insights generated"
        );

        Ok(AdvisorReport {
            request_id,
            insights,
            model: response.model,
            generated_at: Timestamp::now(),
        })
    }
}
