//! Advisor output: parsing and normalization of the model's JSON reply.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{InsightRequestId, Timestamp};

/// Number of savings tips and risks requested from the model.
pub const EXPECTED_ENTRIES: usize = 3;

/// Reasons a model reply cannot be turned into insights.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightsError {
    #[error("empty response from advisor")]
    Empty,

    #[error("malformed advisor response: {0}")]
    Malformed(String),

    #[error("advisor response has no {0}")]
    MissingField(&'static str),
}

/// Narrative review of an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorInsights {
    pub summary: String,
    pub savings_tips: Vec<String>,
    pub risks: Vec<String>,
}

impl AdvisorInsights {
    /// Parses the model's text reply.
    ///
    /// Accepts a bare JSON object or one wrapped in a Markdown code fence.
    /// Blank entries are dropped and lists are capped at
    /// [`EXPECTED_ENTRIES`]; an empty summary or list is an error.
    pub fn parse(text: &str) -> Result<Self, InsightsError> {
        let body = strip_code_fence(text.trim());
        if body.is_empty() {
            return Err(InsightsError::Empty);
        }

        let raw: AdvisorInsights =
            serde_json::from_str(body).map_err(|e| InsightsError::Malformed(e.to_string()))?;
        raw.normalized()
    }

    fn normalized(self) -> Result<Self, InsightsError> {
        let summary = self.summary.trim().to_string();
        if summary.is_empty() {
            return Err(InsightsError::MissingField("summary"));
        }

        let savings_tips = clean_entries(self.savings_tips);
        if savings_tips.is_empty() {
            return Err(InsightsError::MissingField("savingsTips"));
        }

        let risks = clean_entries(self.risks);
        if risks.is_empty() {
            return Err(InsightsError::MissingField("risks"));
        }

        Ok(Self {
            summary,
            savings_tips,
            risks,
        })
    }
}

fn clean_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .take(EXPECTED_ENTRIES)
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Insights plus provenance, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorReport {
    pub request_id: InsightRequestId,
    pub insights: AdvisorInsights,
    pub model: String,
    pub generated_at: Timestamp,
}
