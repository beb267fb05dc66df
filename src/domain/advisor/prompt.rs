//! Prompt and response schema for the estimate review request.

use serde_json::{json, Value};

use super::AdvisorSnapshot;

/// Persona given to the model.
pub const ADVISOR_SYSTEM_PROMPT: &str =
    "Act as a senior civil engineer and construction estimator.";

/// Fraction digits kept in the prompt total, as a locale-formatted number.
const TOTAL_FRACTION_DIGITS: usize = 3;

/// Builds the user prompt describing the estimate.
pub fn build_prompt(snapshot: &AdvisorSnapshot) -> String {
    let breakdown =
        serde_json::to_string_pretty(&snapshot.items).unwrap_or_else(|_| "[]".to_string());

    format!(
        "I have a preliminary estimate for a {grade} quality residential construction project of {area} sq.ft.\n\
         \n\
         Currency: {currency}\n\
         Total Estimated Cost: {total}\n\
         \n\
         Breakdown of selected costs:\n\
         {breakdown}\n\
         \n\
         Please provide:\n\
         1. A brief summary of whether this estimate looks realistic for a standard market (assume India/Asia context given the materials).\n\
         2. 3 specific cost-saving tips relevant to the selected materials (e.g. Bricks vs Blocks, etc).\n\
         3. 3 potential risks or hidden costs often overlooked in this type of estimation.\n\
         \n\
         Return the response in JSON format.",
        grade = snapshot.grade,
        area = snapshot.area.sq_ft(),
        currency = snapshot.currency.label(),
        total = snapshot.currency.format_number(snapshot.total, TOTAL_FRACTION_DIGITS),
        breakdown = breakdown,
    )
}

/// JSON schema the provider must satisfy.
pub fn insights_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "savingsTips": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "risks": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "savingsTips", "risks"]
    })
}
