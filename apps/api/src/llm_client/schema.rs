//! Output schema declared to the model for lesson-plan analysis.
//!
//! Mirrors `models::analysis::AnalysisResult` field for field. Every field is
//! required; the model is not told about any others.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

const ITEM_FIELDS: [&str; 5] = [
    "name",
    "description",
    "insertionPoint",
    "evaluationSigns",
    "originalTextProposal",
];

pub static ANALYSIS_RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let item_properties: serde_json::Map<String, Value> = ITEM_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "digitalCompetencies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": item_properties,
                    "required": ITEM_FIELDS,
                }
            },
            "overallSummary": { "type": "STRING" },
            "fullIntegratedContent": { "type": "STRING" }
        },
        "required": ["digitalCompetencies", "overallSummary", "fullIntegratedContent"]
    })
});
