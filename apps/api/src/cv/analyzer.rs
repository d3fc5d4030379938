//! CV Analyzer: asks the model to structure a CV as JSON.

use serde_json::Value;

use crate::cv::prompts::{CV_ANALYSIS_MAX_TOKENS, CV_ANALYSIS_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{fill_template, CAREER_COACH_SYSTEM, JSON_OBJECT_INSTRUCTION};
use crate::llm_client::{InferenceError, LlmClient};

/// Key under which an unstructured reply is returned.
pub const RAW_ANALYSIS_KEY: &str = "raw_analysis";

/// Returns the model's structured reading of the CV. Replies without a JSON
/// object come back as `{"raw_analysis": <text>}`.
pub async fn analyze_cv(cv_text: &str, llm: &LlmClient) -> Result<Value, InferenceError> {
    let prompt = fill_template(
        CV_ANALYSIS_PROMPT_TEMPLATE,
        &[("cv_text", cv_text), ("json_instruction", JSON_OBJECT_INSTRUCTION)],
    );
    llm.call_json_lenient(
        &prompt,
        CAREER_COACH_SYSTEM,
        Some(CV_ANALYSIS_MAX_TOKENS),
        RAW_ANALYSIS_KEY,
    )
    .await
}
