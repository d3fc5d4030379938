//! Job Analyzer: extracts title, requirements and responsibilities from a
//! job description.

use serde_json::Value;

use crate::cv::analyzer::RAW_ANALYSIS_KEY;
use crate::job::prompts::{JOB_ANALYSIS_MAX_TOKENS, JOB_ANALYSIS_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{fill_template, CAREER_COACH_SYSTEM, JSON_OBJECT_INSTRUCTION};
use crate::llm_client::{InferenceError, LlmClient};
use crate::models::job::JobDescription;

pub async fn analyze_job(job: &JobDescription, llm: &LlmClient) -> Result<Value, InferenceError> {
    let prompt = fill_template(
        JOB_ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("job_description", job.as_str()),
            ("json_instruction", JSON_OBJECT_INSTRUCTION),
        ],
    );
    llm.call_json_lenient(
        &prompt,
        CAREER_COACH_SYSTEM,
        Some(JOB_ANALYSIS_MAX_TOKENS),
        RAW_ANALYSIS_KEY,
    )
    .await
}
