//! Suggestion Generator: the one inference call that turns a CV and a job
//! description into improvement advice.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::llm_client::prompts::{fill_template, CAREER_COACH_SYSTEM};
use crate::llm_client::{parse_json_object, InferenceError, LlmClient};
use crate::models::document::ExtractedText;
use crate::models::job::JobDescription;
use crate::models::suggestion::SuggestionResult;
use crate::suggestions::prompts::{SUGGESTIONS_MAX_TOKENS, SUGGESTIONS_PROMPT_TEMPLATE};

/// The five advice categories the prompt asks for, when the model answers
/// with JSON. Values are kept as the model wrote them (string, list or object).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionCategories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_gap_analysis: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_alignment: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_wording_suggestions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections_to_add_or_emphasize: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_formatting_improvements: Option<Value>,
}

impl SuggestionCategories {
    pub fn is_empty(&self) -> bool {
        self.skills_gap_analysis.is_none()
            && self.experience_alignment.is_none()
            && self.specific_wording_suggestions.is_none()
            && self.sections_to_add_or_emphasize.is_none()
            && self.general_formatting_improvements.is_none()
    }
}

pub fn build_prompt(cv: &ExtractedText, job: &JobDescription) -> String {
    fill_template(
        SUGGESTIONS_PROMPT_TEMPLATE,
        &[("cv_text", cv.as_str()), ("job_description", job.as_str())],
    )
}

/// Sends CV and job text to the model once and returns its reply verbatim.
pub async fn generate_suggestions(
    cv: &ExtractedText,
    job: &JobDescription,
    llm: &LlmClient,
) -> Result<SuggestionResult, InferenceError> {
    let prompt = build_prompt(cv, job);
    let text = llm
        .call(&prompt, CAREER_COACH_SYSTEM, Some(SUGGESTIONS_MAX_TOKENS))
        .await?;
    Ok(SuggestionResult::new(text))
}

/// Reads the advice categories out of a reply, if it holds a JSON object with
/// at least one of them. Keys are matched loosely ("Skills Gap Analysis",
/// "skills-gap-analysis" and "skills_gap_analysis" are the same key).
pub fn categorize(result: &SuggestionResult) -> Option<SuggestionCategories> {
    let Value::Object(object) = parse_json_object(result.as_str())? else {
        return None;
    };

    let normalized: Map<String, Value> = object
        .into_iter()
        .map(|(key, value)| (normalize_key(&key), value))
        .collect();

    let categories: SuggestionCategories = serde_json::from_value(Value::Object(normalized)).ok()?;
    (!categories.is_empty()).then_some(categories)
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
        .to_lowercase()
        .replace([' ', '-'], "_")
}
