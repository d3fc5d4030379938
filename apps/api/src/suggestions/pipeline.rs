//! Suggestion pipeline: CV extraction, then job description resolution, then
//! one inference call. Each step finishes before the next starts and the first
//! failure ends the run.

use chrono::{DateTime, Utc};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::cv::extractor::extract_text;
use crate::errors::AppError;
use crate::job::fetcher::DescriptionFetcher;
use crate::llm_client::LlmClient;
use crate::models::document::{ExtractedText, RawDocument};
use crate::models::job::{JobDescription, JobSource};
use crate::models::suggestion::SuggestionResult;
use crate::suggestions::generator::generate_suggestions;

/// The CV as uploaded, or text the client already extracted.
#[derive(Debug, Clone)]
pub enum CvInput {
    Document(RawDocument),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct SuggestionRun {
    pub interaction_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model_id: String,
    pub job_description: JobDescription,
    pub suggestions: SuggestionResult,
}

pub async fn run_suggestions(
    cv: CvInput,
    job: JobSource,
    fetcher: &DescriptionFetcher,
    llm: &LlmClient,
) -> Result<SuggestionRun, AppError> {
    let interaction_id = Uuid::new_v4();
    let span = info_span!("suggestions", %interaction_id);

    async move {
        let cv_text = match cv {
            CvInput::Document(document) => extract_text(document).await?,
            CvInput::Text(text) => ExtractedText::new(text),
        };
        let job_description = fetcher.resolve(job).await?;
        let suggestions = generate_suggestions(&cv_text, &job_description, llm).await?;

        info!(
            cv_chars = cv_text.char_count(),
            suggestion_chars = suggestions.as_str().len(),
            "Suggestions generated"
        );
        Ok::<_, AppError>(SuggestionRun {
            interaction_id,
            generated_at: Utc::now(),
            model_id: llm.model_id().to_string(),
            job_description,
            suggestions,
        })
    }
    .instrument(span)
    .await
}
