//! Axum route handlers for the Suggestions API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cv::upload::UploadForm;
use crate::errors::AppError;
use crate::job::handlers::validate_source;
use crate::models::job::{JobDescription, JobSource};
use crate::models::suggestion::SuggestionResult;
use crate::state::AppState;
use crate::suggestions::generator::{categorize, SuggestionCategories};
use crate::suggestions::pipeline::{run_suggestions, CvInput, SuggestionRun};

#[derive(Debug, Deserialize)]
pub struct TextSuggestionRequest {
    pub cv_text: String,
    pub source: JobSource,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub interaction_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model_id: String,
    pub job_description: JobDescription,
    /// The model's reply, exactly as received.
    pub suggestions: SuggestionResult,
    /// Structured view of the reply when it holds the expected JSON categories.
    pub categories: Option<SuggestionCategories>,
}

impl From<SuggestionRun> for SuggestionResponse {
    fn from(run: SuggestionRun) -> Self {
        let categories = categorize(&run.suggestions);
        Self {
            interaction_id: run.interaction_id,
            generated_at: run.generated_at,
            model_id: run.model_id,
            job_description: run.job_description,
            suggestions: run.suggestions,
            categories,
        }
    }
}

/// POST /api/v1/suggestions
///
/// Multipart form: `file` (the CV PDF) plus `job_url` or `job_text`.
/// Full chain: extract CV → resolve job description → one inference call.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SuggestionResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let document = form.take_document()?;
    let source = form.take_job_source()?;

    let run = run_suggestions(
        CvInput::Document(document),
        source,
        &state.fetcher,
        &state.llm,
    )
    .await?;
    Ok(Json(run.into()))
}

/// POST /api/v1/suggestions/text
///
/// Same chain for a CV that was already extracted with `/api/v1/cv/extract`.
pub async fn handle_text_suggestions(
    State(state): State<AppState>,
    Json(request): Json<TextSuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    if request.cv_text.trim().is_empty() {
        return Err(AppError::Validation("cv_text cannot be empty".to_string()));
    }
    validate_source(&request.source)?;

    let run = run_suggestions(
        CvInput::Text(request.cv_text),
        request.source,
        &state.fetcher,
        &state.llm,
    )
    .await?;
    Ok(Json(run.into()))
}
