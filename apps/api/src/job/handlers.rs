//! Axum route handlers for the Job Description API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::cv::handlers::AnalysisResponse;
use crate::errors::AppError;
use crate::job::analyzer::analyze_job;
use crate::models::job::{JobDescription, JobSource};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveJobRequest {
    pub source: JobSource,
}

#[derive(Debug, Serialize)]
pub struct ResolveJobResponse {
    pub job_description: JobDescription,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_description: String,
}

/// POST /api/v1/job/resolve
///
/// Scrapes a posting URL, or echoes pasted text, so the user can preview
/// what will be sent to the model.
pub async fn handle_resolve_job(
    State(state): State<AppState>,
    Json(request): Json<ResolveJobRequest>,
) -> Result<Json<ResolveJobResponse>, AppError> {
    validate_source(&request.source)?;
    let job_description = state.fetcher.resolve(request.source).await?;
    Ok(Json(ResolveJobResponse { job_description }))
}

/// POST /api/v1/job/analyze
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let job = JobDescription::new(request.job_description);
    let analysis = analyze_job(&job, &state.llm).await?;
    Ok(Json(AnalysisResponse { analysis }))
}

/// Rejects blank URLs and blank pasted text before any work is done.
pub fn validate_source(source: &JobSource) -> Result<(), AppError> {
    match source {
        JobSource::Url(url) if url.trim().is_empty() => {
            Err(AppError::Validation("job url cannot be empty".to_string()))
        }
        JobSource::Text(text) if text.trim().is_empty() => Err(AppError::Validation(
            "job description text cannot be empty".to_string(),
        )),
        _ => Ok(()),
    }
}
