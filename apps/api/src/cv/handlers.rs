//! Axum route handlers for the CV API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cv::analyzer::analyze_cv;
use crate::cv::extractor::extract_text;
use crate::cv::upload::UploadForm;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractCvResponse {
    pub cv_text: String,
    pub char_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeCvRequest {
    pub cv_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: Value,
}

/// POST /api/v1/cv/extract
///
/// Multipart upload with a `file` field holding the PDF. Returns its text.
pub async fn handle_extract_cv(multipart: Multipart) -> Result<Json<ExtractCvResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let text = extract_text(form.take_document()?).await?;

    Ok(Json(ExtractCvResponse {
        char_count: text.char_count(),
        cv_text: text.into_inner(),
    }))
}

/// POST /api/v1/cv/analyze
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeCvRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    if request.cv_text.trim().is_empty() {
        return Err(AppError::Validation("cv_text cannot be empty".to_string()));
    }

    let analysis = analyze_cv(&request.cv_text, &state.llm).await?;
    Ok(Json(AnalysisResponse { analysis }))
}
