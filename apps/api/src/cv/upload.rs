//! Multipart form parsing shared by the CV and suggestion endpoints.

use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::models::document::RawDocument;
use crate::models::job::JobSource;

pub const FILE_FIELD: &str = "file";
pub const JOB_URL_FIELD: &str = "job_url";
pub const JOB_TEXT_FIELD: &str = "job_text";

/// Fields of an upload form. Blank text fields are treated as absent.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub document: Option<RawDocument>,
    pub job_url: Option<String>,
    pub job_text: Option<String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                FILE_FIELD => {
                    let file_name = field.file_name().map(str::to_string);
                    let mut document = RawDocument::new(field.bytes().await?);
                    if let Some(file_name) = file_name {
                        document = document.with_file_name(file_name);
                    }
                    form.document = Some(document);
                }
                JOB_URL_FIELD => form.job_url = non_blank(field.text().await?),
                JOB_TEXT_FIELD => form.job_text = non_blank(field.text().await?),
                other => debug!("Ignoring unexpected form field '{other}'"),
            }
        }

        Ok(form)
    }

    pub fn take_document(&mut self) -> Result<RawDocument, AppError> {
        self.document
            .take()
            .ok_or_else(|| AppError::Validation(format!("missing '{FILE_FIELD}' field")))
    }

    /// Exactly one of `job_url` and `job_text` must be present.
    pub fn take_job_source(&mut self) -> Result<JobSource, AppError> {
        match (self.job_url.take(), self.job_text.take()) {
            (Some(url), None) => Ok(JobSource::Url(url)),
            (None, Some(text)) => Ok(JobSource::Text(text)),
            (Some(_), Some(_)) => Err(AppError::Validation(format!(
                "provide either '{JOB_URL_FIELD}' or '{JOB_TEXT_FIELD}', not both"
            ))),
            (None, None) => Err(AppError::Validation(format!(
                "missing '{JOB_URL_FIELD}' or '{JOB_TEXT_FIELD}' field"
            ))),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
