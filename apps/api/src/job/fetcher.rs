//! Description Fetcher: resolves a `JobSource` into job description text.

use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::info;

use crate::job::html::{focus_job_section, html_to_text};
use crate::models::job::{JobDescription, JobSource};

/// Many job boards serve an empty shell or a 403 to unknown agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid job posting URL: {0}")]
    InvalidUrl(String),

    #[error("Could not retrieve {url}: {message}")]
    Network { url: String, message: String },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} contained no readable text")]
    EmptyPage { url: String },
}

/// One GET per URL, no cache, no retry.
#[derive(Clone)]
pub struct DescriptionFetcher {
    client: Client,
}

impl DescriptionFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for job posting fetches")?;
        Ok(Self { client })
    }

    /// Pasted text passes through untouched; URLs are fetched and scraped.
    pub async fn resolve(&self, source: JobSource) -> Result<JobDescription, FetchError> {
        match source {
            JobSource::Url(url) => self.fetch(&url).await,
            JobSource::Text(text) => Ok(JobDescription::new(text)),
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<JobDescription, FetchError> {
        let parsed = parse_posting_url(url)?;
        let url = parsed.to_string();

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| network_error(&url, e))?;
        let page_text = html_to_text(&body);
        let job_text = focus_job_section(&page_text);
        if job_text.is_empty() {
            return Err(FetchError::EmptyPage { url });
        }

        info!(
            "Fetched job posting {url} ({} bytes of HTML, {} chars kept)",
            body.len(),
            job_text.chars().count()
        );
        Ok(JobDescription::new(job_text))
    }
}

fn parse_posting_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FetchError::InvalidUrl(format!(
            "{raw}: unsupported scheme '{scheme}'"
        ))),
    }
}

fn network_error(url: &str, err: reqwest::Error) -> FetchError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    };
    FetchError::Network {
        url: url.to_string(),
        message,
    }
}
