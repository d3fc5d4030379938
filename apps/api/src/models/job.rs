use serde::{Deserialize, Serialize};

/// Where a job description comes from: a posting URL to scrape, or text the
/// user pasted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSource {
    Url(String),
    Text(String),
}

/// Job description text. Fetched and pasted descriptions are the same type
/// and are treated identically downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_source_url_deserializes() {
        let source: JobSource =
            serde_json::from_str(r#"{"url": "https://jobs.example.com/42"}"#).unwrap();
        assert_eq!(source, JobSource::Url("https://jobs.example.com/42".to_string()));
    }

    #[test]
    fn test_job_source_text_deserializes() {
        let source: JobSource =
            serde_json::from_str(r#"{"text": "Seeking senior engineer"}"#).unwrap();
        assert_eq!(source, JobSource::Text("Seeking senior engineer".to_string()));
    }

    #[test]
    fn test_job_source_rejects_unknown_variant() {
        assert!(serde_json::from_str::<JobSource>(r#"{"file": "jd.txt"}"#).is_err());
    }

    #[test]
    fn test_job_description_serializes_as_plain_string() {
        let jd = JobDescription::new("Requirements: Rust");
        assert_eq!(serde_json::to_string(&jd).unwrap(), r#""Requirements: Rust""#);
    }
}
