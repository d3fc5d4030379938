use bytes::Bytes;
use serde::Serialize;

/// The uploaded CV exactly as received. Consumed by extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Plain text pulled out of a PDF or a web page. No structure is implied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
