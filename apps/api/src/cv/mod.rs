// CV intake: PDF upload, text extraction and optional structured analysis.

pub mod analyzer;
pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod upload;
