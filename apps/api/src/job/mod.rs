// Job descriptions: fetching postings by URL, accepting pasted text, and
// optional structured analysis.

pub mod analyzer;
pub mod fetcher;
pub mod handlers;
pub mod html;
pub mod prompts;
