// CV improvement suggestions: the end-to-end chain
// extract CV -> resolve job description -> one inference call.

pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
