// Shared prompt fragments. Each module that calls the model keeps its own
// prompts.rs next to it; only cross-cutting pieces live here.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// System prompt used for every call: the model acts as a career coach.
pub const CAREER_COACH_SYSTEM: &str = "You are an experienced career coach and \
    technical recruiter. You read CVs and job descriptions carefully and give \
    concrete, honest advice. Never invent experience the candidate does not have.";

/// Appended to prompts whose reply should be a single JSON object.
pub const JSON_OBJECT_INSTRUCTION: &str = "Format the output as a single structured JSON object. \
    Do NOT include any text outside the JSON object.";

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("static regex"));

/// Fills `{name}` placeholders in a single pass over the template. Inserted
/// values are never scanned again, so braces inside a CV or job description
/// come through untouched. Unknown placeholders are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
