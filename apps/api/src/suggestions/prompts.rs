// Prompt templates for CV improvement suggestions.

/// Max tokens for the suggestions reply.
pub const SUGGESTIONS_MAX_TOKENS: i32 = 4000;

/// Suggestion prompt. `{cv_text}` and `{job_description}` are filled by `fill_template`.
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"I need you to act as a career coach and provide suggestions to improve a CV/resume to better match a specific job description.

Here is the CV:
<cv>
{cv_text}
</cv>

Here is the job description:
<job_description>
{job_description}
</job_description>

Please provide detailed suggestions on how to improve the CV to better match this job description. Include:

1. Skills gap analysis: What skills mentioned in the job description are missing from the CV?
2. Experience alignment: How can the work experience be better presented to match the job requirements?
3. Specific wording suggestions: What keywords from the job description should be incorporated?
4. Sections to add or emphasize: What parts of the CV need more attention?
5. General formatting or structure improvements

Format your response as a structured JSON object with these keys:
"skills_gap_analysis", "experience_alignment", "specific_wording_suggestions",
"sections_to_add_or_emphasize", "general_formatting_improvements"."#;
