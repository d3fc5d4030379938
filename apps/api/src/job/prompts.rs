// Prompt templates for job description analysis.

/// Max tokens for the job analysis reply.
pub const JOB_ANALYSIS_MAX_TOKENS: i32 = 2000;

/// Job analysis prompt. `{job_description}` and `{json_instruction}` are filled by `fill_template`.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract key information:

{job_description}

Please extract and organize the following information:
1. Job title
2. Company name (if available)
3. Required skills
4. Required experience
5. Required education
6. Responsibilities
7. Nice-to-have qualifications

{json_instruction}"#;
