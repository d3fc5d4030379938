// Prompt templates for CV analysis.

/// Max tokens for the CV analysis reply.
pub const CV_ANALYSIS_MAX_TOKENS: i32 = 2000;

/// CV analysis prompt. `{cv_text}` and `{json_instruction}` are filled by `fill_template`.
pub const CV_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following CV/resume and extract key information:

{cv_text}

Please extract and organize the following information:
1. Name
2. Contact information
3. Skills (technical and soft skills)
4. Work experience (company names, positions, dates, and key responsibilities)
5. Education (degrees, institutions, dates)
6. Certifications
7. Projects (if any)

{json_instruction}"#;
