// Job-match scoring prompt templates.

pub const MATCH_SYSTEM: &str = "\
You are a job-resume matching expert. Score how well the candidate matches the job. \
You MUST respond with valid JSON only, no markdown fences, no explanations. \
Return JSON: { \"score\": number (0-100), \"reasoning\": string (2-3 sentences) }";

pub const MATCH_PROMPT: &str = r#"JOB:
Title: {job_title}
Company: {job_company}
Description: {job_description}

CANDIDATE SKILLS: {skills}

CANDIDATE EXPERIENCE:
{experience}"#;
