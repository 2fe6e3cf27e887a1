// Résumé extraction prompt templates.

pub const RESUME_PARSE_SYSTEM: &str = "\
You are a resume parser. Extract structured data from the resume text provided. \
You MUST respond with valid JSON only, no markdown fences, no explanations. \
Return a JSON object with this structure:
{
  \"name\": string or null,
  \"email\": string or null,
  \"phone\": string or null,
  \"summary\": string or null (brief professional summary),
  \"experience\": [{\"title\": string, \"company\": string, \"duration\": string, \"description\": string}],
  \"education\": [{\"degree\": string, \"institution\": string, \"year\": string}],
  \"skills\": [{\"name\": string, \"category\": string}]
}

For skills, categorize each skill into one of these categories:
- \"Languages\" (programming languages like JavaScript, Python, Java, etc.)
- \"Frameworks\" (React, Angular, Django, Spring, etc.)
- \"Databases\" (PostgreSQL, MongoDB, Redis, etc.)
- \"Cloud & DevOps\" (AWS, Docker, Kubernetes, CI/CD, etc.)
- \"Tools\" (Git, Jira, Figma, VS Code, etc.)
- \"Soft Skills\" (Leadership, Communication, Teamwork, etc.)
- \"Other\" (anything that doesn't fit above)";

pub const RESUME_PARSE_PROMPT: &str = r#"Extract structured data from the following resume text.

RESUME TEXT:
{raw_text}

Return ONLY the JSON object, nothing else."#;
