//! Model-extracted résumé profile: the JSON shape the LLM returns, plus the
//! reshaping helpers the rest of the service builds prompts from.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::resumes::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

/// A skill as the model returns it. The schema asks for `{name, category}`
/// objects but models occasionally emit bare strings; accept both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillEntry {
    Detailed {
        name: String,
        category: Option<String>,
    },
    Name(String),
}

impl SkillEntry {
    pub fn name(&self) -> &str {
        match self {
            SkillEntry::Detailed { name, .. } => name,
            SkillEntry::Name(name) => name,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            SkillEntry::Detailed { category, .. } => category.as_deref(),
            SkillEntry::Name(_) => None,
        }
    }
}

/// Extracts a structured profile from raw résumé text via the LLM.
pub async fn parse_resume(raw_text: &str, llm: &LlmClient) -> Result<ParsedResume, AppError> {
    let prompt = RESUME_PARSE_PROMPT.replace("{raw_text}", raw_text);
    llm.call_json::<ParsedResume>(&prompt, RESUME_PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("resume parsing failed: {e}")))
}

/// Flattens parsed skills into `(name, category)` insert rows, dropping
/// entries whose name is empty after trimming.
pub fn skill_records(parsed: &ParsedResume) -> Vec<(String, Option<String>)> {
    parsed
        .skills
        .iter()
        .filter_map(|skill| {
            let name = skill.name().trim();
            if name.is_empty() {
                return None;
            }
            Some((
                name.to_string(),
                skill.category().map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            ))
        })
        .collect()
}

/// "Rust, Tokio, PostgreSQL" or a fallback line when nothing was extracted.
pub fn summarize_skills(parsed: &ParsedResume) -> String {
    let names: Vec<&str> = parsed
        .skills
        .iter()
        .map(|s| s.name().trim())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        "No skills found".to_string()
    } else {
        names.join(", ")
    }
}

/// One "title at company: description" line per experience entry.
pub fn summarize_experience(parsed: &ParsedResume) -> String {
    if parsed.experience.is_empty() {
        return "No experience found".to_string();
    }
    parsed
        .experience
        .iter()
        .map(|e| format!("{} at {}: {}", e.title, e.company, e.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One "degree from institution (year)" line per education entry.
pub fn summarize_education(parsed: &ParsedResume) -> String {
    if parsed.education.is_empty() {
        return "No education found".to_string();
    }
    parsed
        .education
        .iter()
        .map(|e| format!("{} from {} ({})", e.degree, e.institution, e.year))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> ParsedResume {
        ParsedResume {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: None,
            summary: Some("Backend engineer".to_string()),
            experience: vec![WorkExperience {
                title: "Senior Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2021-2024".to_string(),
                description: "Built billing systems".to_string(),
            }],
            education: vec![Education {
                degree: "BSc Computer Science".to_string(),
                institution: "State University".to_string(),
                year: "2018".to_string(),
            }],
            skills: vec![
                SkillEntry::Detailed {
                    name: "Rust".to_string(),
                    category: Some("Languages".to_string()),
                },
                SkillEntry::Name("PostgreSQL".to_string()),
            ],
        }
    }

    #[test]
    fn test_skill_entry_accepts_object_form() {
        let parsed: ParsedResume = serde_json::from_str(
            r#"{"skills": [{"name": "Rust", "category": "Languages"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.skills[0].name(), "Rust");
        assert_eq!(parsed.skills[0].category(), Some("Languages"));
    }

    #[test]
    fn test_skill_entry_accepts_bare_string_form() {
        let parsed: ParsedResume = serde_json::from_str(r#"{"skills": ["Rust"]}"#).unwrap();
        assert_eq!(parsed.skills[0].name(), "Rust");
        assert_eq!(parsed.skills[0].category(), None);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let parsed: ParsedResume = serde_json::from_str(r#"{"name": "Jane Doe"}"#).unwrap();
        assert!(parsed.experience.is_empty());
        assert!(parsed.education.is_empty());
        assert!(parsed.skills.is_empty());
    }

    #[test]
    fn test_skill_records_drops_empty_names() {
        let mut parsed = fixture();
        parsed.skills.push(SkillEntry::Name("   ".to_string()));
        let records = skill_records(&parsed);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], ("Rust".to_string(), Some("Languages".to_string())));
        assert_eq!(records[1], ("PostgreSQL".to_string(), None));
    }

    #[test]
    fn test_summarize_skills_joins_names() {
        assert_eq!(summarize_skills(&fixture()), "Rust, PostgreSQL");
    }

    #[test]
    fn test_summarize_skills_fallback() {
        assert_eq!(summarize_skills(&ParsedResume::default()), "No skills found");
    }

    #[test]
    fn test_summarize_experience_format() {
        assert_eq!(
            summarize_experience(&fixture()),
            "Senior Engineer at Acme: Built billing systems"
        );
    }

    #[test]
    fn test_summarize_experience_fallback() {
        assert_eq!(
            summarize_experience(&ParsedResume::default()),
            "No experience found"
        );
    }

    #[test]
    fn test_summarize_education_format() {
        assert_eq!(
            summarize_education(&fixture()),
            "BSc Computer Science from State University (2018)"
        );
    }
}
