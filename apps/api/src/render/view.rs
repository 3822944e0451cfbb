//! Flat projection of a canonical résumé, written as JSON beside the Typst template.
//!
//! Building the view reads the résumé and never mutates it. Missing or oddly
//! shaped sections degrade to placeholders or empty lists.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::resume::ImprovedResume;

pub const NAME_PLACEHOLDER: &str = "Applicant";

/// Contact keys rendered first, in this order; any other scalar
/// `personal_details` fields follow alphabetically.
const CONTACT_ORDER: [&str; 6] = ["email", "phone", "location", "linkedin", "github", "website"];
const HEADER_KEYS: [&str; 3] = ["name", "title", "headline"];
const BULLET_KEYS: [&str; 5] = [
    "responsibilities",
    "achievements",
    "highlights",
    "bullets",
    "description",
];
const DATE_KEYS: [&str; 3] = ["dates", "duration", "period"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderView {
    pub name: String,
    pub headline: Option<String>,
    pub contacts: Vec<String>,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceView>,
    pub education: Vec<EducationView>,
    pub skills: Vec<SkillGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceView {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub dates: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationView {
    pub degree: String,
    pub university: Option<String>,
    pub dates: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub label: Option<String>,
    pub items: Vec<String>,
}

impl RenderView {
    pub fn from_resume(resume: &ImprovedResume) -> Self {
        let details = resume.get("personal_details").and_then(Value::as_object);

        RenderView {
            name: resume.name().unwrap_or(NAME_PLACEHOLDER).to_string(),
            headline: details.and_then(|d| first_text(d, &HEADER_KEYS[1..])),
            contacts: details.map(contacts).unwrap_or_default(),
            summary: resume.get("summary").and_then(text_of),
            experience: resume
                .entries("experience")
                .iter()
                .filter_map(experience_entry)
                .collect(),
            education: resume
                .entries("education")
                .iter()
                .filter_map(education_entry)
                .collect(),
            skills: resume.get("skills").map(skill_groups).unwrap_or_default(),
        }
    }
}

fn contacts(details: &Map<String, Value>) -> Vec<String> {
    let mut out: Vec<String> = CONTACT_ORDER
        .iter()
        .filter_map(|key| details.get(*key).and_then(text_of))
        .collect();

    for (key, value) in details {
        if CONTACT_ORDER.contains(&key.as_str()) || HEADER_KEYS.contains(&key.as_str()) {
            continue;
        }
        if let Some(text) = text_of(value) {
            out.push(text);
        }
    }
    out
}

fn experience_entry(entry: &Value) -> Option<ExperienceView> {
    match entry {
        Value::Object(fields) => Some(ExperienceView {
            title: fields.get("title").and_then(text_of).unwrap_or_default(),
            company: fields.get("company").and_then(text_of),
            location: fields.get("location").and_then(text_of),
            dates: dates(fields),
            bullets: BULLET_KEYS
                .iter()
                .find_map(|key| fields.get(*key))
                .map(lines_of)
                .unwrap_or_default(),
        }),
        other => text_of(other).map(|title| ExperienceView {
            title,
            company: None,
            location: None,
            dates: None,
            bullets: Vec::new(),
        }),
    }
}

fn education_entry(entry: &Value) -> Option<EducationView> {
    match entry {
        Value::Object(fields) => Some(EducationView {
            degree: fields.get("degree").and_then(text_of).unwrap_or_default(),
            university: fields.get("university").and_then(text_of),
            dates: dates(fields),
            details: ["details", "honors", "coursework"]
                .iter()
                .find_map(|key| fields.get(*key))
                .map(lines_of)
                .unwrap_or_default(),
        }),
        other => text_of(other).map(|degree| EducationView {
            degree,
            university: None,
            dates: None,
            details: Vec::new(),
        }),
    }
}

fn dates(fields: &Map<String, Value>) -> Option<String> {
    if let Some(d) = first_text(fields, &DATE_KEYS) {
        return Some(d);
    }
    let start = fields.get("start_date").and_then(text_of);
    let end = fields.get("end_date").and_then(text_of);
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} – {e}")),
        (Some(s), None) => Some(format!("{s} – Present")),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    }
}

/// Skills arrive as a list, a `{category: [..]}` map, or a comma-separated string.
fn skill_groups(value: &Value) -> Vec<SkillGroup> {
    match value {
        Value::Object(groups) => groups
            .iter()
            .map(|(label, items)| SkillGroup {
                label: Some(label.clone()),
                items: items_of(items),
            })
            .filter(|g| !g.items.is_empty())
            .collect(),
        other => {
            let items = items_of(other);
            if items.is_empty() {
                Vec::new()
            } else {
                vec![SkillGroup { label: None, items }]
            }
        }
    }
}

fn items_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items.iter().flat_map(items_of).collect(),
        Value::Object(_) => skill_groups(value)
            .into_iter()
            .flat_map(|g| g.items)
            .collect(),
        other => text_of(other).into_iter().collect(),
    }
}

fn lines_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text_of).collect(),
        Value::String(s) => s
            .lines()
            .map(|l| l.trim().trim_start_matches(['-', '•', '*']).trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        other => text_of(other).into_iter().collect(),
    }
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| fields.get(*key).and_then(text_of))
}

/// Non-blank text for scalar values; `None` for containers, null and blanks.
fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(value: Value) -> RenderView {
        RenderView::from_resume(&ImprovedResume::from_value(value).unwrap())
    }

    #[test]
    fn test_missing_name_uses_placeholder() {
        assert_eq!(view(json!({})).name, NAME_PLACEHOLDER);
        assert_eq!(
            view(json!({"personal_details": {"email": "a@b.c"}})).name,
            NAME_PLACEHOLDER
        );
    }

    #[test]
    fn test_empty_resume_renders_empty_sections() {
        let v = view(json!({}));
        assert!(v.contacts.is_empty());
        assert!(v.summary.is_none());
        assert!(v.experience.is_empty());
        assert!(v.education.is_empty());
        assert!(v.skills.is_empty());
    }

    #[test]
    fn test_view_does_not_mutate_input() {
        let resume = ImprovedResume::from_value(json!({
            "personal_details": {"name": "Jane Smith"},
            "experience": [{"title": "Engineer", "responsibilities": "- Built APIs\n- Ran on-call"}]
        }))
        .unwrap();
        let before = resume.clone();
        let _ = RenderView::from_resume(&resume);
        assert_eq!(resume, before);
    }

    #[test]
    fn test_contacts_follow_preferred_order() {
        let v = view(json!({
            "personal_details": {
                "name": "Jane Smith",
                "title": "Backend Engineer",
                "portfolio": "jane.dev",
                "phone": "555-0100",
                "email": "jane@example.com"
            }
        }));
        assert_eq!(v.headline.as_deref(), Some("Backend Engineer"));
        assert_eq!(v.contacts, vec!["jane@example.com", "555-0100", "jane.dev"]);
    }

    #[test]
    fn test_experience_bullets_and_dates() {
        let v = view(json!({
            "experience": [
                {
                    "title": "Senior Engineer",
                    "company": "Acme",
                    "start_date": "2021",
                    "responsibilities": ["Cut p99 latency 40%", "  ", "Led migration"]
                },
                {"title": "Engineer", "dates": "2019 – 2021", "description": "- Built APIs\n• Ran on-call"},
                "Freelance consultant"
            ]
        }));
        assert_eq!(v.experience.len(), 3);
        assert_eq!(v.experience[0].dates.as_deref(), Some("2021 – Present"));
        assert_eq!(v.experience[0].bullets, vec!["Cut p99 latency 40%", "Led migration"]);
        assert_eq!(v.experience[1].bullets, vec!["Built APIs", "Ran on-call"]);
        assert_eq!(v.experience[2].title, "Freelance consultant");
    }

    #[test]
    fn test_skill_shapes() {
        let grouped = view(json!({"skills": {"Languages": ["Python", "Rust"], "Empty": []}}));
        assert_eq!(grouped.skills.len(), 1);
        assert_eq!(grouped.skills[0].label.as_deref(), Some("Languages"));

        let flat = view(json!({"skills": ["Python", "SQL"]}));
        assert_eq!(flat.skills[0].label, None);
        assert_eq!(flat.skills[0].items, vec!["Python", "SQL"]);

        let csv = view(json!({"skills": "Python, Go , "}));
        assert_eq!(csv.skills[0].items, vec!["Python", "Go"]);
    }

    #[test]
    fn test_non_mapping_education_entries() {
        let v = view(json!({"education": ["BSc Computer Science", null, {"degree": "MSc", "university": "MIT"}]}));
        assert_eq!(v.education.len(), 2);
        assert_eq!(v.education[0].degree, "BSc Computer Science");
        assert_eq!(v.education[1].university.as_deref(), Some("MIT"));
    }
}
