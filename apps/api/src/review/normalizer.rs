//! Field Normalizer: reconciles key-name drift in model-written résumés.
//!
//! Only three synonyms are known: `education[*].school` → `university`,
//! `education[*].major` → `degree`, `experience[*].role` → `title`.
//! The synonym key is always removed. Its value moves to the canonical key only
//! when that key is absent; an existing canonical value is never overwritten.

use serde_json::Value;

use crate::models::resume::ImprovedResume;

const EDUCATION_RENAMES: &[(&str, &str)] = &[("school", "university"), ("major", "degree")];
const EXPERIENCE_RENAMES: &[(&str, &str)] = &[("role", "title")];

/// Normalizes `resume` in place. Idempotent.
pub fn normalize_resume(resume: &mut ImprovedResume) {
    rename_in_entries(resume, "education", EDUCATION_RENAMES);
    rename_in_entries(resume, "experience", EXPERIENCE_RENAMES);
}

fn rename_in_entries(resume: &mut ImprovedResume, section: &str, renames: &[(&str, &str)]) {
    let Some(Value::Array(entries)) = resume.fields_mut().get_mut(section) else {
        return;
    };

    for entry in entries.iter_mut() {
        let Value::Object(fields) = entry else {
            continue;
        };
        for (synonym, canonical) in renames {
            if let Some(value) = fields.remove(*synonym) {
                if !fields.contains_key(*canonical) {
                    fields.insert((*canonical).to_string(), value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resume(value: Value) -> ImprovedResume {
        ImprovedResume::from_value(value).unwrap()
    }

    fn normalized(value: Value) -> ImprovedResume {
        let mut r = resume(value);
        normalize_resume(&mut r);
        r
    }

    #[test]
    fn test_school_and_major_are_renamed() {
        let out = normalized(json!({"education": [{"school": "X", "major": "Y"}]}));
        assert_eq!(
            out,
            resume(json!({"education": [{"university": "X", "degree": "Y"}]}))
        );
    }

    #[test]
    fn test_canonical_key_wins_and_synonym_is_dropped() {
        let out = normalized(json!({"education": [{"school": "X", "university": "Z"}]}));
        assert_eq!(out, resume(json!({"education": [{"university": "Z"}]})));
    }

    #[test]
    fn test_role_is_renamed_to_title() {
        let out = normalized(json!({
            "experience": [
                {"role": "Backend Engineer", "company": "Acme"},
                {"title": "Intern", "role": "Dev Intern"}
            ]
        }));
        assert_eq!(
            out,
            resume(json!({
                "experience": [
                    {"title": "Backend Engineer", "company": "Acme"},
                    {"title": "Intern"}
                ]
            }))
        );
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let out = normalized(json!({
            "experience": [{"role": "A"}, {"role": "B"}, {"role": "C"}]
        }));
        let titles: Vec<_> = out
            .entries("experience")
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_non_mapping_entries_and_sections_are_skipped() {
        let input = json!({
            "education": ["BSc, State University", {"school": "MIT"}, 42],
            "experience": "ten years of things"
        });
        let out = normalized(input);
        assert_eq!(
            out,
            resume(json!({
                "education": ["BSc, State University", {"university": "MIT"}, 42],
                "experience": "ten years of things"
            }))
        );
    }

    #[test]
    fn test_other_keys_and_sections_untouched() {
        let input = json!({
            "personal_details": {"name": "Jane", "school": "not an education entry"},
            "skills": [{"role": "leadership"}],
            "experience": [{"employer": "Acme", "role": "Lead"}]
        });
        let out = normalized(input);
        assert_eq!(out.get("personal_details").unwrap()["school"], "not an education entry");
        assert_eq!(out.get("skills").unwrap()[0]["role"], "leadership");
        assert_eq!(out.entries("experience")[0]["employer"], "Acme");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = vec![
            json!({}),
            json!({"education": [{"school": "X", "major": "Y"}, {"school": "A", "university": "B"}]}),
            json!({"experience": [{"role": "R"}, "loose", {"title": "T", "role": "R2"}]}),
            json!({"education": {"school": "not a list"}}),
        ];
        for input in inputs {
            let once = normalized(input.clone());
            let mut twice = once.clone();
            normalize_resume(&mut twice);
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }
}
