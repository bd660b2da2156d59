use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A resume document. The embedded sections have no identity outside their parent.
///
/// Timestamps are RFC 3339 strings. `user_id` is a logical reference only; no
/// referential integrity is enforced against the users collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub personal_info: PersonalInfo,
    /// Display order is insertion order for all three sections.
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: Option<String>,
    pub degree: Option<String>,
    pub school: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: Option<String>,
    pub name: Option<String>,
    pub level: Option<String>,
}

impl Resume {
    /// Gives every section entry without an id a fresh one. Existing ids and
    /// entry order are left untouched.
    pub fn assign_missing_entry_ids(&mut self) {
        let ids = self
            .experience
            .iter_mut()
            .map(|e| &mut e.id)
            .chain(self.education.iter_mut().map(|e| &mut e.id))
            .chain(self.skills.iter_mut().map(|s| &mut s.id));

        for id in ids {
            if id.as_deref().map_or(true, |v| v.trim().is_empty()) {
                *id = Some(Uuid::new_v4().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_resume_has_empty_sections() {
        let resume = Resume::default();
        assert!(resume.experience.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.skills.is_empty());

        let value = serde_json::to_value(&resume).unwrap();
        assert_eq!(value["experience"], json!([]));
        assert_eq!(value["education"], json!([]));
        assert_eq!(value["skills"], json!([]));
    }

    #[test]
    fn test_sections_serialize_independently() {
        let resume = Resume::default();
        assert_eq!(serde_json::to_string(&resume.skills).unwrap(), "[]");
        assert_eq!(serde_json::to_string(&resume.education).unwrap(), "[]");
    }

    #[test]
    fn test_absent_sections_deserialize_to_empty() {
        let resume: Resume = serde_json::from_value(json!({
            "userId": "u-1",
            "name": "Backend roles"
        }))
        .unwrap();
        assert_eq!(resume.user_id.as_deref(), Some("u-1"));
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
        assert_eq!(resume.personal_info, PersonalInfo::default());
    }

    #[test]
    fn test_camel_case_field_names() {
        let resume: Resume = serde_json::from_value(json!({
            "personalInfo": { "name": "Ada", "title": "Engineer" },
            "experience": [{ "title": "Dev", "startDate": "2020-01", "endDate": "2022-06" }]
        }))
        .unwrap();
        assert_eq!(resume.personal_info.title.as_deref(), Some("Engineer"));
        assert_eq!(resume.experience[0].start_date.as_deref(), Some("2020-01"));

        let value = serde_json::to_value(&resume).unwrap();
        assert!(value.get("personalInfo").is_some());
        assert!(value["experience"][0].get("endDate").is_some());
    }

    #[test]
    fn test_no_date_order_enforced() {
        let resume: Resume = serde_json::from_value(json!({
            "education": [{ "startDate": "2024", "endDate": "2019" }]
        }))
        .unwrap();
        assert_eq!(resume.education[0].end_date.as_deref(), Some("2019"));
    }

    #[test]
    fn test_assign_missing_entry_ids_keeps_existing_and_order() {
        let mut resume = Resume {
            experience: vec![
                Experience {
                    id: Some("keep-me".into()),
                    title: Some("first".into()),
                    ..Default::default()
                },
                Experience {
                    title: Some("second".into()),
                    ..Default::default()
                },
            ],
            skills: vec![Skill {
                id: Some("  ".into()),
                name: Some("Rust".into()),
                ..Default::default()
            }],
            ..Default::default()
        };

        resume.assign_missing_entry_ids();

        assert_eq!(resume.experience[0].id.as_deref(), Some("keep-me"));
        assert_eq!(resume.experience[0].title.as_deref(), Some("first"));
        assert_eq!(resume.experience[1].title.as_deref(), Some("second"));
        assert!(resume.experience[1].id.is_some());
        let skill_id = resume.skills[0].id.as_deref().unwrap();
        assert!(!skill_id.trim().is_empty());
    }
}
