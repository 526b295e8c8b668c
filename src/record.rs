use serde::{Deserialize, Serialize};

use crate::language::Language;

/// The canonical CV record handed to storage, rendering and the edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvRecord {
    pub profile: Profile,
    pub current_position: String,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub languages: Vec<LanguageEntry>,
    pub detected_language: Language,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub gpa: String,
    pub date: String,
    pub descriptions: Vec<String>,
}

impl EducationEntry {
    /// An entry is worth keeping once it names a school, a degree or a date.
    pub fn has_anchor(&self) -> bool {
        !self.school.is_empty() || !self.degree.is_empty() || !self.date.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub job_title: String,
    pub date: String,
    pub descriptions: Vec<String>,
}

impl ExperienceEntry {
    pub fn is_empty(&self) -> bool {
        self.company.is_empty()
            && self.job_title.is_empty()
            && self.date.is_empty()
            && self.descriptions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language: String,
    pub proficiency: String,
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_serializes_every_field() {
        let json = serde_json::to_value(CvRecord::default()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "profile",
            "current_position",
            "skills",
            "education",
            "experience",
            "languages",
            "detected_language",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(json["detected_language"], "en");
        assert_eq!(json["current_position"], "");
        for key in ["name", "email", "phone", "location", "url", "summary"] {
            assert_eq!(json["profile"][key], "", "profile.{key}");
        }
    }

    #[test]
    fn entry_field_names_match_collaborators() {
        let edu = serde_json::to_value(EducationEntry::default()).unwrap();
        let keys: Vec<_> = edu.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 5);
        for key in ["school", "degree", "gpa", "date", "descriptions"] {
            assert!(edu.get(key).is_some());
        }

        let exp = serde_json::to_value(ExperienceEntry::default()).unwrap();
        for key in ["company", "job_title", "date", "descriptions"] {
            assert!(exp.get(key).is_some());
        }

        let lang = serde_json::to_value(LanguageEntry::default()).unwrap();
        assert!(lang.get("language").is_some());
        assert!(lang.get("proficiency").is_some());
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = CvRecord {
            skills: vec!["Rust".into()],
            detected_language: Language::Hungarian,
            ..Default::default()
        };
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains("\"detected_language\":\"hu\""));
        let back: CvRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }
}
