use camp_derive::api_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fields a client may filter, sort, or select on.
pub const FILTERABLE_FIELDS: &[&str] = &[
    "title",
    "description",
    "weeks",
    "tuition",
    "minimumSkill",
    "scholarshipAvailable",
    "bootcamp",
    "user",
    "createdAt",
];

/// Entry requirement for a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

/// A course record as stored and served. Belongs to exactly one bootcamp.
#[api_model(deny_unknown_fields = false)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Duration, free-form (e.g. "8").
    pub weeks: String,
    pub tuition: u32,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
    /// Id of the parent bootcamp.
    pub bootcamp: String,
    /// Id of the creating user.
    pub user: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for adding a course under a bootcamp.
#[api_model]
pub struct CreateCourse {
    pub title: String,
    pub description: String,
    pub weeks: String,
    pub tuition: u32,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
}

/// Partial update payload; only present fields are merged.
#[api_model]
pub struct UpdateCourse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weeks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuition: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_skill: Option<MinimumSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_levels_are_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&MinimumSkill::Intermediate).expect("to json"),
            "\"intermediate\""
        );
        let skill: MinimumSkill = serde_json::from_str("\"advanced\"").expect("from json");
        assert_eq!(skill, MinimumSkill::Advanced);
    }

    #[test]
    fn unknown_skill_levels_are_rejected() {
        assert!(serde_json::from_str::<MinimumSkill>("\"wizard\"").is_err());
    }

    #[test]
    fn parent_reference_is_not_a_client_field() {
        let err = serde_json::from_value::<CreateCourse>(serde_json::json!({
            "title": "Rust 101",
            "description": "Systems programming",
            "weeks": "8",
            "tuition": 9000,
            "minimumSkill": "beginner",
            "bootcamp": "someone-elses"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("bootcamp"));
    }
}
