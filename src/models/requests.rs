use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};
use crate::models::domain::{ExperienceLevel, ProficiencyLevel, ProjectStatus};

/// Body for creating or replacing a person
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonnelRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub role: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
}

/// Body for creating or replacing a skill
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One required skill inside a project body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectSkillInput {
    pub skill_id: i64,
    pub min_proficiency_level: ProficiencyLevel,
}

/// Body for creating or updating a project
///
/// On update, `skills: None` leaves the requirement set untouched while
/// `skills: Some(vec![])` clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_project_request"))]
pub struct ProjectRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub skills: Option<Vec<ProjectSkillInput>>,
}

fn validate_project_request(req: &ProjectRequest) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        if end < start {
            return Err(ValidationError::new("end_date_before_start_date"));
        }
    }

    if let Some(skills) = &req.skills {
        let mut seen = HashSet::with_capacity(skills.len());
        for skill in skills {
            if skill.skill_id <= 0 {
                return Err(ValidationError::new("invalid_skill_id"));
            }
            if !seen.insert(skill.skill_id) {
                return Err(ValidationError::new("duplicate_skill_id"));
            }
        }
    }

    Ok(())
}

/// Body for assigning a skill to a person
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct AssignSkillRequest {
    #[validate(range(min = 1))]
    pub skill_id: i64,
    pub proficiency_level: ProficiencyLevel,
}

/// Body for changing an existing proficiency
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateProficiencyRequest {
    pub proficiency_level: ProficiencyLevel,
}
