use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lowest demonstrable proficiency
pub const MIN_PROFICIENCY: u8 = 1;
/// Highest demonstrable proficiency ("Expert")
pub const MAX_PROFICIENCY: u8 = 5;

/// Raised when a value outside [1, 5] is offered as a proficiency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("proficiency level must be between 1 and 5, got {0}")]
pub struct InvalidProficiency(pub i64);

/// Skill proficiency on the fixed 1..=5 scale
///
/// Used both for a person's demonstrated level and for a project's
/// minimum required level. Values outside the scale cannot be constructed,
/// so everything downstream may rely on the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProficiencyLevel(u8);

impl ProficiencyLevel {
    pub const LOWEST: Self = Self(MIN_PROFICIENCY);
    pub const EXPERT: Self = Self(MAX_PROFICIENCY);

    pub fn new(level: u8) -> Result<Self, InvalidProficiency> {
        if (MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&level) {
            Ok(Self(level))
        } else {
            Err(InvalidProficiency(i64::from(level)))
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ProficiencyLevel {
    type Error = InvalidProficiency;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i16> for ProficiencyLevel {
    type Error = InvalidProficiency;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InvalidProficiency(i64::from(value)))
            .and_then(Self::new)
    }
}

impl From<ProficiencyLevel> for u8 {
    fn from(level: ProficiencyLevel) -> Self {
        level.0
    }
}

impl From<ProficiencyLevel> for i16 {
    fn from(level: ProficiencyLevel) -> Self {
        i16::from(level.0)
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seniority band of a person
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_level")]
pub enum ExperienceLevel {
    #[default]
    Junior,
    #[serde(rename = "Mid-Level")]
    #[sqlx(rename = "Mid-Level")]
    MidLevel,
    Senior,
}

/// Lifecycle stage of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    Completed,
}

/// A person on the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personnel {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub experience_level: ExperienceLevel,
}

/// A skill that people can hold and projects can require
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One person's proficiency in one skill
///
/// A (personnel_id, skill_id) pair is unique across the data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSkill {
    pub personnel_id: i64,
    pub skill_id: i64,
    pub proficiency_level: ProficiencyLevel,
}

/// A person's skill joined with the skill's catalog data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelSkillDetail {
    #[serde(rename = "id")]
    pub skill_id: i64,
    pub name: String,
    pub category: String,
    pub proficiency_level: ProficiencyLevel,
}

/// A project's minimum level for one skill, denormalized with the skill name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill_id: i64,
    pub skill_name: String,
    pub min_proficiency_level: ProficiencyLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
}

/// Project together with its skill requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub skills: Vec<SkillRequirement>,
}

/// A roster member with their skills attached, ready for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub personnel: Personnel,
    pub skills: Vec<PersonSkill>,
}

impl RosterEntry {
    pub fn new(personnel: Personnel, skills: Vec<PersonSkill>) -> Self {
        Self { personnel, skills }
    }

    /// Demonstrated level for a skill, if the person holds it at all
    #[inline]
    pub fn level_for(&self, skill_id: i64) -> Option<ProficiencyLevel> {
        self.skills
            .iter()
            .find(|skill| skill.skill_id == skill_id)
            .map(|skill| skill.proficiency_level)
    }
}

/// A required skill the person satisfies, with both levels for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub skill_name: String,
    pub required_level: ProficiencyLevel,
    pub actual_level: ProficiencyLevel,
}

/// A fully qualified person and how well they cover the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelMatch {
    #[serde(flatten)]
    pub personnel: Personnel,
    pub matched_skills: Vec<MatchedSkill>,
    pub match_percentage: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_bounds() {
        assert!(ProficiencyLevel::new(0).is_err());
        assert!(ProficiencyLevel::new(6).is_err());
        for level in 1..=5 {
            assert_eq!(ProficiencyLevel::new(level).unwrap().get(), level);
        }
        assert_eq!(ProficiencyLevel::EXPERT.get(), 5);
        assert_eq!(ProficiencyLevel::LOWEST.get(), 1);
    }

    #[test]
    fn test_proficiency_from_database_column() {
        assert_eq!(ProficiencyLevel::try_from(3i16).unwrap().get(), 3);
        assert_eq!(ProficiencyLevel::try_from(-1i16), Err(InvalidProficiency(-1)));
        assert_eq!(ProficiencyLevel::try_from(300i16), Err(InvalidProficiency(300)));
    }

    #[test]
    fn test_proficiency_serde_rejects_out_of_range() {
        let level: ProficiencyLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level.get(), 4);
        assert_eq!(serde_json::to_string(&level).unwrap(), "4");

        assert!(serde_json::from_str::<ProficiencyLevel>("0").is_err());
        assert!(serde_json::from_str::<ProficiencyLevel>("6").is_err());
    }

    #[test]
    fn test_experience_level_wire_names() {
        assert_eq!(
            serde_json::to_string(&ExperienceLevel::MidLevel).unwrap(),
            "\"Mid-Level\""
        );
        let senior: ExperienceLevel = serde_json::from_str("\"Senior\"").unwrap();
        assert_eq!(senior, ExperienceLevel::Senior);
    }

    #[test]
    fn test_roster_entry_level_lookup() {
        let entry = RosterEntry::new(
            Personnel {
                id: 1,
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: "Engineer".to_string(),
                experience_level: ExperienceLevel::Senior,
            },
            vec![PersonSkill {
                personnel_id: 1,
                skill_id: 10,
                proficiency_level: ProficiencyLevel::EXPERT,
            }],
        );

        assert_eq!(entry.level_for(10), Some(ProficiencyLevel::EXPERT));
        assert_eq!(entry.level_for(11), None);
    }

    #[test]
    fn test_personnel_match_flattens_identity() {
        let m = PersonnelMatch {
            personnel: Personnel {
                id: 7,
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                role: "Architect".to_string(),
                experience_level: ExperienceLevel::MidLevel,
            },
            matched_skills: vec![],
            match_percentage: 80,
        };

        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["experience_level"], "Mid-Level");
        assert_eq!(json["match_percentage"], 80);
    }
}
