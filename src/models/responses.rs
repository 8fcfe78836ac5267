use serde::{Deserialize, Serialize};
use crate::core::{MatchOutcome, MatchResult};
use crate::models::domain::{PersonnelMatch, SkillRequirement};

/// Message sent alongside an empty match list when the project has no requirements
pub const NO_REQUIREMENTS_MESSAGE: &str = "No skills required for this project";

/// Response for the project matching endpoint
///
/// `message` is only present when the project defines no requirements, so
/// clients can tell "nothing to match against" apart from "nobody qualified".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<PersonnelMatch>,
    pub required_skills: Vec<SkillRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<MatchResult> for MatchResponse {
    fn from(result: MatchResult) -> Self {
        let message = match result.outcome {
            MatchOutcome::NoRequirements => Some(NO_REQUIREMENTS_MESSAGE.to_string()),
            MatchOutcome::Evaluated => None,
        };

        Self {
            matches: result.matches,
            required_skills: result.required_skills,
            message,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Plain acknowledgement for updates and deletes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
