// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ExperienceLevel, InvalidProficiency, MatchedSkill, PersonSkill, Personnel, PersonnelMatch,
    PersonnelSkillDetail, ProficiencyLevel, Project, ProjectDetail, ProjectStatus, RosterEntry,
    Skill, SkillRequirement, MAX_PROFICIENCY, MIN_PROFICIENCY,
};
pub use requests::{
    AssignSkillRequest, PersonnelRequest, ProjectRequest, ProjectSkillInput, SkillRequest,
    UpdateProficiencyRequest,
};
pub use responses::{ErrorResponse, HealthResponse, MatchResponse, MessageResponse, NO_REQUIREMENTS_MESSAGE};
