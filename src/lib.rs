//! Skill Match - personnel, skill and project tracking with skill-based staffing
//!
//! This library provides the matching engine that ranks personnel against a
//! project's required skills, the data-store capability it reads through,
//! and the REST layer that exposes both.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_matches, match_percentage, MatchOutcome, MatchResult};
pub use models::{PersonnelMatch, ProficiencyLevel, RosterEntry, SkillRequirement};
pub use services::{
    match_project_to_personnel, DataStore, InMemoryStore, MatchError, RecordStore, StoreError,
};
