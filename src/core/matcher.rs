use crate::core::{qualification::qualify, scoring::match_percentage};
use crate::models::{PersonnelMatch, RosterEntry, SkillRequirement};

/// How a matching run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The project defines no requirements; the roster was not evaluated
    NoRequirements,
    /// Every roster entry was checked against the requirements
    Evaluated,
}

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: Vec<PersonnelMatch>,
    pub required_skills: Vec<SkillRequirement>,
    pub outcome: MatchOutcome,
    pub total_candidates: usize,
}

impl MatchResult {
    pub fn no_requirements() -> Self {
        Self {
            matches: Vec::new(),
            required_skills: Vec::new(),
            outcome: MatchOutcome::NoRequirements,
            total_candidates: 0,
        }
    }
}

/// Rank the roster against a project's requirements
///
/// # Pipeline Stages
/// 1. Short-circuit when there are no requirements
/// 2. All-or-nothing qualification per person
/// 3. Percentage scoring of qualified people
/// 4. Stable sort by percentage, highest first
///
/// Ties keep roster order, so identical inputs always give identical output.
/// People who miss any requirement are left out rather than scored zero.
pub fn compute_matches(requirements: Vec<SkillRequirement>, roster: Vec<RosterEntry>) -> MatchResult {
    if requirements.is_empty() {
        return MatchResult::no_requirements();
    }

    let total_candidates = roster.len();

    let mut matches: Vec<PersonnelMatch> = roster
        .into_iter()
        .filter_map(|entry| {
            let qualification = qualify(&entry, &requirements)?;
            Some(PersonnelMatch {
                personnel: entry.personnel,
                match_percentage: match_percentage(qualification.total_level, requirements.len()),
                matched_skills: qualification.matched_skills,
            })
        })
        .collect();

    // Vec::sort_by is stable
    matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));

    MatchResult {
        matches,
        required_skills: requirements,
        outcome: MatchOutcome::Evaluated,
        total_candidates,
    }
}
