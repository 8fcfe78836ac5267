use crate::models::{MatchedSkill, RosterEntry, SkillRequirement};

/// Requirements a person satisfied and the sum of their levels across them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualification {
    pub matched_skills: Vec<MatchedSkill>,
    pub total_level: u32,
}

/// Check a roster entry against every requirement, all or nothing
///
/// Returns `None` as soon as one requirement is missing or below its
/// minimum; remaining requirements are not evaluated. A qualifying person
/// gets one `MatchedSkill` per requirement, in requirement order.
#[inline]
pub fn qualify(entry: &RosterEntry, requirements: &[SkillRequirement]) -> Option<Qualification> {
    let mut matched_skills = Vec::with_capacity(requirements.len());
    let mut total_level = 0u32;

    for requirement in requirements {
        let actual = entry.level_for(requirement.skill_id)?;
        if actual < requirement.min_proficiency_level {
            return None;
        }

        total_level += u32::from(actual.get());
        matched_skills.push(MatchedSkill {
            skill_name: requirement.skill_name.clone(),
            required_level: requirement.min_proficiency_level,
            actual_level: actual,
        });
    }

    Some(Qualification {
        matched_skills,
        total_level,
    })
}
