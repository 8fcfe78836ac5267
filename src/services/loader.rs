use std::collections::HashMap;
use crate::models::{PersonSkill, RosterEntry, SkillRequirement};
use crate::services::store::{DataStore, StoreError};

/// Load the skill requirements of a project
///
/// Does not check that the project exists: a missing project and a project
/// without requirements both come back empty.
pub async fn load_requirements(
    store: &dyn DataStore,
    project_id: i64,
) -> Result<Vec<SkillRequirement>, StoreError> {
    let requirements = store.get_requirements_for_project(project_id).await?;

    tracing::debug!(
        "Project {} has {} skill requirements",
        project_id,
        requirements.len()
    );

    Ok(requirements)
}

/// Load every person with their skills attached
///
/// Person skills are fetched in one batch and grouped in memory. Roster order
/// follows `get_all_personnel`, which is what ties are broken by later.
pub async fn load_roster(store: &dyn DataStore) -> Result<Vec<RosterEntry>, StoreError> {
    let personnel = store.get_all_personnel().await?;
    let person_skills = store.get_all_person_skills().await?;

    let mut by_person: HashMap<i64, Vec<PersonSkill>> = HashMap::with_capacity(personnel.len());
    for skill in person_skills {
        by_person.entry(skill.personnel_id).or_default().push(skill);
    }

    let roster: Vec<RosterEntry> = personnel
        .into_iter()
        .map(|person| {
            let skills = by_person.remove(&person.id).unwrap_or_default();
            RosterEntry::new(person, skills)
        })
        .collect();

    tracing::debug!(
        "Loaded roster of {} personnel from {} store",
        roster.len(),
        store.backend_tag()
    );

    Ok(roster)
}
