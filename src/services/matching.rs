use thiserror::Error;
use crate::core::{compute_matches, MatchResult};
use crate::services::loader::{load_requirements, load_roster};
use crate::services::store::{DataStore, StoreError};

/// Errors that can occur while matching a project to personnel
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Project {0} not found")]
    ProjectNotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Match the whole roster against one project's requirements
///
/// Unknown projects are rejected up front so that callers can tell them
/// apart from projects that simply have no requirements. With no
/// requirements the roster is never loaded.
pub async fn match_project_to_personnel(
    store: &dyn DataStore,
    project_id: i64,
) -> Result<MatchResult, MatchError> {
    if !store.project_exists(project_id).await? {
        return Err(MatchError::ProjectNotFound(project_id));
    }

    let requirements = load_requirements(store, project_id).await?;
    if requirements.is_empty() {
        tracing::info!("Project {} has no skill requirements, skipping roster", project_id);
        return Ok(MatchResult::no_requirements());
    }

    let roster = load_roster(store).await?;
    let result = compute_matches(requirements, roster);

    tracing::info!(
        "Project {}: {} of {} personnel meet all {} requirements",
        project_id,
        result.matches.len(),
        result.total_candidates,
        result.required_skills.len()
    );

    Ok(result)
}
