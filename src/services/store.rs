use async_trait::async_trait;
use thiserror::Error;
use crate::models::{
    InvalidProficiency, PersonSkill, Personnel, PersonnelRequest, PersonnelSkillDetail,
    ProficiencyLevel, Project, ProjectDetail, ProjectRequest, Skill, SkillRequest,
    SkillRequirement,
};

/// Errors that can occur when reading from or writing to a data store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A write collided with a unique key
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A write referenced a missing record or broke a column constraint
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if let Some(classified) = classify_constraint(db.code().as_deref(), db.message()) {
                return classified;
            }
        }
        StoreError::SqlxError(err)
    }
}

impl From<InvalidProficiency> for StoreError {
    fn from(err: InvalidProficiency) -> Self {
        StoreError::InvalidData(err.to_string())
    }
}

/// Map a Postgres SQLSTATE integrity-violation code to a store error
///
/// 23505 unique_violation, 23503 foreign_key_violation, 23514 check_violation.
fn classify_constraint(code: Option<&str>, message: &str) -> Option<StoreError> {
    match code? {
        "23505" => Some(StoreError::Conflict(message.to_string())),
        "23503" | "23514" => Some(StoreError::Rejected(message.to_string())),
        _ => None,
    }
}

/// Read access to personnel, skills and project requirements
///
/// This is the capability the matching engine is handed; nothing in the
/// engine reaches for a global connection. Implementations must uphold that
/// a (personnel, skill) pair appears at most once in the person-skill data.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Short label for logs and health output
    fn backend_tag(&self) -> &'static str;

    async fn project_exists(&self, project_id: i64) -> Result<bool, StoreError>;

    /// Requirements of a project; empty for a project without any
    async fn get_requirements_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<SkillRequirement>, StoreError>;

    /// Every person, ordered by ascending id
    async fn get_all_personnel(&self) -> Result<Vec<Personnel>, StoreError>;

    async fn get_skills_for_person(&self, personnel_id: i64) -> Result<Vec<PersonSkill>, StoreError>;

    /// Every person-skill pair in the store
    ///
    /// The default issues one `get_skills_for_person` per person. Backends
    /// that can answer in a single round trip should override it.
    async fn get_all_person_skills(&self) -> Result<Vec<PersonSkill>, StoreError> {
        let mut all = Vec::new();
        for person in self.get_all_personnel().await? {
            all.extend(self.get_skills_for_person(person.id).await?);
        }
        Ok(all)
    }

    /// Cheap liveness probe
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create, read, update and delete for the records behind the REST API
///
/// Updates and deletes return `Ok(false)` when the id does not exist.
/// Duplicate unique keys fail with `StoreError::Conflict`, references to
/// missing records with `StoreError::Rejected`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_personnel(&self) -> Result<Vec<Personnel>, StoreError>;
    async fn get_personnel(&self, id: i64) -> Result<Option<Personnel>, StoreError>;
    async fn create_personnel(&self, req: &PersonnelRequest) -> Result<Personnel, StoreError>;
    async fn update_personnel(&self, id: i64, req: &PersonnelRequest) -> Result<bool, StoreError>;
    async fn delete_personnel(&self, id: i64) -> Result<bool, StoreError>;

    async fn list_personnel_skills(
        &self,
        personnel_id: i64,
    ) -> Result<Vec<PersonnelSkillDetail>, StoreError>;
    async fn assign_skill(
        &self,
        personnel_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<(), StoreError>;
    async fn update_skill_proficiency(
        &self,
        personnel_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<bool, StoreError>;
    async fn remove_skill(&self, personnel_id: i64, skill_id: i64) -> Result<bool, StoreError>;

    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError>;
    async fn get_skill(&self, id: i64) -> Result<Option<Skill>, StoreError>;
    async fn create_skill(&self, req: &SkillRequest) -> Result<Skill, StoreError>;
    async fn update_skill(&self, id: i64, req: &SkillRequest) -> Result<bool, StoreError>;
    async fn delete_skill(&self, id: i64) -> Result<bool, StoreError>;

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;
    /// Project with its requirements
    async fn get_project(&self, id: i64) -> Result<Option<ProjectDetail>, StoreError>;
    /// Insert the project and its requirements atomically
    async fn create_project(&self, req: &ProjectRequest) -> Result<Project, StoreError>;
    /// Update the project and, when `skills` is given, replace its requirements
    ///
    /// `skills: None` keeps the current requirements; `Some(vec![])` clears
    /// them. Nothing is written when the id does not exist.
    async fn update_project(&self, id: i64, req: &ProjectRequest) -> Result<bool, StoreError>;
    async fn delete_project(&self, id: i64) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = classify_constraint(Some("23505"), "duplicate key value").unwrap();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_foreign_key_and_check_violations_are_rejected() {
        assert!(matches!(
            classify_constraint(Some("23503"), "violates foreign key constraint"),
            Some(StoreError::Rejected(_))
        ));
        assert!(matches!(
            classify_constraint(Some("23514"), "violates check constraint"),
            Some(StoreError::Rejected(_))
        ));
    }

    #[test]
    fn test_other_codes_stay_unclassified() {
        assert!(classify_constraint(Some("40001"), "serialization failure").is_none());
        assert!(classify_constraint(None, "no code").is_none());
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::SqlxError(sqlx::Error::RowNotFound)));
    }
}
