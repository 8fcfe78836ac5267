use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::config::DatabaseSettings;
use crate::models::{
    PersonSkill, Personnel, PersonnelRequest, PersonnelSkillDetail, ProficiencyLevel, Project,
    ProjectDetail, ProjectRequest, ProjectSkillInput, Skill, SkillRequest, SkillRequirement,
};
use crate::services::store::{DataStore, RecordStore, StoreError};

/// PostgreSQL client for personnel, skills and projects
///
/// Implements `DataStore` for the matching engine and `RecordStore` for the
/// REST API. Project writes that touch the requirement table run inside a
/// single transaction. Integrity violations surface as
/// `StoreError::Conflict` or `StoreError::Rejected`.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings, running migrations if enabled
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!(
            "Connecting to PostgreSQL (max: {}, min: {} connections)",
            settings.max_connections,
            settings.min_connections
        );

        let client = Self::new(
            &settings.url,
            settings.max_connections,
            settings.min_connections,
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await?;

        if settings.run_migrations {
            client.migrate().await?;
        }

        Ok(client)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PostgresClient {
    // ---- personnel ----

    async fn list_personnel(&self) -> Result<Vec<Personnel>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, email, role, experience_level FROM personnel ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(personnel_from_row).collect()
    }

    async fn get_personnel(&self, id: i64) -> Result<Option<Personnel>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, email, role, experience_level FROM personnel WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(personnel_from_row).transpose()
    }

    async fn create_personnel(&self, req: &PersonnelRequest) -> Result<Personnel, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO personnel (name, email, role, experience_level)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.role)
        .bind(req.experience_level)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created personnel {} ({})", id, req.email);

        Ok(Personnel {
            id,
            name: req.name.clone(),
            email: req.email.clone(),
            role: req.role.clone(),
            experience_level: req.experience_level,
        })
    }

    async fn update_personnel(&self, id: i64, req: &PersonnelRequest) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE personnel
            SET name = $1, email = $2, role = $3, experience_level = $4
            WHERE id = $5
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.role)
        .bind(req.experience_level)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_personnel(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM personnel WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ---- personnel skills ----

    async fn list_personnel_skills(
        &self,
        personnel_id: i64,
    ) -> Result<Vec<PersonnelSkillDetail>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.category, ps.proficiency_level
            FROM skills s
            JOIN personnel_skills ps ON s.id = ps.skill_id
            WHERE ps.personnel_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(personnel_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<PersonnelSkillDetail, StoreError> {
                Ok(PersonnelSkillDetail {
                    skill_id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    category: row.try_get("category")?,
                    proficiency_level: level_from_row(row, "proficiency_level")?,
                })
            })
            .collect()
    }

    async fn assign_skill(
        &self,
        personnel_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO personnel_skills (personnel_id, skill_id, proficiency_level)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(personnel_id)
        .bind(skill_id)
        .bind(i16::from(level))
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            "Assigned skill {} to personnel {} at level {}",
            skill_id,
            personnel_id,
            level
        );

        Ok(())
    }

    async fn update_skill_proficiency(
        &self,
        personnel_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE personnel_skills
            SET proficiency_level = $1
            WHERE personnel_id = $2 AND skill_id = $3
            "#,
        )
        .bind(i16::from(level))
        .bind(personnel_id)
        .bind(skill_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_skill(&self, personnel_id: i64, skill_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "DELETE FROM personnel_skills WHERE personnel_id = $1 AND skill_id = $2",
        )
        .bind(personnel_id)
        .bind(skill_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // ---- skills ----

    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError> {
        let rows = sqlx::query("SELECT id, name, category, description FROM skills ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(skill_from_row).collect()
    }

    async fn get_skill(&self, id: i64) -> Result<Option<Skill>, StoreError> {
        let row = sqlx::query("SELECT id, name, category, description FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(skill_from_row).transpose()
    }

    async fn create_skill(&self, req: &SkillRequest) -> Result<Skill, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO skills (name, category, description) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&req.name)
        .bind(&req.category)
        .bind(&req.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(Skill {
            id,
            name: req.name.clone(),
            category: req.category.clone(),
            description: req.description.clone(),
        })
    }

    async fn update_skill(&self, id: i64, req: &SkillRequest) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE skills SET name = $1, category = $2, description = $3 WHERE id = $4",
        )
        .bind(&req.name)
        .bind(&req.category)
        .bind(&req.description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_skill(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ---- projects ----

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, description, start_date, end_date, status FROM projects ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(project_from_row).collect()
    }

    async fn get_project(&self, id: i64) -> Result<Option<ProjectDetail>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, description, start_date, end_date, status FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let project = project_from_row(&row)?;
        let skills = self.get_requirements_for_project(project.id).await?;

        Ok(Some(ProjectDetail { project, skills }))
    }

    async fn create_project(&self, req: &ProjectRequest) -> Result<Project, StoreError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO projects (name, description, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.status)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(skills) = req.skills.as_deref() {
            insert_project_skills(&mut tx, id, skills).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Created project {} with {} skill requirements",
            id,
            req.skills.as_ref().map_or(0, Vec::len)
        );

        Ok(Project {
            id,
            name: req.name.clone(),
            description: req.description.clone(),
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status,
        })
    }

    async fn update_project(&self, id: i64, req: &ProjectRequest) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $1, description = $2, start_date = $3, end_date = $4, status = $5
            WHERE id = $6
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.status)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(skills) = req.skills.as_deref() {
            sqlx::query("DELETE FROM project_skills WHERE project_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_project_skills(&mut tx, id, skills).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl DataStore for PostgresClient {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn project_exists(&self, project_id: i64) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
            .bind(project_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn get_requirements_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<SkillRequirement>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT ps.skill_id, s.name AS skill_name, ps.min_proficiency_level
            FROM project_skills ps
            JOIN skills s ON ps.skill_id = s.id
            WHERE ps.project_id = $1
            ORDER BY ps.skill_id
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<SkillRequirement, StoreError> {
                Ok(SkillRequirement {
                    skill_id: row.try_get("skill_id")?,
                    skill_name: row.try_get("skill_name")?,
                    min_proficiency_level: level_from_row(row, "min_proficiency_level")?,
                })
            })
            .collect()
    }

    async fn get_all_personnel(&self) -> Result<Vec<Personnel>, StoreError> {
        self.list_personnel().await
    }

    async fn get_skills_for_person(&self, personnel_id: i64) -> Result<Vec<PersonSkill>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT personnel_id, skill_id, proficiency_level
            FROM personnel_skills
            WHERE personnel_id = $1
            ORDER BY skill_id
            "#,
        )
        .bind(personnel_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(person_skill_from_row).collect()
    }

    async fn get_all_person_skills(&self) -> Result<Vec<PersonSkill>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT personnel_id, skill_id, proficiency_level
            FROM personnel_skills
            ORDER BY personnel_id, skill_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(person_skill_from_row).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}

async fn insert_project_skills(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: i64,
    skills: &[ProjectSkillInput],
) -> Result<(), StoreError> {
    if skills.is_empty() {
        return Ok(());
    }

    let skill_ids: Vec<i64> = skills.iter().map(|s| s.skill_id).collect();
    let levels: Vec<i16> = skills.iter().map(|s| i16::from(s.min_proficiency_level)).collect();

    sqlx::query(
        r#"
        INSERT INTO project_skills (project_id, skill_id, min_proficiency_level)
        SELECT $1, skill_id, level
        FROM UNNEST($2::BIGINT[], $3::SMALLINT[]) AS t(skill_id, level)
        "#,
    )
    .bind(project_id)
    .bind(&skill_ids)
    .bind(&levels)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn level_from_row(row: &PgRow, column: &str) -> Result<ProficiencyLevel, StoreError> {
    let raw: i16 = row.try_get(column)?;
    Ok(ProficiencyLevel::try_from(raw)?)
}

fn personnel_from_row(row: &PgRow) -> Result<Personnel, StoreError> {
    Ok(Personnel {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        role: row.try_get("role")?,
        experience_level: row.try_get("experience_level")?,
    })
}

fn person_skill_from_row(row: &PgRow) -> Result<PersonSkill, StoreError> {
    Ok(PersonSkill {
        personnel_id: row.try_get("personnel_id")?,
        skill_id: row.try_get("skill_id")?,
        proficiency_level: level_from_row(row, "proficiency_level")?,
    })
}

fn skill_from_row(row: &PgRow) -> Result<Skill, StoreError> {
    Ok(Skill {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        description: row.try_get("description")?,
    })
}

fn project_from_row(row: &PgRow) -> Result<Project, StoreError> {
    Ok(Project {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        status: row.try_get("status")?,
    })
}
