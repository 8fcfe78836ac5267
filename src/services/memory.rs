use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use crate::models::{
    PersonSkill, Personnel, PersonnelRequest, PersonnelSkillDetail, ProficiencyLevel, Project,
    ProjectDetail, ProjectRequest, ProjectSkillInput, ProjectStatus, Skill, SkillRequest,
    SkillRequirement,
};
use crate::services::store::{DataStore, RecordStore, StoreError};

/// In-memory `DataStore` and `RecordStore` for tests, benchmarks and demos
///
/// Populate it through the `add_*`/`set_*` methods before sharing it, or
/// through the `RecordStore` writes once it is shared. Writes follow the
/// Postgres schema: unique emails and skill names, one row per (person,
/// skill), references checked, deletes cascading to the association tables.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    failure: Option<String>,
    read_calls: AtomicU64,
}

#[derive(Default)]
struct Tables {
    skills: BTreeMap<i64, Skill>,
    personnel: BTreeMap<i64, Personnel>,
    person_skills: BTreeMap<(i64, i64), ProficiencyLevel>,
    projects: BTreeMap<i64, StoredProject>,
}

struct StoredProject {
    project: Project,
    requirements: Vec<(i64, ProficiencyLevel)>,
}

impl StoredProject {
    fn placeholder(id: i64) -> Self {
        Self {
            project: Project {
                id,
                name: format!("Project {}", id),
                description: None,
                start_date: None,
                end_date: None,
                status: ProjectStatus::default(),
            },
            requirements: Vec::new(),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read and write fails with `StoreError::Unavailable`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn add_skill(&mut self, skill: Skill) -> &mut Self {
        self.tables.get_mut().skills.insert(skill.id, skill);
        self
    }

    pub fn add_personnel(&mut self, person: Personnel) -> &mut Self {
        self.tables.get_mut().personnel.insert(person.id, person);
        self
    }

    /// Setting a person's skill twice overwrites the earlier level
    pub fn set_person_skill(
        &mut self,
        personnel_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> &mut Self {
        self.tables
            .get_mut()
            .person_skills
            .insert((personnel_id, skill_id), level);
        self
    }

    /// Register a project with no requirements yet
    pub fn add_project(&mut self, project_id: i64) -> &mut Self {
        self.tables
            .get_mut()
            .projects
            .entry(project_id)
            .or_insert_with(|| StoredProject::placeholder(project_id));
        self
    }

    /// Add or replace one requirement of a project, registering the project if needed
    pub fn require_skill(
        &mut self,
        project_id: i64,
        skill_id: i64,
        min_level: ProficiencyLevel,
    ) -> &mut Self {
        let stored = self
            .tables
            .get_mut()
            .projects
            .entry(project_id)
            .or_insert_with(|| StoredProject::placeholder(project_id));
        match stored.requirements.iter_mut().find(|(id, _)| *id == skill_id) {
            Some(existing) => existing.1 = min_level,
            None => stored.requirements.push((skill_id, min_level)),
        }
        self
    }

    /// Number of `DataStore` reads served so far
    pub fn reads(&self) -> u64 {
        self.read_calls.load(Ordering::Relaxed)
    }

    fn begin_read(&self) -> Result<(), StoreError> {
        self.read_calls.fetch_add(1, Ordering::Relaxed);
        self.check_available()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Tables {
    fn requirements_of(&self, project_id: i64) -> Result<Vec<SkillRequirement>, StoreError> {
        let Some(stored) = self.projects.get(&project_id) else {
            return Ok(Vec::new());
        };

        let mut joined = stored
            .requirements
            .iter()
            .map(|&(skill_id, min_level)| -> Result<SkillRequirement, StoreError> {
                let skill = self.skills.get(&skill_id).ok_or_else(|| {
                    StoreError::InvalidData(format!(
                        "project {} requires unknown skill {}",
                        project_id, skill_id
                    ))
                })?;
                Ok(SkillRequirement {
                    skill_id,
                    skill_name: skill.name.clone(),
                    min_proficiency_level: min_level,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        joined.sort_by_key(|r| r.skill_id);
        Ok(joined)
    }

    fn check_unique_email(&self, email: &str, except: Option<i64>) -> Result<(), StoreError> {
        let taken = self
            .personnel
            .values()
            .any(|p| p.email == email && Some(p.id) != except);
        if taken {
            return Err(StoreError::Conflict(format!("email {} already in use", email)));
        }
        Ok(())
    }

    fn check_unique_skill_name(&self, name: &str, except: Option<i64>) -> Result<(), StoreError> {
        let taken = self
            .skills
            .values()
            .any(|s| s.name == name && Some(s.id) != except);
        if taken {
            return Err(StoreError::Conflict(format!("skill {} already exists", name)));
        }
        Ok(())
    }

    /// Resolve requested project skills, refusing unknown or repeated ids
    fn resolve_requirements(
        &self,
        inputs: &[ProjectSkillInput],
    ) -> Result<Vec<(i64, ProficiencyLevel)>, StoreError> {
        let mut requirements: Vec<(i64, ProficiencyLevel)> = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !self.skills.contains_key(&input.skill_id) {
                return Err(StoreError::Rejected(format!(
                    "skill {} does not exist",
                    input.skill_id
                )));
            }
            if requirements.iter().any(|(id, _)| *id == input.skill_id) {
                return Err(StoreError::Conflict(format!(
                    "skill {} listed twice",
                    input.skill_id
                )));
            }
            requirements.push((input.skill_id, input.min_proficiency_level));
        }
        Ok(requirements)
    }
}

fn next_id<V>(map: &BTreeMap<i64, V>) -> i64 {
    map.keys().next_back().map_or(1, |id| id + 1)
}

fn project_from_request(id: i64, req: &ProjectRequest) -> Project {
    Project {
        id,
        name: req.name.clone(),
        description: req.description.clone(),
        start_date: req.start_date,
        end_date: req.end_date,
        status: req.status,
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn project_exists(&self, project_id: i64) -> Result<bool, StoreError> {
        self.begin_read()?;
        Ok(self.tables.read().await.projects.contains_key(&project_id))
    }

    async fn get_requirements_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<SkillRequirement>, StoreError> {
        self.begin_read()?;
        self.tables.read().await.requirements_of(project_id)
    }

    async fn get_all_personnel(&self) -> Result<Vec<Personnel>, StoreError> {
        self.begin_read()?;
        Ok(self.tables.read().await.personnel.values().cloned().collect())
    }

    async fn get_skills_for_person(&self, personnel_id: i64) -> Result<Vec<PersonSkill>, StoreError> {
        self.begin_read()?;
        Ok(self
            .tables
            .read()
            .await
            .person_skills
            .range((personnel_id, i64::MIN)..=(personnel_id, i64::MAX))
            .map(|(&(personnel_id, skill_id), &proficiency_level)| PersonSkill {
                personnel_id,
                skill_id,
                proficiency_level,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.begin_read()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_personnel(&self) -> Result<Vec<Personnel>, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.personnel.values().cloned().collect())
    }

    async fn get_personnel(&self, id: i64) -> Result<Option<Personnel>, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.personnel.get(&id).cloned())
    }

    async fn create_personnel(&self, req: &PersonnelRequest) -> Result<Personnel, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.check_unique_email(&req.email, None)?;

        let person = Personnel {
            id: next_id(&tables.personnel),
            name: req.name.clone(),
            email: req.email.clone(),
            role: req.role.clone(),
            experience_level: req.experience_level,
        };
        tables.personnel.insert(person.id, person.clone());
        Ok(person)
    }

    async fn update_personnel(&self, id: i64, req: &PersonnelRequest) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.personnel.contains_key(&id) {
            return Ok(false);
        }
        tables.check_unique_email(&req.email, Some(id))?;

        tables.personnel.insert(
            id,
            Personnel {
                id,
                name: req.name.clone(),
                email: req.email.clone(),
                role: req.role.clone(),
                experience_level: req.experience_level,
            },
        );
        Ok(true)
    }

    async fn delete_personnel(&self, id: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.personnel.remove(&id).is_none() {
            return Ok(false);
        }
        tables.person_skills.retain(|&(personnel_id, _), _| personnel_id != id);
        Ok(true)
    }

    async fn list_personnel_skills(
        &self,
        personnel_id: i64,
    ) -> Result<Vec<PersonnelSkillDetail>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .person_skills
            .range((personnel_id, i64::MIN)..=(personnel_id, i64::MAX))
            .filter_map(|(&(_, skill_id), &proficiency_level)| {
                let skill = tables.skills.get(&skill_id)?;
                Some(PersonnelSkillDetail {
                    skill_id,
                    name: skill.name.clone(),
                    category: skill.category.clone(),
                    proficiency_level,
                })
            })
            .collect())
    }

    async fn assign_skill(
        &self,
        personnel_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.personnel.contains_key(&personnel_id) {
            return Err(StoreError::Rejected(format!("personnel {} does not exist", personnel_id)));
        }
        if !tables.skills.contains_key(&skill_id) {
            return Err(StoreError::Rejected(format!("skill {} does not exist", skill_id)));
        }
        if tables.person_skills.contains_key(&(personnel_id, skill_id)) {
            return Err(StoreError::Conflict(format!(
                "personnel {} already has skill {}",
                personnel_id, skill_id
            )));
        }
        tables.person_skills.insert((personnel_id, skill_id), level);
        Ok(())
    }

    async fn update_skill_proficiency(
        &self,
        personnel_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.person_skills.get_mut(&(personnel_id, skill_id)) {
            Some(existing) => {
                *existing = level;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_skill(&self, personnel_id: i64, skill_id: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        Ok(tables.person_skills.remove(&(personnel_id, skill_id)).is_some())
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.skills.values().cloned().collect())
    }

    async fn get_skill(&self, id: i64) -> Result<Option<Skill>, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.skills.get(&id).cloned())
    }

    async fn create_skill(&self, req: &SkillRequest) -> Result<Skill, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.check_unique_skill_name(&req.name, None)?;

        let skill = Skill {
            id: next_id(&tables.skills),
            name: req.name.clone(),
            category: req.category.clone(),
            description: req.description.clone(),
        };
        tables.skills.insert(skill.id, skill.clone());
        Ok(skill)
    }

    async fn update_skill(&self, id: i64, req: &SkillRequest) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.skills.contains_key(&id) {
            return Ok(false);
        }
        tables.check_unique_skill_name(&req.name, Some(id))?;

        tables.skills.insert(
            id,
            Skill {
                id,
                name: req.name.clone(),
                category: req.category.clone(),
                description: req.description.clone(),
            },
        );
        Ok(true)
    }

    async fn delete_skill(&self, id: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.skills.remove(&id).is_none() {
            return Ok(false);
        }
        tables.person_skills.retain(|&(_, skill_id), _| skill_id != id);
        for stored in tables.projects.values_mut() {
            stored.requirements.retain(|&(skill_id, _)| skill_id != id);
        }
        Ok(true)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .await
            .projects
            .values()
            .map(|stored| stored.project.clone())
            .collect())
    }

    async fn get_project(&self, id: i64) -> Result<Option<ProjectDetail>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let Some(stored) = tables.projects.get(&id) else {
            return Ok(None);
        };

        Ok(Some(ProjectDetail {
            project: stored.project.clone(),
            skills: tables.requirements_of(id)?,
        }))
    }

    async fn create_project(&self, req: &ProjectRequest) -> Result<Project, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let requirements = tables.resolve_requirements(req.skills.as_deref().unwrap_or_default())?;

        let project = project_from_request(next_id(&tables.projects), req);
        tables.projects.insert(
            project.id,
            StoredProject {
                project: project.clone(),
                requirements,
            },
        );
        Ok(project)
    }

    async fn update_project(&self, id: i64, req: &ProjectRequest) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&id) {
            return Ok(false);
        }
        let replacement = req
            .skills
            .as_deref()
            .map(|inputs| tables.resolve_requirements(inputs))
            .transpose()?;

        if let Some(stored) = tables.projects.get_mut(&id) {
            stored.project = project_from_request(id, req);
            if let Some(requirements) = replacement {
                stored.requirements = requirements;
            }
        }
        Ok(true)
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.tables.write().await.projects.remove(&id).is_some())
    }
}
