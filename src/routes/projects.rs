use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{MessageResponse, ProjectRequest};
use crate::routes::{not_found, store_failure, validation_failed};
use crate::services::RecordStore;

/// Configure project routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/projects", web::get().to(list_projects))
        .route("/projects", web::post().to(create_project))
        .route("/projects/{id}", web::get().to(get_project))
        .route("/projects/{id}", web::put().to(update_project))
        .route("/projects/{id}", web::delete().to(delete_project));
}

async fn list_projects(store: web::Data<dyn RecordStore>) -> impl Responder {
    match store.list_projects().await {
        Ok(projects) => HttpResponse::Ok().json(projects),
        Err(e) => store_failure("list projects", &e),
    }
}

/// Create project endpoint
///
/// POST /api/projects
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "description": "string",
///   "start_date": "2024-01-01",
///   "end_date": "2024-06-30",
///   "status": "Planning|Active|Completed",
///   "skills": [{ "skill_id": 1, "min_proficiency_level": 3 }]
/// }
/// ```
async fn create_project(
    store: web::Data<dyn RecordStore>,
    req: web::Json<ProjectRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match store.create_project(&req).await {
        Ok(project) => HttpResponse::Created().json(project),
        Err(e) => store_failure("create project", &e),
    }
}

/// Project with its required skills
async fn get_project(store: web::Data<dyn RecordStore>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match store.get_project(id).await {
        Ok(Some(project)) => HttpResponse::Ok().json(project),
        Ok(None) => not_found("Project", id),
        Err(e) => store_failure("fetch project", &e),
    }
}

/// Update project endpoint
///
/// PUT /api/projects/{id}
///
/// Same body as create. Omitting `skills` keeps the current requirements;
/// sending an empty list removes them all.
async fn update_project(
    store: web::Data<dyn RecordStore>,
    path: web::Path<i64>,
    req: web::Json<ProjectRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let id = path.into_inner();
    match store.update_project(id, &req).await {
        Ok(true) => {
            tracing::info!("Updated project {}", id);
            HttpResponse::Ok().json(MessageResponse::new("Project updated"))
        }
        Ok(false) => not_found("Project", id),
        Err(e) => store_failure("update project", &e),
    }
}

async fn delete_project(store: web::Data<dyn RecordStore>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match store.delete_project(id).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Project deleted")),
        Ok(false) => not_found("Project", id),
        Err(e) => store_failure("delete project", &e),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use crate::models::{ExperienceLevel, Personnel, ProficiencyLevel, Project, ProjectDetail, ProjectStatus, Skill};
    use crate::routes::{configure_routes, test_support::app_data};
    use crate::services::InMemoryStore;

    fn seeded() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for (id, name) in [(1, "Python"), (2, "Airflow")] {
            store.add_skill(Skill {
                id,
                name: name.to_string(),
                category: "Data".to_string(),
                description: None,
            });
        }
        store
            .add_personnel(Personnel {
                id: 1,
                name: "Noor".to_string(),
                email: "noor@example.com".to_string(),
                role: "Data Engineer".to_string(),
                experience_level: ExperienceLevel::Senior,
            })
            .set_person_skill(1, 1, ProficiencyLevel::EXPERT)
            .set_person_skill(1, 2, ProficiencyLevel::new(3).unwrap());
        store
    }

    #[actix_web::test]
    async fn test_create_project_with_requirements() {
        let (data_store, record_store) = app_data(seeded());
        let app = test::init_service(
            App::new()
                .app_data(data_store)
                .app_data(record_store)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(json!({
                "name": "Pipeline rewrite",
                "start_date": "2024-01-01",
                "end_date": "2024-06-30",
                "status": "Active",
                "skills": [
                    { "skill_id": 2, "min_proficiency_level": 3 },
                    { "skill_id": 1, "min_proficiency_level": 4 }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Project = test::read_body_json(resp).await;
        assert_eq!(created.status, ProjectStatus::Active);

        let req = test::TestRequest::get()
            .uri(&format!("/api/projects/{}", created.id))
            .to_request();
        let detail: ProjectDetail = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail.project, created);
        let names: Vec<&str> = detail.skills.iter().map(|s| s.skill_name.as_str()).collect();
        assert_eq!(names, vec!["Python", "Airflow"]);

        let req = test::TestRequest::get()
            .uri(&format!("/api/matching/project/{}", created.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        // (5 + 3) / 10
        assert_eq!(body["matches"][0]["match_percentage"], 80);
    }

    #[actix_web::test]
    async fn test_create_project_rejections() {
        let (data_store, record_store) = app_data(seeded());
        let app = test::init_service(
            App::new()
                .app_data(data_store)
                .app_data(record_store)
                .configure(configure_routes),
        )
        .await;

        // Unknown skill id
        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(json!({ "name": "Ghost", "skills": [{ "skill_id": 9, "min_proficiency_level": 1 }] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        // End before start
        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(json!({ "name": "Backwards", "start_date": "2024-05-01", "end_date": "2024-04-01" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/projects").to_request();
        let projects: Vec<Project> = test::call_and_read_body_json(&app, req).await;
        assert!(projects.is_empty());
    }

    #[actix_web::test]
    async fn test_update_keeps_requirements_unless_skills_given() {
        let mut store = seeded();
        store
            .require_skill(7, 1, ProficiencyLevel::new(2).unwrap())
            .require_skill(7, 2, ProficiencyLevel::new(2).unwrap());
        let (data_store, record_store) = app_data(store);
        let app = test::init_service(
            App::new()
                .app_data(data_store)
                .app_data(record_store)
                .configure(configure_routes),
        )
        .await;

        // No "skills" key: requirements stay
        let req = test::TestRequest::put()
            .uri("/api/projects/7")
            .set_json(json!({ "name": "Renamed", "status": "Completed" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/projects/7").to_request();
        let detail: ProjectDetail = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail.project.name, "Renamed");
        assert_eq!(detail.project.status, ProjectStatus::Completed);
        assert_eq!(detail.skills.len(), 2);

        // Empty list: requirements cleared
        let req = test::TestRequest::put()
            .uri("/api/projects/7")
            .set_json(json!({ "name": "Renamed", "skills": [] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/projects/7").to_request();
        let detail: ProjectDetail = test::call_and_read_body_json(&app, req).await;
        assert!(detail.skills.is_empty());

        let req = test::TestRequest::get().uri("/api/matching/project/7").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "No skills required for this project");
    }

    #[actix_web::test]
    async fn test_missing_project_is_404() {
        let (data_store, record_store) = app_data(seeded());
        let app = test::init_service(
            App::new()
                .app_data(data_store)
                .app_data(record_store)
                .configure(configure_routes),
        )
        .await;

        for req in [
            test::TestRequest::get().uri("/api/projects/404").to_request(),
            test::TestRequest::delete().uri("/api/projects/404").to_request(),
            test::TestRequest::put()
                .uri("/api/projects/404")
                .set_json(json!({ "name": "Nowhere" }))
                .to_request(),
        ] {
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        }
    }
}
