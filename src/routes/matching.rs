use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, HealthResponse, MatchResponse};
use crate::routes::store_failure;
use crate::services::{match_project_to_personnel, DataStore, MatchError};

/// Configure matching and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/project/{project_id}", web::get().to(match_project));
}

/// Health check endpoint
async fn health_check(store: web::Data<dyn DataStore>) -> impl Responder {
    let status = match store.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Health check against {} store failed: {}", store.backend_tag(), e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: store.backend_tag().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match personnel to a project
///
/// GET /api/matching/project/{project_id}
///
/// Response body:
/// ```json
/// {
///   "matches": [{ "id": 1, "name": "...", "matched_skills": [...], "match_percentage": 90 }],
///   "required_skills": [{ "skill_id": 1, "skill_name": "...", "min_proficiency_level": 3 }],
///   "message": "No skills required for this project"
/// }
/// ```
/// `message` only appears when the project has no requirements.
async fn match_project(
    store: web::Data<dyn DataStore>,
    path: web::Path<i64>,
) -> impl Responder {
    let project_id = path.into_inner();

    tracing::info!("Matching personnel to project {}", project_id);

    match match_project_to_personnel(store.get_ref(), project_id).await {
        Ok(result) => HttpResponse::Ok().json(MatchResponse::from(result)),
        Err(MatchError::ProjectNotFound(id)) => {
            tracing::info!("Project {} not found for matching", id);
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Project not found".to_string(),
                message: format!("No project with id {}", id),
                status_code: 404,
            })
        }
        Err(MatchError::Store(e)) => {
            store_failure(&format!("match personnel to project {}", project_id), &e)
        }
    }
}
