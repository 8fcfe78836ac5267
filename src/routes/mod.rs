// Route exports
pub mod matching;
pub mod personnel;
pub mod projects;
pub mod skills;

use actix_web::{web, HttpResponse};
use validator::ValidationErrors;
use crate::models::ErrorResponse;
use crate::services::StoreError;

/// Mount every route under `/api`
///
/// Expects `web::Data<dyn DataStore>` for matching and health, and
/// `web::Data<dyn RecordStore>` for the CRUD handlers.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(matching::configure)
            .configure(personnel::configure)
            .configure(skills::configure)
            .configure(projects::configure),
    );
}

pub(crate) fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

pub(crate) fn not_found(what: &str, id: i64) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: format!("{} not found", what),
        message: format!("No {} with id {}", what.to_lowercase(), id),
        status_code: 404,
    })
}

/// Map a store error to a response
///
/// The full error is logged; clients only see a fixed message per kind.
pub(crate) fn store_failure(action: &str, err: &StoreError) -> HttpResponse {
    let error = format!("Failed to {}", action);

    match err {
        StoreError::Conflict(detail) => {
            tracing::info!("Conflict while trying to {}: {}", action, detail);
            HttpResponse::Conflict().json(ErrorResponse {
                error,
                message: "A record with the same unique key already exists".to_string(),
                status_code: 409,
            })
        }
        StoreError::Rejected(detail) => {
            tracing::info!("Rejected while trying to {}: {}", action, detail);
            HttpResponse::BadRequest().json(ErrorResponse {
                error,
                message: "The request references a missing record or breaks a data constraint"
                    .to_string(),
                status_code: 400,
            })
        }
        StoreError::NotFound(detail) => {
            tracing::info!("Not found while trying to {}: {}", action, detail);
            HttpResponse::NotFound().json(ErrorResponse {
                error,
                message: "The requested record does not exist".to_string(),
                status_code: 404,
            })
        }
        _ => {
            tracing::error!("Failed to {}: {}", action, err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error,
                message: "Internal server error".to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_web::web;
    use std::sync::Arc;
    use crate::services::{DataStore, InMemoryStore, RecordStore};

    /// Both app-data views over one shared store, as `main` registers them
    pub(crate) fn app_data(store: InMemoryStore) -> (web::Data<dyn DataStore>, web::Data<dyn RecordStore>) {
        let store = Arc::new(store);
        let data_store: Arc<dyn DataStore> = store.clone();
        let record_store: Arc<dyn RecordStore> = store;
        (web::Data::from(data_store), web::Data::from(record_store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};

    async fn body_of(resp: HttpResponse) -> ErrorResponse {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_conflict_maps_to_409() {
        let resp = store_failure(
            "assign skill",
            &StoreError::Conflict("duplicate key value violates unique constraint".to_string()),
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = body_of(resp).await;
        assert_eq!(body.status_code, 409);
        assert!(!body.message.contains("duplicate key"));
    }

    #[actix_web::test]
    async fn test_rejected_maps_to_400() {
        let resp = store_failure("create project", &StoreError::Rejected("fk".to_string()));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_driver_errors_are_not_echoed() {
        let resp = store_failure(
            "list skills",
            &StoreError::SqlxError(sqlx::Error::Protocol("relation \"skills\" does not exist".to_string())),
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(resp).await;
        assert_eq!(body.message, "Internal server error");
        assert_eq!(body.error, "Failed to list skills");
    }
}
