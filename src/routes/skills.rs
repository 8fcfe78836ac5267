use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{MessageResponse, SkillRequest};
use crate::routes::{not_found, store_failure, validation_failed};
use crate::services::RecordStore;

/// Configure skill catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/skills", web::get().to(list_skills))
        .route("/skills", web::post().to(create_skill))
        .route("/skills/{id}", web::get().to(get_skill))
        .route("/skills/{id}", web::put().to(update_skill))
        .route("/skills/{id}", web::delete().to(delete_skill));
}

async fn list_skills(store: web::Data<dyn RecordStore>) -> impl Responder {
    match store.list_skills().await {
        Ok(skills) => HttpResponse::Ok().json(skills),
        Err(e) => store_failure("list skills", &e),
    }
}

async fn create_skill(store: web::Data<dyn RecordStore>, req: web::Json<SkillRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match store.create_skill(&req).await {
        Ok(skill) => HttpResponse::Created().json(skill),
        Err(e) => store_failure("create skill", &e),
    }
}

async fn get_skill(store: web::Data<dyn RecordStore>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match store.get_skill(id).await {
        Ok(Some(skill)) => HttpResponse::Ok().json(skill),
        Ok(None) => not_found("Skill", id),
        Err(e) => store_failure("fetch skill", &e),
    }
}

async fn update_skill(
    store: web::Data<dyn RecordStore>,
    path: web::Path<i64>,
    req: web::Json<SkillRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let id = path.into_inner();
    match store.update_skill(id, &req).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Skill updated")),
        Ok(false) => not_found("Skill", id),
        Err(e) => store_failure("update skill", &e),
    }
}

async fn delete_skill(store: web::Data<dyn RecordStore>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match store.delete_skill(id).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Skill deleted")),
        Ok(false) => not_found("Skill", id),
        Err(e) => store_failure("delete skill", &e),
    }
}
