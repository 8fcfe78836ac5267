use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{AssignSkillRequest, MessageResponse, PersonnelRequest, UpdateProficiencyRequest};
use crate::routes::{not_found, store_failure, validation_failed};
use crate::services::RecordStore;

/// Configure personnel and personnel-skill routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/personnel", web::get().to(list_personnel))
        .route("/personnel", web::post().to(create_personnel))
        .route("/personnel/{id}", web::get().to(get_personnel))
        .route("/personnel/{id}", web::put().to(update_personnel))
        .route("/personnel/{id}", web::delete().to(delete_personnel))
        .route("/personnel/{id}/skills", web::get().to(list_skills))
        .route("/personnel/{id}/skills", web::post().to(assign_skill))
        .route("/personnel/{id}/skills/{skill_id}", web::put().to(update_proficiency))
        .route("/personnel/{id}/skills/{skill_id}", web::delete().to(remove_skill));
}

async fn list_personnel(store: web::Data<dyn RecordStore>) -> impl Responder {
    match store.list_personnel().await {
        Ok(personnel) => HttpResponse::Ok().json(personnel),
        Err(e) => store_failure("list personnel", &e),
    }
}

async fn create_personnel(
    store: web::Data<dyn RecordStore>,
    req: web::Json<PersonnelRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match store.create_personnel(&req).await {
        Ok(person) => {
            tracing::info!("Created personnel {}", person.id);
            HttpResponse::Created().json(person)
        }
        Err(e) => store_failure("create personnel", &e),
    }
}

async fn get_personnel(store: web::Data<dyn RecordStore>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match store.get_personnel(id).await {
        Ok(Some(person)) => HttpResponse::Ok().json(person),
        Ok(None) => not_found("Personnel", id),
        Err(e) => store_failure("fetch personnel", &e),
    }
}

async fn update_personnel(
    store: web::Data<dyn RecordStore>,
    path: web::Path<i64>,
    req: web::Json<PersonnelRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let id = path.into_inner();
    match store.update_personnel(id, &req).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Personnel updated")),
        Ok(false) => not_found("Personnel", id),
        Err(e) => store_failure("update personnel", &e),
    }
}

async fn delete_personnel(store: web::Data<dyn RecordStore>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match store.delete_personnel(id).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Personnel deleted")),
        Ok(false) => not_found("Personnel", id),
        Err(e) => store_failure("delete personnel", &e),
    }
}

async fn list_skills(store: web::Data<dyn RecordStore>, path: web::Path<i64>) -> impl Responder {
    match store.list_personnel_skills(path.into_inner()).await {
        Ok(skills) => HttpResponse::Ok().json(skills),
        Err(e) => store_failure("list personnel skills", &e),
    }
}

async fn assign_skill(
    store: web::Data<dyn RecordStore>,
    path: web::Path<i64>,
    req: web::Json<AssignSkillRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let personnel_id = path.into_inner();
    match store
        .assign_skill(personnel_id, req.skill_id, req.proficiency_level)
        .await
    {
        Ok(()) => HttpResponse::Created().json(MessageResponse::new("Skill assigned successfully")),
        Err(e) => store_failure("assign skill", &e),
    }
}

async fn update_proficiency(
    store: web::Data<dyn RecordStore>,
    path: web::Path<(i64, i64)>,
    req: web::Json<UpdateProficiencyRequest>,
) -> impl Responder {
    let (personnel_id, skill_id) = path.into_inner();
    match store
        .update_skill_proficiency(personnel_id, skill_id, req.proficiency_level)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Proficiency updated")),
        Ok(false) => not_found("Personnel skill", skill_id),
        Err(e) => store_failure("update proficiency", &e),
    }
}

async fn remove_skill(store: web::Data<dyn RecordStore>, path: web::Path<(i64, i64)>) -> impl Responder {
    let (personnel_id, skill_id) = path.into_inner();
    match store.remove_skill(personnel_id, skill_id).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Skill removed")),
        Ok(false) => not_found("Personnel skill", skill_id),
        Err(e) => store_failure("remove skill", &e),
    }
}
