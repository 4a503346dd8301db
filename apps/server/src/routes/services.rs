use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::error::ApiError;
use crate::models::ServiceDraft;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/services")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{id}", web::get().to(get))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

async fn list(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.store.list_services().await))
}

async fn get(state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    match state.store.get_service(&id).await {
        Some(service) => Ok(HttpResponse::Ok().json(service)),
        None => Err(ApiError::NotFound("Service not found".to_string())),
    }
}

async fn create(
    state: web::Data<AppState>,
    draft: web::Json<ServiceDraft>,
) -> Result<HttpResponse, ApiError> {
    let service = state
        .store
        .create_service(draft.into_inner())
        .await
        .map_err(|err| state.internal("POST /api/services", err))?;
    Ok(HttpResponse::Created().json(service))
}

async fn update(
    state: web::Data<AppState>,
    id: web::Path<String>,
    draft: web::Json<ServiceDraft>,
) -> Result<HttpResponse, ApiError> {
    let updated = state
        .store
        .update_service(&id, draft.into_inner())
        .await
        .map_err(|err| state.internal("PUT /api/services", err))?;
    match updated {
        Some(service) => Ok(HttpResponse::Ok().json(service)),
        None => Err(ApiError::NotFound("Service not found".to_string())),
    }
}

async fn delete(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let deleted = state
        .store
        .delete_service(&id)
        .await
        .map_err(|err| state.internal("DELETE /api/services", err))?;
    if !deleted {
        return Err(ApiError::NotFound("Service not found".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
