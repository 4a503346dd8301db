use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::error::ApiError;
use crate::models::ClientDraft;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{id}", web::get().to(get))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

async fn list(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.store.list_clients().await))
}

async fn get(state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    match state.store.get_client(&id).await {
        Some(client) => Ok(HttpResponse::Ok().json(client)),
        None => Err(ApiError::NotFound("Client not found".to_string())),
    }
}

async fn create(
    state: web::Data<AppState>,
    draft: web::Json<ClientDraft>,
) -> Result<HttpResponse, ApiError> {
    let client = state
        .store
        .create_client(draft.into_inner())
        .await
        .map_err(|err| state.internal("POST /api/clients", err))?;
    Ok(HttpResponse::Created().json(client))
}

async fn update(
    state: web::Data<AppState>,
    id: web::Path<String>,
    draft: web::Json<ClientDraft>,
) -> Result<HttpResponse, ApiError> {
    let updated = state
        .store
        .update_client(&id, draft.into_inner())
        .await
        .map_err(|err| state.internal("PUT /api/clients", err))?;
    match updated {
        Some(client) => Ok(HttpResponse::Ok().json(client)),
        None => Err(ApiError::NotFound("Client not found".to_string())),
    }
}

async fn delete(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let deleted = state
        .store
        .delete_client(&id)
        .await
        .map_err(|err| state.internal("DELETE /api/clients", err))?;
    if !deleted {
        return Err(ApiError::NotFound("Client not found".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
