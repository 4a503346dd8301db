use actix_web::{HttpResponse, web};
use healthwatch::HealthError;

use crate::error::ApiError;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("/services", web::get().to(all_services))
            .route("/services/{id}", web::get().to(one_service))
            .route("/clients", web::get().to(all_clients))
            .route("/clients/{id}", web::get().to(one_client))
            .route("/cache", web::get().to(cache_snapshot)),
    );
}

fn surface(state: &AppState, route: &str, err: HealthError) -> ApiError {
    match err {
        HealthError::TargetNotFound { .. } => ApiError::NotFound(err.to_string()),
        HealthError::Registry(inner) => state.internal(route, inner),
    }
}

/// Live check of one service; the cache is updated as a side effect.
async fn one_service(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let record = state
        .monitor
        .check_service(&id)
        .await
        .map_err(|err| surface(&state, "GET /api/health/services", err))?;
    Ok(HttpResponse::Ok().json(record))
}

/// Live checks across every catalogued service.
async fn all_services(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let reports = state
        .monitor
        .check_all_services()
        .await
        .map_err(|err| surface(&state, "GET /api/health/services", err))?;
    Ok(HttpResponse::Ok().json(reports))
}

async fn one_client(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let record = state
        .monitor
        .check_client(&id)
        .await
        .map_err(|err| surface(&state, "GET /api/health/clients", err))?;
    Ok(HttpResponse::Ok().json(record))
}

async fn all_clients(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let reports = state
        .monitor
        .check_all_clients()
        .await
        .map_err(|err| surface(&state, "GET /api/health/clients", err))?;
    Ok(HttpResponse::Ok().json(reports))
}

/// Cached snapshot only; triggers no new probes.
async fn cache_snapshot(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.monitor.cached_snapshot()))
}
