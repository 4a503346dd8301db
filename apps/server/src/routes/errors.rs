use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/errors")
            .route("", web::get().to(recent))
            .route("", web::delete().to(clear)),
    );
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

async fn recent(
    state: web::Data<AppState>,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(10);
    let errors = state.errors.recent(limit);
    let total = errors.len();
    Ok(HttpResponse::Ok().json(json!({
        "errors": errors,
        "count": state.errors.count(),
        "total": total,
    })))
}

async fn clear(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    state.errors.clear();
    Ok(HttpResponse::Ok().json(json!({ "message": "Error log cleared" })))
}
