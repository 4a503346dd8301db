use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::json;

pub mod clients;
pub mod errors;
pub mod health;
pub mod services;
pub mod settings;
pub mod wol;

/// Mount the whole API under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(services::configure)
            .configure(clients::configure)
            .configure(settings::configure)
            .configure(health::configure)
            .configure(wol::configure)
            .configure(errors::configure)
            .route("/ping", web::get().to(ping)),
    );
}

/// Liveness endpoint for the server itself.
async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok", "timestamp": Utc::now() }))
}
