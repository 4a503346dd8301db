use actix_web::{HttpResponse, web};

use crate::error::ApiError;
use crate::models::SettingsPatch;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/config")
            .route("/settings", web::get().to(get_settings))
            .route("/settings", web::put().to(update_settings)),
    );
}

async fn get_settings(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.store.portal_settings().await))
}

/// Merge-update the settings, then reschedule immediately so cadence
/// changes do not wait for the next settings poll.
async fn update_settings(
    state: web::Data<AppState>,
    patch: web::Json<SettingsPatch>,
) -> Result<HttpResponse, ApiError> {
    let settings = state
        .store
        .update_settings(patch.into_inner())
        .await
        .map_err(|err| state.internal("PUT /api/config/settings", err))?;

    state.scheduler.reschedule().await;

    Ok(HttpResponse::Ok().json(settings))
}
