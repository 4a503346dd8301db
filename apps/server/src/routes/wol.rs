use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::wol;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/wol").route("/{id}", web::post().to(wake)));
}

/// Send a wake-on-LAN magic packet to the client's configured MAC address.
async fn wake(state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let Some(client) = state.store.get_client(&id).await else {
        return Err(ApiError::NotFound("Client not found".to_string()));
    };
    let Some(mac) = client.mac_address.as_deref() else {
        return Err(ApiError::BadRequest(
            "MAC address not configured for this client".to_string(),
        ));
    };

    let mac_bytes = wol::parse_mac(mac).map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let address = client
        .wol_address
        .as_deref()
        .unwrap_or(wol::DEFAULT_BROADCAST_ADDRESS);
    let port = client.wol_port.unwrap_or(wol::DEFAULT_WOL_PORT);

    wol::send_magic_packet(mac_bytes, address, port)
        .await
        .map_err(|err| state.internal("POST /api/wol", err))?;

    info!(client = %client.name, mac, "sent wake-on-LAN packet");
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("Wake on LAN packet sent to {}", client.name),
        "macAddress": mac,
        "timestamp": Utc::now(),
    })))
}
