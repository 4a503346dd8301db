use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use healthwatch::probe::{IcmpPinger, Pinger, UnavailablePinger};
use healthwatch::{HealthMonitor, HealthScheduler, SettingsSource, TargetRegistry};
use logger::init_tracing;
use tracing::{info, warn};

mod config;
mod errlog;
mod error;
mod models;
mod routes;
mod state;
mod storage;
mod wol;

use config::ServerConfig;
use errlog::ErrorLog;
use state::AppState;
use storage::FileStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    info!("loading portal catalog from {}", config.data_dir.display());
    let store = Arc::new(
        FileStore::open(&config.data_dir)
            .await
            .context("failed to open portal storage")?,
    );

    // Without CAP_NET_RAW the echo sockets cannot be opened; services keep
    // working and pingable clients classify as offline.
    let pinger: Arc<dyn Pinger> = match IcmpPinger::new() {
        Ok(pinger) => Arc::new(pinger),
        Err(err) => {
            warn!("ICMP socket unavailable, client checks will report offline: {err:#}");
            Arc::new(UnavailablePinger::new("ICMP socket unavailable"))
        }
    };

    let registry: Arc<dyn TargetRegistry> = store.clone();
    let settings: Arc<dyn SettingsSource> = store.clone();
    let monitor = Arc::new(
        HealthMonitor::new(registry, settings, pinger).context("failed to build health monitor")?,
    );

    let scheduler = HealthScheduler::new(monitor.clone());
    scheduler.start().await;

    let state = web::Data::new(AppState {
        store,
        monitor,
        scheduler: scheduler.clone(),
        errors: Arc::new(ErrorLog::new()),
    });

    let addr = ("0.0.0.0", config.port);
    info!("portal API listening on {}:{}", addr.0, addr.1);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .configure(routes::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    scheduler.shutdown().await;
    Ok(())
}
